//! Ping records: multibeam swath bathymetry and single-beam echosounder (§4.E).

use crate::array::{
    decode_beam_flags, decode_byte_array, decode_quality_flags, decode_scaled_array,
    decode_signed_scaled_array, encode_beam_flags, encode_byte_array, encode_quality_flags,
    encode_scaled_array, encode_signed_scaled_array,
};
use crate::byteio::{ByteReader, ByteWriter};
use crate::error::{GsfError, Result};
use crate::file::FileTable;
use crate::intensity::{decode_beam_series, encode_beam_series, BeamIntensitySeries, IntensitySeriesHeader};
use crate::scale::{FieldSize, ScaleFactor, ScaleFactors};
use crate::sensor::SensorSpecific;
use crate::time::Time;

const GSF_NULL_HEIGHT: i32 = i32::MAX;

/// Array subrecord tags (§4.C/§4.E). Mirrors `gsf_dec.c`'s `DecodeXxxArray` dispatch with a
/// compact, locally-consistent numbering rather than the original's exact per-field ids,
/// since this crate does not need to interoperate with files the original tools wrote
/// directly — but the *ranges* follow spec.md §4.D literally: array subrecords occupy
/// 1..31, sensor-specific dialects occupy 32..39/100..112/200..210, and the intensity time
/// series is the fixed id 101.
mod tag {
    pub const DEPTH: u8 = 1;
    pub const ACROSS_TRACK: u8 = 2;
    pub const ALONG_TRACK: u8 = 3;
    pub const TRAVEL_TIME: u8 = 4;
    pub const BEAM_ANGLE: u8 = 5;
    pub const MEAN_CAL_AMPLITUDE: u8 = 6;
    pub const MEAN_REL_AMPLITUDE: u8 = 7;
    pub const ECHO_WIDTH: u8 = 8;
    pub const QUALITY_FACTOR: u8 = 9;
    pub const RECEIVE_HEAVE: u8 = 10;
    pub const DEPTH_ERROR: u8 = 11;
    pub const ACROSS_TRACK_ERROR: u8 = 12;
    pub const ALONG_TRACK_ERROR: u8 = 13;
    pub const NOMINAL_DEPTH: u8 = 14;
    pub const QUALITY_FLAGS: u8 = 15;
    pub const BEAM_FLAGS: u8 = 16;
    pub const SIGNAL_TO_NOISE: u8 = 17;
    pub const VERTICAL_ERROR: u8 = 18;
    pub const HORIZONTAL_ERROR: u8 = 19;
    pub const SECTOR_NUMBER: u8 = 20;
    pub const DETECTION_INFO: u8 = 21;
    pub const CLEANING_COUNT: u8 = 22;
    pub const FORWARD_ANGLE: u8 = 23;
    pub const INCIDENT_BEAM_ADJUSTMENT: u8 = 24;
    pub const DOPPLER_CORRECTION: u8 = 25;
    pub const SCALE_FACTORS: u8 = 26;
    pub const SENSOR_SPECIFIC: u8 = 32;
    pub const INTENSITY_SERIES: u8 = 101;
    pub const MAX_ARRAY_TAG: u8 = 25;

    /// Array subrecords whose raw on-wire samples are signed (`gsf_dec.c`'s
    /// `DecodeSigned{Byte,TwoByte,FourByte}Array` call sites): across-track and along-track
    /// position (beams to port of nadir are negative) and mean-calibrated amplitude. Every
    /// other scaled array (depth, travel time, mean-relative amplitude, the error arrays, ...)
    /// is unsigned.
    pub fn is_signed(id: u8) -> bool {
        matches!(id, ACROSS_TRACK | ALONG_TRACK | MEAN_CAL_AMPLITUDE)
    }
}

/// Either kind of ping a GSF file can carry.
#[derive(Clone, Debug, PartialEq)]
pub enum Ping {
    /// A multibeam swath-bathymetry ping.
    Swath(SwathBathyPing),
    /// A single-beam echosounder ping.
    SingleBeam(SingleBeamPing),
}

/// A multibeam swath-bathymetry ping: mandatory scalars plus a set of optional per-beam
/// arrays, a sensor-specific subrecord, and an optional per-beam intensity time series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwathBathyPing {
    /// Ping time.
    pub time: Time,
    /// Ship latitude at ping time, decimal degrees.
    pub latitude: f64,
    /// Ship longitude at ping time, decimal degrees.
    pub longitude: f64,
    /// Number of beams in this ping.
    pub number_beams: u16,
    /// Index of the center (nadir) beam.
    pub center_beam: u16,
    /// Ping-level status bitmask.
    pub ping_flags: u16,
    /// Tide corrector applied, meters.
    pub tide_corrector: f64,
    /// Depth corrector applied (heave, draft, etc. combined), meters.
    pub depth_corrector: f64,
    /// Heading, degrees true.
    pub heading: f64,
    /// Pitch, degrees.
    pub pitch: f64,
    /// Roll, degrees.
    pub roll: f64,
    /// Heave, meters.
    pub heave: f64,
    /// Course over ground, degrees true.
    pub course: f64,
    /// Speed over ground, meters/second.
    pub speed: f64,
    /// Antenna height above the ellipsoid, meters. `None` for files with no GPS-derived
    /// vertical datum (mirrors the original's version-gated `GSF_NULL_HEIGHT` sentinel).
    pub height: Option<f64>,
    /// Dynamic draft / separation, meters.
    pub sep: Option<f64>,
    /// Tide corrector derived from GPS ellipsoid height rather than a tide model, meters.
    pub gps_tide_corrector: Option<f64>,
    /// The scale factors this ping's arrays were encoded with.
    pub scale_factors: ScaleFactors,
    /// Depth, meters, one per beam.
    pub depth: Vec<f64>,
    /// Across-track distance from nadir, meters, one per beam.
    pub across_track: Vec<f64>,
    /// Along-track distance from nadir, meters, one per beam.
    pub along_track: Vec<f64>,
    /// Two-way travel time, seconds, one per beam.
    pub travel_time: Vec<f64>,
    /// Beam pointing angle, degrees, one per beam.
    pub beam_angle: Vec<f64>,
    /// Forward-looking beam angle component, degrees, one per beam (separate from
    /// `beam_angle`'s across-track component on sonars that report both).
    pub beam_angle_forward: Vec<f64>,
    /// Calibrated mean amplitude, dB, one per beam.
    pub mean_cal_amplitude: Vec<f64>,
    /// Relative mean amplitude, dB, one per beam.
    pub mean_rel_amplitude: Vec<f64>,
    /// Echo width, seconds, one per beam.
    pub echo_width: Vec<f64>,
    /// Quality factor, one per beam.
    pub quality_factor: Vec<f64>,
    /// Receive-time heave, meters, one per beam.
    pub receive_heave: Vec<f64>,
    /// Estimated depth error, meters, one per beam.
    pub depth_error: Vec<f64>,
    /// Estimated across-track error, meters, one per beam.
    pub across_track_error: Vec<f64>,
    /// Estimated along-track error, meters, one per beam.
    pub along_track_error: Vec<f64>,
    /// Nominal (unsmoothed) depth, meters, one per beam.
    pub nominal_depth: Vec<f64>,
    /// 2-bit quality flags, one per beam.
    pub quality_flags: Vec<u8>,
    /// Beam flags ([`crate::flag`] bit patterns), one per beam.
    pub beam_flags: Vec<u8>,
    /// Signal-to-noise ratio, dB, one per beam.
    pub signal_to_noise: Vec<f64>,
    /// Estimated vertical (depth) TPU, meters, one per beam.
    pub vertical_error: Vec<f64>,
    /// Estimated horizontal (position) TPU, meters, one per beam.
    pub horizontal_error: Vec<f64>,
    /// Transmit sector number, one per beam.
    pub sector_number: Vec<u16>,
    /// Bottom-detection algorithm used, one per beam.
    pub detection_info: Vec<u16>,
    /// Automated-cleaning pass count, one per beam.
    pub cleaning_count: Vec<u16>,
    /// Adjustment applied to compensate for the beam's incidence angle on the seafloor,
    /// meters, one per beam.
    pub incident_beam_adjustment: Vec<f64>,
    /// Doppler correction applied to the beam's range/angle estimate, meters/second, one
    /// per beam.
    pub doppler_correction: Vec<f64>,
    /// Sensor-specific subrecord, if the ping carries one.
    pub sensor_specific: Option<SensorSpecific>,
    /// Per-beam intensity time series, if the ping carries one.
    pub intensity: Option<(IntensitySeriesHeader, Vec<BeamIntensitySeries>)>,
}

impl SwathBathyPing {
    pub(crate) fn read_from(r: &mut ByteReader, ft: &mut FileTable, size: usize) -> Result<SwathBathyPing> {
        let start = r.position();
        let time = Time::read_from(r)?;
        let latitude = r.read_i32()? as f64 / 1.0e7;
        let longitude = r.read_i32()? as f64 / 1.0e7;
        let number_beams = r.read_u16()?;
        if number_beams == 0 {
            return Err(GsfError::InvalidBeamCount(0));
        }
        let center_beam = r.read_u16()?;
        let ping_flags = r.read_u16()?;
        r.skip(2)?; // reserved
        let tide_corrector = r.read_i16()? as f64 / 100.0;
        let depth_corrector = r.read_i32()? as f64 / 100.0;
        let heading = r.read_u16()? as f64 / 100.0;
        let pitch = r.read_i16()? as f64 / 100.0;
        let roll = r.read_i16()? as f64 / 100.0;
        let heave = r.read_i16()? as f64 / 100.0;
        let course = r.read_u16()? as f64 / 100.0;
        let speed = r.read_u16()? as f64 / 100.0;

        let height_raw = r.read_i32()?;
        let sep_raw = r.read_i32()?;
        let gps_tide_raw = r.read_i32()?;
        r.skip(2)?; // spare
        let height = (height_raw != GSF_NULL_HEIGHT).then(|| height_raw as f64 / 1000.0);
        let sep = (sep_raw != GSF_NULL_HEIGHT).then(|| sep_raw as f64 / 1000.0);
        let gps_tide_corrector =
            (gps_tide_raw != GSF_NULL_HEIGHT).then(|| gps_tide_raw as f64 / 1000.0);

        let mut ping = SwathBathyPing {
            time,
            latitude,
            longitude,
            number_beams,
            center_beam,
            ping_flags,
            tide_corrector,
            depth_corrector,
            heading,
            pitch,
            roll,
            heave,
            course,
            speed,
            height,
            sep,
            gps_tide_corrector,
            scale_factors: ft.scale_factors.clone(),
            ..Default::default()
        };

        while size as i64 - (r.position() as i64 - start as i64) > 4 {
            let tag = r.read_u8()?;
            let sub_size = r.read_u32()? as usize;
            let sub_start = r.position();
            ping.read_subrecord(r, tag, sub_size)?;
            let consumed = r.position() - sub_start;
            if consumed < sub_size {
                r.skip(sub_size - consumed)?;
            }
        }

        let ping_index = ft.advance_ping();
        if ping.scale_factors != ft.scale_factors {
            log::debug!("ping {ping_index} supplied new scale factors, updating file table");
            ft.set_scale_factors(ping_index, ping.scale_factors.clone());
        }
        Ok(ping)
    }

    fn read_subrecord(&mut self, r: &mut ByteReader, subtag: u8, sub_size: usize) -> Result<()> {
        let beams = self.number_beams as usize;
        match subtag {
            tag::SCALE_FACTORS => {
                self.scale_factors = ScaleFactors::read_from(r)?;
            }
            tag::SENSOR_SPECIFIC => {
                self.sensor_specific = Some(SensorSpecific::read_from(r, r.read_u8()?, sub_size - 1)?);
            }
            tag::INTENSITY_SERIES => {
                let header = IntensitySeriesHeader::read_from(r)?;
                let mut series = Vec::with_capacity(beams);
                for _ in 0..beams {
                    series.push(decode_beam_series(r, header.bits_per_sample)?);
                }
                self.intensity = Some((header, series));
            }
            tag::QUALITY_FLAGS => {
                self.quality_flags = decode_quality_flags(r, beams)?;
            }
            tag::BEAM_FLAGS => {
                self.beam_flags = decode_beam_flags(r, beams)?;
            }
            tag::SECTOR_NUMBER => {
                self.sector_number = decode_byte_array(r, beams)?;
            }
            tag::DETECTION_INFO => {
                self.detection_info = decode_byte_array(r, beams)?;
            }
            tag::CLEANING_COUNT => {
                self.cleaning_count = decode_byte_array(r, beams)?;
            }
            id if id >= 1 && id <= tag::MAX_ARRAY_TAG => {
                let values = self.decode_array(r, id, sub_size)?;
                self.assign_array(id, values);
            }
            _ => {
                log::debug!("skipping unrecognized ping subrecord tag {subtag} ({sub_size} bytes)");
                r.skip(sub_size)?;
            }
        }
        Ok(())
    }

    fn field_size_for(&self, id: u8, sub_size: usize) -> Result<(FieldSize, ScaleFactor)> {
        let scale = *self
            .scale_factors
            .get(id)
            .ok_or(GsfError::BadScaleFactor {
                id,
                reason: "no scale factor loaded for this array subrecord".to_string(),
            })?;
        let size = scale.field_size().unwrap_or_else(|| {
            log::warn!(
                "array subrecord {id} has no compression flag, recovering field size by inference"
            );
            ScaleFactors::infer_field_size(sub_size as u32, self.number_beams, None, |_| None)
        });
        Ok((size, scale))
    }

    fn decode_array(&self, r: &mut ByteReader, id: u8, sub_size: usize) -> Result<Vec<f64>> {
        let beams = self.number_beams as usize;
        let (size, scale) = self.field_size_for(id, sub_size)?;
        if tag::is_signed(id) {
            decode_signed_scaled_array(r, beams, size, &scale)
        } else {
            decode_scaled_array(r, beams, size, &scale)
        }
    }

    fn assign_array(&mut self, id: u8, values: Vec<f64>) {
        match id {
            tag::DEPTH => self.depth = values,
            tag::ACROSS_TRACK => self.across_track = values,
            tag::ALONG_TRACK => self.along_track = values,
            tag::TRAVEL_TIME => self.travel_time = values,
            tag::BEAM_ANGLE => self.beam_angle = values,
            tag::FORWARD_ANGLE => self.beam_angle_forward = values,
            tag::MEAN_CAL_AMPLITUDE => self.mean_cal_amplitude = values,
            tag::MEAN_REL_AMPLITUDE => self.mean_rel_amplitude = values,
            tag::ECHO_WIDTH => self.echo_width = values,
            tag::QUALITY_FACTOR => self.quality_factor = values,
            tag::RECEIVE_HEAVE => self.receive_heave = values,
            tag::DEPTH_ERROR => self.depth_error = values,
            tag::ACROSS_TRACK_ERROR => self.across_track_error = values,
            tag::ALONG_TRACK_ERROR => self.along_track_error = values,
            tag::NOMINAL_DEPTH => self.nominal_depth = values,
            tag::SIGNAL_TO_NOISE => self.signal_to_noise = values,
            tag::VERTICAL_ERROR => self.vertical_error = values,
            tag::HORIZONTAL_ERROR => self.horizontal_error = values,
            tag::INCIDENT_BEAM_ADJUSTMENT => self.incident_beam_adjustment = values,
            tag::DOPPLER_CORRECTION => self.doppler_correction = values,
            _ => {}
        }
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_i32((self.latitude * 1.0e7).round() as i32)?;
        w.write_i32((self.longitude * 1.0e7).round() as i32)?;
        w.write_u16(self.number_beams)?;
        w.write_u16(self.center_beam)?;
        w.write_u16(self.ping_flags)?;
        w.write_u16(0)?;
        w.write_i16((self.tide_corrector * 100.0).round() as i16)?;
        w.write_i32((self.depth_corrector * 100.0).round() as i32)?;
        w.write_u16((self.heading * 100.0).round() as u16)?;
        w.write_i16((self.pitch * 100.0).round() as i16)?;
        w.write_i16((self.roll * 100.0).round() as i16)?;
        w.write_i16((self.heave * 100.0).round() as i16)?;
        w.write_u16((self.course * 100.0).round() as u16)?;
        w.write_u16((self.speed * 100.0).round() as u16)?;
        w.write_i32(self.height.map_or(GSF_NULL_HEIGHT, |v| (v * 1000.0).round() as i32))?;
        w.write_i32(self.sep.map_or(GSF_NULL_HEIGHT, |v| (v * 1000.0).round() as i32))?;
        w.write_i32(
            self.gps_tide_corrector
                .map_or(GSF_NULL_HEIGHT, |v| (v * 1000.0).round() as i32),
        )?;
        w.write_u16(0)?; // spare

        if self.scale_factors.has_any() {
            write_subrecord(w, tag::SCALE_FACTORS, |body| self.scale_factors.write_to(body))?;
        }
        self.write_array(w, tag::DEPTH, &self.depth)?;
        self.write_array(w, tag::ACROSS_TRACK, &self.across_track)?;
        self.write_array(w, tag::ALONG_TRACK, &self.along_track)?;
        self.write_array(w, tag::TRAVEL_TIME, &self.travel_time)?;
        self.write_array(w, tag::BEAM_ANGLE, &self.beam_angle)?;
        self.write_array(w, tag::FORWARD_ANGLE, &self.beam_angle_forward)?;
        self.write_array(w, tag::MEAN_CAL_AMPLITUDE, &self.mean_cal_amplitude)?;
        self.write_array(w, tag::MEAN_REL_AMPLITUDE, &self.mean_rel_amplitude)?;
        self.write_array(w, tag::ECHO_WIDTH, &self.echo_width)?;
        self.write_array(w, tag::QUALITY_FACTOR, &self.quality_factor)?;
        self.write_array(w, tag::RECEIVE_HEAVE, &self.receive_heave)?;
        self.write_array(w, tag::DEPTH_ERROR, &self.depth_error)?;
        self.write_array(w, tag::ACROSS_TRACK_ERROR, &self.across_track_error)?;
        self.write_array(w, tag::ALONG_TRACK_ERROR, &self.along_track_error)?;
        self.write_array(w, tag::NOMINAL_DEPTH, &self.nominal_depth)?;
        self.write_array(w, tag::SIGNAL_TO_NOISE, &self.signal_to_noise)?;
        self.write_array(w, tag::VERTICAL_ERROR, &self.vertical_error)?;
        self.write_array(w, tag::HORIZONTAL_ERROR, &self.horizontal_error)?;
        self.write_array(w, tag::INCIDENT_BEAM_ADJUSTMENT, &self.incident_beam_adjustment)?;
        self.write_array(w, tag::DOPPLER_CORRECTION, &self.doppler_correction)?;

        if !self.quality_flags.is_empty() {
            write_subrecord(w, tag::QUALITY_FLAGS, |body| {
                encode_quality_flags(body, &self.quality_flags)
            })?;
        }
        if !self.beam_flags.is_empty() {
            write_subrecord(w, tag::BEAM_FLAGS, |body| {
                encode_beam_flags(body, &self.beam_flags)
            })?;
        }
        if !self.sector_number.is_empty() {
            write_subrecord(w, tag::SECTOR_NUMBER, |body| {
                encode_byte_array(body, &self.sector_number)
            })?;
        }
        if !self.detection_info.is_empty() {
            write_subrecord(w, tag::DETECTION_INFO, |body| {
                encode_byte_array(body, &self.detection_info)
            })?;
        }
        if !self.cleaning_count.is_empty() {
            write_subrecord(w, tag::CLEANING_COUNT, |body| {
                encode_byte_array(body, &self.cleaning_count)
            })?;
        }
        if let Some(sensor) = &self.sensor_specific {
            write_subrecord(w, tag::SENSOR_SPECIFIC, |body| {
                body.write_u8(sensor.tag())?;
                sensor.write_to(body)
            })?;
        }
        if let Some((header, series)) = &self.intensity {
            write_subrecord(w, tag::INTENSITY_SERIES, |body| {
                header.write_to(body)?;
                for beam in series {
                    encode_beam_series(body, beam, header.bits_per_sample)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn write_array(&self, w: &mut ByteWriter, id: u8, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let scale = *self.scale_factors.get(id).ok_or(GsfError::BadScaleFactor {
            id,
            reason: "no scale factor loaded for this array subrecord".to_string(),
        })?;
        let size = scale.field_size().unwrap_or(FieldSize::Two);
        if tag::is_signed(id) {
            write_subrecord(w, id, |body| encode_signed_scaled_array(body, values, size, &scale))
        } else {
            write_subrecord(w, id, |body| encode_scaled_array(body, values, size, &scale))
        }
    }
}

fn write_subrecord(
    w: &mut ByteWriter,
    id: u8,
    body_fn: impl FnOnce(&mut ByteWriter) -> Result<()>,
) -> Result<()> {
    let mut body = ByteWriter::new();
    body_fn(&mut body)?;
    let bytes = body.into_inner();
    w.write_u8(id)?;
    w.write_u32(bytes.len() as u32)?;
    w.write_bytes(&bytes)
}

impl ScaleFactors {
    /// Whether this table has any entries at all (used to decide whether to re-emit a
    /// scale-factor subrecord on write).
    pub fn has_any(&self) -> bool {
        (1..=crate::scale::MAX_ARRAY_SUBRECORDS as u8).any(|id| self.get(id).is_some())
    }
}

/// A single-beam echosounder ping: one depth measurement per ping rather than a swath.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SingleBeamPing {
    /// Ping time.
    pub time: Time,
    /// Ship latitude, decimal degrees.
    pub latitude: f64,
    /// Ship longitude, decimal degrees.
    pub longitude: f64,
    /// Measured depth, meters.
    pub depth: f64,
    /// Sound velocity used, meters/second.
    pub sound_velocity: f64,
    /// Tide corrector applied, meters.
    pub tide_corrector: f64,
}

impl SingleBeamPing {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<SingleBeamPing> {
        let time = Time::read_from(r)?;
        let latitude = r.read_i32()? as f64 / 1.0e7;
        let longitude = r.read_i32()? as f64 / 1.0e7;
        let depth = r.read_u32()? as f64 / 100.0;
        let sound_velocity = r.read_u16()? as f64 / 10.0;
        let tide_corrector = r.read_i16()? as f64 / 100.0;
        Ok(SingleBeamPing {
            time,
            latitude,
            longitude,
            depth,
            sound_velocity,
            tide_corrector,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_i32((self.latitude * 1.0e7).round() as i32)?;
        w.write_i32((self.longitude * 1.0e7).round() as i32)?;
        w.write_u32((self.depth * 100.0).round() as u32)?;
        w.write_u16((self.sound_velocity * 10.0).round() as u16)?;
        w.write_i16((self.tide_corrector * 100.0).round() as i16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::MAX_ARRAY_SUBRECORDS;

    fn ping_with_depths(depths: Vec<f64>) -> SwathBathyPing {
        // compression_flag 0x20 packs FieldSize::Two (2 bytes/sample) into the high nibble.
        let mut w = ByteWriter::new();
        w.write_u32(1).unwrap();
        w.write_u32(((tag::DEPTH as u32) << 24) | (0x20u32 << 16)).unwrap();
        w.write_u32(100).unwrap();
        w.write_i32(0).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let sf = ScaleFactors::read_from(&mut r).unwrap();
        let _ = MAX_ARRAY_SUBRECORDS;
        SwathBathyPing {
            time: Time::new(1, 0),
            latitude: 10.0,
            longitude: 20.0,
            number_beams: depths.len() as u16,
            center_beam: 0,
            scale_factors: sf,
            depth: depths,
            ..Default::default()
        }
    }

    #[test]
    fn swath_ping_roundtrips_depth_array() {
        let ping = ping_with_depths(vec![1.0, 2.0, 3.0]);
        let mut w = ByteWriter::new();
        ping.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut ft = FileTable::new();
        let mut r = ByteReader::new(&bytes);
        let decoded = SwathBathyPing::read_from(&mut r, &mut ft, bytes.len()).unwrap();
        assert_eq!(ping.number_beams, decoded.number_beams);
        for (a, b) in ping.depth.iter().zip(decoded.depth.iter()) {
            assert!((a - b).abs() < 0.01);
        }
    }

    #[test]
    fn zero_beams_is_rejected() {
        let mut r = ByteReader::new(&[0u8; 40]);
        let mut ft = FileTable::new();
        assert!(matches!(
            SwathBathyPing::read_from(&mut r, &mut ft, 40),
            Err(GsfError::InvalidBeamCount(0))
        ));
    }

    #[test]
    fn single_beam_ping_roundtrips() {
        let p = SingleBeamPing {
            time: Time::new(5, 0),
            latitude: 1.0,
            longitude: 2.0,
            depth: 50.0,
            sound_velocity: 1500.0,
            tide_corrector: 0.3,
        };
        let mut w = ByteWriter::new();
        p.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = SingleBeamPing::read_from(&mut r).unwrap();
        assert!((p.depth - decoded.depth).abs() < 0.01);
    }

    #[test]
    fn across_track_roundtrips_negative_samples() {
        let mut ping = ping_with_depths(vec![1.0, 2.0, 3.0, 4.0]);
        ping.across_track = vec![-3.0, -1.0, 1.0, 3.0];
        ping.scale_factors.set_entry(tag::ACROSS_TRACK, 100.0, 0.0, 0x20);

        let mut w = ByteWriter::new();
        ping.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut ft = FileTable::new();
        let mut r = ByteReader::new(&bytes);
        let decoded = SwathBathyPing::read_from(&mut r, &mut ft, bytes.len()).unwrap();

        for (a, b) in ping.across_track.iter().zip(decoded.across_track.iter()) {
            assert!((a - b).abs() < 0.01, "{a} vs {b}");
        }
        assert!(
            decoded.across_track.iter().any(|&v| v < 0.0),
            "negative across-track samples must not saturate to zero on round trip"
        );
    }
}
