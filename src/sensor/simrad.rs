use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Simrad EM100/EM1000/EM12/EM121 family sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Em1xx {
    /// Ship's pitch, hundredths of a degree.
    pub ship_pitch: i16,
    /// Transducer pitch, hundredths of a degree.
    pub transducer_pitch: i16,
    /// Sonar operating mode, vendor-specific code.
    pub mode: u8,
    /// Power level, vendor-specific code.
    pub power: u8,
    /// Attenuation, dB.
    pub attenuation: u8,
    /// Transmit pulse length, tenths of a millisecond.
    pub tvg: u8,
    /// Counter of pings since power-up, used to detect dropped pings.
    pub counter: u16,
}

impl Em1xx {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Em1xx> {
        Ok(Em1xx {
            ship_pitch: r.read_i16()?,
            transducer_pitch: r.read_i16()?,
            mode: r.read_u8()?,
            power: r.read_u8()?,
            attenuation: r.read_u8()?,
            tvg: r.read_u8()?,
            counter: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_i16(self.ship_pitch)?;
        w.write_i16(self.transducer_pitch)?;
        w.write_u8(self.mode)?;
        w.write_u8(self.power)?;
        w.write_u8(self.attenuation)?;
        w.write_u8(self.tvg)?;
        w.write_u16(self.counter)
    }
}

/// Simrad EM3000/EM3002/EM300/EM302/EM710/EM712/EM122/EM124 family sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Em3Or4 {
    /// Model number, e.g. 3000, 302, 710, 122.
    pub model_number: u16,
    /// Ping counter from the sonar's own numbering.
    pub ping_counter: u16,
    /// Serial number of the transmit transducer/sonar head.
    pub serial_number: u32,
    /// Surface sound speed, tenths of a meter per second.
    pub surface_velocity: u16,
    /// Transducer depth, centimeters.
    pub transducer_depth: u32,
    /// Valid detections reported by the sonar for this ping.
    pub valid_detections: u16,
    /// Sampling frequency, hundredths of a Hertz.
    pub sampling_frequency: u32,
    /// Depth difference between sonar heads, centimeters, for dual-head systems.
    pub depth_difference: i16,
}

impl Em3Or4 {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Em3Or4> {
        Ok(Em3Or4 {
            model_number: r.read_u16()?,
            ping_counter: r.read_u16()?,
            serial_number: r.read_u32()?,
            surface_velocity: r.read_u16()?,
            transducer_depth: r.read_u32()?,
            valid_detections: r.read_u16()?,
            sampling_frequency: r.read_u32()?,
            depth_difference: r.read_i16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u16(self.model_number)?;
        w.write_u16(self.ping_counter)?;
        w.write_u32(self.serial_number)?;
        w.write_u16(self.surface_velocity)?;
        w.write_u32(self.transducer_depth)?;
        w.write_u16(self.valid_detections)?;
        w.write_u32(self.sampling_frequency)?;
        w.write_i16(self.depth_difference)
    }
}
