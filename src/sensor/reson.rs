use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;

/// Reson SeaBat 8100-series sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reson8100 {
    /// Latency between ping transmit and acquisition, milliseconds.
    pub latency: u16,
    /// Ping number from the sonar's own counter.
    pub ping_number: u32,
    /// Sonar id, vendor-specific code.
    pub sonar_id: u16,
    /// Sonar model, vendor-specific code.
    pub sonar_model: u16,
    /// Frequency, kHz.
    pub frequency: u16,
    /// Sound velocity used for this ping, tenths of a meter per second.
    pub velocity: u16,
}

impl Reson8100 {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Reson8100> {
        Ok(Reson8100 {
            latency: r.read_u16()?,
            ping_number: r.read_u32()?,
            sonar_id: r.read_u16()?,
            sonar_model: r.read_u16()?,
            frequency: r.read_u16()?,
            velocity: r.read_u16()?,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u16(self.latency)?;
        w.write_u32(self.ping_number)?;
        w.write_u16(self.sonar_id)?;
        w.write_u16(self.sonar_model)?;
        w.write_u16(self.frequency)?;
        w.write_u16(self.velocity)
    }
}

/// Reson 7100-series sensor-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reson7100 {
    /// Protocol version the datagram was recorded under.
    pub protocol_version: u16,
    /// Device id, vendor-specific code.
    pub device_id: u32,
    /// Sonar receiver bandwidth, Hz.
    pub receive_bandwidth: u32,
    /// Sample rate, Hz.
    pub sample_rate: f32,
    /// Transmit pulse length, seconds.
    pub tx_pulse_width: f32,
    /// Absorption coefficient applied, dB/km.
    pub absorption: f32,
}

impl Reson7100 {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Reson7100> {
        Ok(Reson7100 {
            protocol_version: r.read_u16()?,
            device_id: r.read_u32()?,
            receive_bandwidth: r.read_u32()?,
            sample_rate: r.read_u32()? as f32 / 1000.0,
            tx_pulse_width: r.read_u32()? as f32 / 1_000_000.0,
            absorption: r.read_u32()? as f32 / 1000.0,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        w.write_u16(self.protocol_version)?;
        w.write_u32(self.device_id)?;
        w.write_u32(self.receive_bandwidth)?;
        w.write_u32((self.sample_rate * 1000.0) as u32)?;
        w.write_u32((self.tx_pulse_width * 1_000_000.0) as u32)?;
        w.write_u32((self.absorption * 1000.0) as u32)
    }
}
