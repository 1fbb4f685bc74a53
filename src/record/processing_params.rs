use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A processing-parameters record: a free-form list of `key=value` parameters describing
/// corrections applied to subsequent pings (tide model, sound velocity source, and so on).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessingParameters {
    /// Time these parameters took effect.
    pub time: Time,
    /// Parameter strings, each independently NUL-padded on the wire but trimmed here.
    pub params: Vec<String>,
}

impl ProcessingParameters {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<ProcessingParameters> {
        let time = Time::read_from(r)?;
        let count = r.read_u16()?;
        let mut params = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let len = r.read_u16()? as usize;
            params.push(r.read_fixed_string(len)?);
        }
        Ok(ProcessingParameters { time, params })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_u16(self.params.len() as u16)?;
        for param in &self.params {
            w.write_u16(param.len() as u16)?;
            w.write_bytes(param.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_params_roundtrip() {
        let p = ProcessingParameters {
            time: Time::new(1, 0),
            params: vec!["TIDE MODEL=predicted".to_string(), "SVP SOURCE=ctd".to_string()],
        };
        let mut w = ByteWriter::new();
        p.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        let decoded = ProcessingParameters::read_from(&mut r).unwrap();
        assert_eq!(p, decoded);
    }
}
