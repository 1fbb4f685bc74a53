use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A processing-history entry: which program, run by whom, did what to the file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    /// Time the processing step was applied.
    pub time: Time,
    /// Name of the host machine the step ran on.
    pub host_name: String,
    /// Name of the program that performed the step.
    pub program_name: String,
    /// Command-line or parameter string passed to the program.
    pub command_line: String,
    /// Free-text comment describing the step.
    pub comment: String,
}

impl History {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<History> {
        let time = Time::read_from(r)?;
        let host_name = read_pascal_string(r)?;
        let program_name = read_pascal_string(r)?;
        let command_line = read_pascal_string(r)?;
        let comment = read_pascal_string(r)?;
        Ok(History {
            time,
            host_name,
            program_name,
            command_line,
            comment,
        })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        write_pascal_string(w, &self.host_name)?;
        write_pascal_string(w, &self.program_name)?;
        write_pascal_string(w, &self.command_line)?;
        write_pascal_string(w, &self.comment)
    }
}

fn read_pascal_string(r: &mut ByteReader) -> Result<String> {
    let len = r.read_u16()? as usize;
    r.read_fixed_string(len)
}

fn write_pascal_string(w: &mut ByteWriter, s: &str) -> Result<()> {
    w.write_u16(s.len() as u16)?;
    w.write_bytes(s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_roundtrips() {
        let h = History {
            time: Time::new(10, 0),
            host_name: "survey-host".to_string(),
            program_name: "mbprocess".to_string(),
            command_line: "-Fmbformat -Iinput.gsf".to_string(),
            comment: "applied tide correction".to_string(),
        };
        let mut w = ByteWriter::new();
        h.write_to(&mut w).unwrap();
        let bytes = w.into_inner();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(h, History::read_from(&mut r).unwrap());
    }
}
