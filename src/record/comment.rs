use crate::byteio::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::time::Time;

/// A free-text comment, timestamped so it can be positioned relative to the surrounding
/// pings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comment {
    /// Time the comment was recorded.
    pub time: Time,
    /// Comment text.
    pub text: String,
}

impl Comment {
    pub(crate) fn read_from(r: &mut ByteReader) -> Result<Comment> {
        let time = Time::read_from(r)?;
        let len = r.read_u32()? as usize;
        let text = r.read_fixed_string(len)?;
        Ok(Comment { time, text })
    }

    pub(crate) fn write_to(&self, w: &mut ByteWriter) -> Result<()> {
        self.time.write_to(w)?;
        w.write_u32(self.text.len() as u32)?;
        w.write_bytes(self.text.as_bytes())
    }
}
