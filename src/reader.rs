//! Sequential reading of GSF files (§4.F, Component L).

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::marker::PhantomData;
use std::path::Path;

use crate::byteio::ByteReader;
use crate::error::{GsfError, Result};
use crate::file::FileTable;
use crate::record::{read_record, Record};

/// Reads GSF records sequentially from an underlying byte stream, threading a [`FileTable`]
/// across pings so scale factors persist the way they do in the file itself.
///
/// Not [`Send`]: the file table a `Reader` builds up is only meaningful to the read sequence
/// that produced it (§5).
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    file_table: FileTable,
    _not_send: PhantomData<*const ()>,
}

impl Reader<BufReader<File>> {
    /// Opens `path` and consumes its header record.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gsf::Reader;
    /// let mut reader = Reader::from_path("survey.gsf").unwrap();
    /// while let Some(record) = reader.read().unwrap() {
    ///     let _ = record;
    /// }
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GsfError::OpenFail {
            path: path.display().to_string(),
            source: e,
        })?;
        Reader::new(BufReader::new(file))
    }
}

impl<R: Read> Reader<R> {
    /// Wraps an existing reader, consuming and validating the leading header record.
    pub fn new(mut inner: R) -> Result<Reader<R>> {
        let mut file_table = FileTable::new();
        let record = read_next(&mut inner, &mut file_table)?.ok_or(GsfError::Eof)?;
        if !matches!(record, Record::Header(_)) {
            return Err(GsfError::CorruptRecord {
                offset: 0,
                reason: "file does not begin with a header record".to_string(),
            });
        }
        Ok(Reader {
            inner,
            file_table,
            _not_send: PhantomData,
        })
    }

    /// Reads the next record, or `Ok(None)` at a clean end of file.
    pub fn read(&mut self) -> Result<Option<Record>> {
        read_next(&mut self.inner, &mut self.file_table)
    }

    /// The scale-factor table accumulated from pings read so far (§4.F).
    pub fn file_table(&self) -> &FileTable {
        &self.file_table
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        self.read().transpose()
    }
}

/// Reads one full record's bytes (envelope plus payload, including any checksum) off `inner`
/// and decodes it, or returns `None` on a clean EOF before the next record's size word.
fn read_next(inner: &mut impl Read, file_table: &mut FileTable) -> Result<Option<Record>> {
    let mut size_buf = [0u8; 4];
    match inner.read_exact(&mut size_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(GsfError::ReadFail(e)),
    }
    let data_size = u32::from_be_bytes(size_buf);
    let mut rest = vec![0u8; data_size as usize];
    inner.read_exact(&mut rest).map_err(GsfError::ReadFail)?;

    let mut buf = Vec::with_capacity(4 + rest.len());
    buf.extend_from_slice(&size_buf);
    buf.extend_from_slice(&rest);

    let mut r = ByteReader::new(&buf);
    read_record(&mut r, file_table).map(Some)
}
