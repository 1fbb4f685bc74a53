//! Sequential writing of GSF files (§4.F, Component L).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

use crate::byteio::ByteWriter;
use crate::error::{GsfError, Result};
use crate::file::FileTable;
use crate::record::{write_record, Ping, Record};

/// Writes GSF records sequentially to an underlying byte sink, threading a [`FileTable`]
/// across pings the same way [`crate::Reader`] does on the way in.
///
/// Not [`Send`], for the same reason as [`crate::Reader`] (§5).
#[derive(Debug)]
pub struct Writer<W> {
    inner: W,
    file_table: FileTable,
    with_checksum: bool,
    _not_send: PhantomData<*const ()>,
}

impl Writer<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the given header banner immediately.
    pub fn create<P: AsRef<Path>>(path: P, header: impl Into<String>) -> Result<Writer<BufWriter<File>>> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| GsfError::OpenFail {
            path: path.display().to_string(),
            source: e,
        })?;
        Writer::new(BufWriter::new(file), header)
    }
}

impl<W: Write> Writer<W> {
    /// Wraps an existing writer, writing the header record immediately.
    pub fn new(inner: W, header: impl Into<String>) -> Result<Writer<W>> {
        let mut writer = Writer {
            inner,
            file_table: FileTable::new(),
            with_checksum: false,
            _not_send: PhantomData,
        };
        writer.write(&Record::Header(header.into()))?;
        Ok(writer)
    }

    /// Enables or disables the optional per-record CRC-32 checksum (§4.E) for subsequent
    /// writes.
    pub fn set_checksum(&mut self, enabled: bool) {
        self.with_checksum = enabled;
    }

    /// Writes one record, updating the file table first if it is a ping carrying fresh scale
    /// factors.
    pub fn write(&mut self, record: &Record) -> Result<()> {
        if let Record::Ping(Ping::Swath(ping)) = record {
            let ping_index = self.file_table.advance_ping();
            if ping.scale_factors != self.file_table.scale_factors {
                self.file_table
                    .set_scale_factors(ping_index, ping.scale_factors.clone());
            }
        }
        let mut w = ByteWriter::new();
        write_record(&mut w, record, self.with_checksum)?;
        self.inner
            .write_all(&w.into_inner())
            .map_err(|e| GsfError::WriteFail(e.to_string()))
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| GsfError::WriteFail(e.to_string()))
    }

    /// The scale-factor table built up from pings written so far.
    pub fn file_table(&self) -> &FileTable {
        &self.file_table
    }
}
