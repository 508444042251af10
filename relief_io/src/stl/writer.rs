//! Streaming binary STL writers.
//!
//! The triangle count sits in front of the records but is only known once the
//! sweep is over. [`StlWriter`] writes a provisional zero count and patches it
//! in place on [`StlWriter::finish`]; [`BufferedStlWriter`] keeps the records
//! in memory and writes the preamble last, for sinks that cannot seek.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use relief_core::{Point3, Triangle};

use super::header::{StlHeader, StlRecord, COUNT_OFFSET};
use crate::error::{Result, StlError};

fn next_count(count: u32) -> Result<u32> {
    count.checked_add(1).ok_or(StlError::TooManyTriangles)
}

/// Binary STL writer over a seekable stream.
///
/// The count field is only correct after `finish` returns `Ok`. A writer
/// dropped early leaves a stream whose count reads zero.
#[derive(Debug)]
pub struct StlWriter<W: Write + Seek> {
    inner: W,
    start: u64,
    count: u32,
}

impl<W: Write + Seek> StlWriter<W> {
    /// Begin an STL stream with a zero-filled header.
    pub fn new(inner: W) -> Result<Self> {
        Self::with_header(inner, StlHeader::default())
    }

    /// Begin an STL stream with the given header and a provisional count of 0.
    pub fn with_header(mut inner: W, header: StlHeader) -> Result<Self> {
        let start = inner.stream_position()?;
        inner.write_all(&header.to_preamble(0))?;
        Ok(Self {
            inner,
            start,
            count: 0,
        })
    }

    /// Append one triangle record.
    pub fn write_triangle(&mut self, normal: Point3, triangle: &Triangle) -> Result<()> {
        self.write_record(&StlRecord::new(normal, *triangle))
    }

    /// Append a prepared record.
    pub fn write_record(&mut self, record: &StlRecord) -> Result<()> {
        let next = next_count(self.count)?;
        self.inner.write_all(&record.to_bytes())?;
        self.count = next;
        Ok(())
    }

    /// Records written so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Patch the count field, restore the stream position and flush.
    ///
    /// Returns the number of records written.
    pub fn finish(mut self) -> Result<u32> {
        let end = self.inner.stream_position()?;
        self.inner
            .seek(SeekFrom::Start(self.start + COUNT_OFFSET as u64))?;
        self.inner.write_all(&self.count.to_le_bytes())?;
        self.inner.seek(SeekFrom::Start(end))?;
        self.inner.flush()?;

        log::debug!("STL count patched: {} triangles", self.count);
        Ok(self.count)
    }
}

/// Binary STL writer for non-seekable sinks.
///
/// Records are held in memory; `finish` writes header, count and body in one
/// pass.
#[derive(Debug)]
pub struct BufferedStlWriter<W: Write> {
    inner: W,
    header: StlHeader,
    body: Vec<u8>,
    count: u32,
}

impl<W: Write> BufferedStlWriter<W> {
    /// Create a buffered writer with a zero-filled header.
    pub fn new(inner: W) -> Self {
        Self::with_header(inner, StlHeader::default())
    }

    /// Create a buffered writer with the given header.
    pub fn with_header(inner: W, header: StlHeader) -> Self {
        Self {
            inner,
            header,
            body: Vec::new(),
            count: 0,
        }
    }

    /// Append one triangle record.
    pub fn write_triangle(&mut self, normal: Point3, triangle: &Triangle) -> Result<()> {
        self.write_record(&StlRecord::new(normal, *triangle))
    }

    /// Append a prepared record.
    pub fn write_record(&mut self, record: &StlRecord) -> Result<()> {
        let next = next_count(self.count)?;
        self.body.extend_from_slice(&record.to_bytes());
        self.count = next;
        Ok(())
    }

    /// Records buffered so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Write the complete stream and flush. Returns the number of records.
    pub fn finish(mut self) -> Result<u32> {
        self.inner.write_all(&self.header.to_preamble(self.count))?;
        self.inner.write_all(&self.body)?;
        self.inner.flush()?;
        Ok(self.count)
    }
}

/// Sibling path used while a file export is in progress: `<name>.partial`.
pub fn partial_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| StlError::InvalidPath {
        path: path.to_path_buf(),
    })?;
    let mut partial = name.to_os_string();
    partial.push(".partial");
    Ok(path.with_file_name(partial))
}

/// Write an STL file so that `path` only ever holds a finished stream.
///
/// Records go to `<path>.partial`; the closure writes triangles and the
/// count is patched afterwards. On success the partial file is renamed over
/// `path`. On any failure it is removed and `path` is left untouched.
///
/// Returns the closure's value together with the number of records.
pub fn write_stl_file<P, T, E, F>(
    path: P,
    header: StlHeader,
    write: F,
) -> core::result::Result<(T, u32), E>
where
    P: AsRef<Path>,
    E: From<StlError>,
    F: FnOnce(&mut StlWriter<BufWriter<File>>) -> core::result::Result<T, E>,
{
    let path = path.as_ref();
    let partial = partial_path(path)?;

    let result = write_partial(&partial, header, write);
    match result {
        Ok(value) => {
            if let Err(err) = std::fs::rename(&partial, path) {
                discard_partial(&partial);
                return Err(StlError::from(err).into());
            }
            log::debug!("STL written to {}", path.display());
            Ok(value)
        }
        Err(err) => {
            discard_partial(&partial);
            Err(err)
        }
    }
}

fn write_partial<T, E, F>(
    partial: &Path,
    header: StlHeader,
    write: F,
) -> core::result::Result<(T, u32), E>
where
    E: From<StlError>,
    F: FnOnce(&mut StlWriter<BufWriter<File>>) -> core::result::Result<T, E>,
{
    let file = File::create(partial).map_err(StlError::from)?;
    let mut writer = StlWriter::with_header(BufWriter::new(file), header)?;
    let value = write(&mut writer)?;
    let count = writer.finish()?;
    Ok((value, count))
}

fn discard_partial(partial: &Path) {
    if let Err(err) = std::fs::remove_file(partial) {
        if err.kind() != std::io::ErrorKind::NotFound {
            log::warn!("could not remove {}: {}", partial.display(), err);
        }
    }
}
