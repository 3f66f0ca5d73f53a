//! Bounded chunked file reading
//!
//! A file is read through one reusable buffer; each call hands out the
//! next slice of at most `chunk_size` bytes. The handle lives exactly as
//! long as the reader and is closed when it drops, on success or error.

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::{DirHashError, IoResultExt, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Sequential chunk reader over one file
pub struct ChunkReader {
    path: PathBuf,
    file: File,
    buffer: Vec<u8>,
    bytes_read: u64,
}

impl ChunkReader {
    /// Open `path` with the default chunk size
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    /// Open `path` reading at most `chunk_size` bytes per chunk
    pub fn with_chunk_size(path: &Path, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DirHashError::config("Chunk size must be greater than zero"));
        }
        let file = File::open(path).with_path(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            buffer: vec![0u8; chunk_size],
            bytes_read: 0,
        })
    }

    /// Next chunk of the file, or `None` at end of file
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        let n = loop {
            match self.file.read(&mut self.buffer) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DirHashError::io(&self.path, e)),
            }
        };

        if n == 0 {
            return Ok(None);
        }
        self.bytes_read += n as u64;
        Ok(Some(&self.buffer[..n]))
    }

    /// Bytes handed out so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Feed every chunk of `path` to `f`, returning the number of bytes read
pub fn for_each_chunk<F>(path: &Path, chunk_size: usize, mut f: F) -> Result<u64>
where
    F: FnMut(&[u8]),
{
    let mut reader = ChunkReader::with_chunk_size(path, chunk_size)?;
    while let Some(chunk) = reader.next_chunk()? {
        f(chunk);
    }
    Ok(reader.bytes_read())
}
