//! The `source` module provides random access to the bytes being viewed.
//!
//! A [`ByteSource`] never hands out more than the caller asked for and never
//! reads past the size captured when it was opened, so the rest of the engine
//! can page through files far larger than memory.

use crate::error::{FileAccessErrorKind, ViewerError};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::info;

/// Largest supported file: 2^48 bytes (256 TiB)
pub const MAX_FILE_SIZE: u64 = 1 << 48;

/// Random-access, read-only view of a byte sequence.
pub trait ByteSource {
    /// Length in bytes, fixed for the lifetime of the source.
    fn size(&self) -> u64;

    /// Fill `buf` with bytes starting at `offset`.
    ///
    /// Returns the number of bytes read. The count is smaller than `buf.len()`
    /// only when the end of the source is reached; `offset >= size()` yields 0.
    ///
    /// # Errors
    /// Returns [`ViewerError::Read`] if the underlying storage fails.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, ViewerError>;

    /// Read up to `length` bytes at `offset` into a fresh vector.
    ///
    /// # Errors
    /// Same as [`ByteSource::read_at`].
    #[allow(clippy::cast_possible_truncation)]
    fn read(&mut self, offset: u64, length: usize) -> Result<Vec<u8>, ViewerError> {
        let available = self.size().saturating_sub(offset).min(length as u64) as usize;
        let mut buf = vec![0; available];
        let count = self.read_at(offset, &mut buf)?;
        buf.truncate(count);
        Ok(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, ViewerError> {
        (**self).read_at(offset, buf)
    }
}

/// A file on disk, opened read-only.
#[derive(Debug)]
pub struct FileSource {
    file: File,
    size: u64,
}

impl FileSource {
    /// Open `path` for viewing and capture its size.
    ///
    /// # Errors
    /// Returns [`ViewerError::FileAccess`] if the path does not exist, cannot be read,
    /// is a directory, or is larger than [`MAX_FILE_SIZE`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        let path = path.as_ref().to_path_buf();

        let meta = std::fs::metadata(&path).map_err(|e| ViewerError::from_open(path.clone(), &e))?;
        if meta.is_dir() {
            return Err(ViewerError::FileAccess {
                path,
                kind: FileAccessErrorKind::IsDirectory,
            });
        }

        let mut file = File::open(&path).map_err(|e| ViewerError::from_open(path.clone(), &e))?;

        // Block devices report a zero length in their metadata
        let size = if meta.is_file() {
            meta.len()
        } else {
            file.seek(SeekFrom::End(0))
                .map_err(|e| ViewerError::from_open(path.clone(), &e))?
        };

        if size > MAX_FILE_SIZE {
            return Err(ViewerError::FileAccess {
                path,
                kind: FileAccessErrorKind::TooLarge(size),
            });
        }

        info!(path = %path.display(), size, "opened file");

        Ok(Self { file, size })
    }
}

impl ByteSource for FileSource {
    fn size(&self) -> u64 {
        self.size
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, ViewerError> {
        if offset >= self.size {
            return Ok(0);
        }
        let want = (self.size - offset).min(buf.len() as u64) as usize;

        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|source| ViewerError::Read { offset, source })?;

        let mut filled = 0;
        while filled < want {
            match self.file.read(&mut buf[filled..want]) {
                // The file shrank after it was opened
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(ViewerError::Read {
                        offset: offset + filled as u64,
                        source,
                    });
                }
            }
        }

        Ok(filled)
    }
}

/// An in-memory byte buffer. Handy for tests and for piping small inputs.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl ByteSource for MemorySource {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, ViewerError> {
        if offset >= self.size() {
            return Ok(0);
        }
        let start = offset as usize;
        let count = buf.len().min(self.data.len() - start);
        buf[..count].copy_from_slice(&self.data[start..start + count]);
        Ok(count)
    }
}
