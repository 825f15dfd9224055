//! Input stream abstraction
//!
//! Workers never share a reader. Each one opens the input on its own and
//! seeks to its range, so an input only has to hand out independent
//! random-access readers.

use crate::error::{EngineError, Result};
use std::fs::{self, File};
use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;
use std::sync::Arc;

/// A readable, seekable byte stream owned by one worker
pub trait RangeRead: Read + Seek + Send {}

impl<T: Read + Seek + Send> RangeRead for T {}

/// The record stream to aggregate
#[derive(Clone)]
pub enum Input {
    /// File on disk, opened read-only by every worker
    File(PathBuf),
    /// In-memory buffer shared by every worker
    Bytes(Arc<[u8]>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
        }
    }
}

impl Input {
    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Input::Bytes(Arc::from(bytes.into()))
    }

    /// Total length of the stream in bytes
    pub fn len(&self) -> Result<u64> {
        match self {
            Input::File(path) => fs::metadata(path).map(|m| m.len()).map_err(|e| {
                EngineError::IoError(format!("Failed to get metadata for {path:?}: {e}"))
            }),
            Input::Bytes(bytes) => Ok(bytes.len() as u64),
        }
    }

    /// Whether the stream is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Open an independent reader positioned at offset 0
    pub fn open(&self) -> Result<Box<dyn RangeRead>> {
        match self {
            Input::File(path) => {
                let file = File::open(path).map_err(|e| {
                    EngineError::IoError(format!("Failed to open {path:?}: {e}"))
                })?;
                Ok(Box::new(file))
            }
            Input::Bytes(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::from_bytes(bytes)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::from_bytes(text.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::SeekFrom;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bytes_len_and_independent_readers() {
        let input = Input::from("line one\nline two\n");
        assert_eq!(input.len().unwrap(), 18);

        let mut first = input.open().unwrap();
        let mut second = input.open().unwrap();
        first.seek(SeekFrom::Start(9)).unwrap();

        let mut a = String::new();
        let mut b = String::new();
        first.read_to_string(&mut a).unwrap();
        second.read_to_string(&mut b).unwrap();

        assert_eq!(a, "line two\n");
        assert_eq!(b, "line one\nline two\n");
    }

    #[test]
    fn test_file_input() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), b"abc\n").unwrap();

        let input = Input::from_file(file.path());
        assert_eq!(input.len().unwrap(), 4);
        assert!(!input.is_empty().unwrap());
    }

    #[test]
    fn test_missing_file() {
        let input = Input::from_file("/nonexistent/stream.json");
        assert!(matches!(input.len(), Err(EngineError::IoError(_))));
        assert!(input.open().is_err());
    }

    #[test]
    fn test_debug_hides_bytes() {
        let debug = format!("{:?}", Input::from("secret"));
        assert_eq!(debug, "Bytes(\"<6 bytes>\")");
    }
}
