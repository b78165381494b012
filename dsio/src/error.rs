//! Error types for dataset I/O

use dsio_core::{DataType, DsioError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for dataset I/O operations
pub type Result<T> = std::result::Result<T, Error>;

/// What was wrong with an artifact's or a buffer's contents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Malformed metadata header
    #[error("{0}")]
    Header(#[from] DsioError),

    /// A text row whose token count differs from the first row
    #[error("line {line}: expected {expected} values, found {found}")]
    InconsistentRow {
        /// 1-based line number in the artifact
        line: usize,
        /// Token count of the first row
        expected: usize,
        /// Token count of this row
        found: usize,
    },

    /// A text token that does not parse as the requested element type
    #[error("line {line}: cannot parse {token:?} as {data_type}")]
    InvalidToken {
        /// 1-based line number in the artifact
        line: usize,
        /// The offending token
        token: String,
        /// Requested element type
        data_type: DataType,
    },

    /// A buffer whose length does not match its declared shape
    #[error("shape {rows}x{cols} needs {expected} elements, buffer holds {found}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },

    /// Caller-supplied dimension disagrees with the loaded one
    #[error("{dimension}: expected {expected}, found {found}")]
    ShapeConflict {
        /// `"rows"` or `"cols"`
        dimension: &'static str,
        expected: usize,
        found: usize,
    },

    /// Text artifact is not valid UTF-8
    #[error("content is not valid UTF-8")]
    NotUtf8,

    /// Neither the binary nor the text sniffer recognized the file
    #[error("not a binary dataset or numeric text")]
    Unrecognized,
}

/// Errors that can occur during dataset I/O
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or mismatched artifact contents
    #[error("format error in {}: {kind}", artifact.display())]
    Format {
        /// Artifact that failed to decode
        artifact: PathBuf,
        kind: FormatError,
    },

    /// In-memory data that cannot form a dataset
    #[error("invalid dataset: {0}")]
    InvalidDataset(FormatError),

    /// Required shape information was not supplied and no metadata exists
    #[error("configuration error for {}: {reason}", path.display())]
    Configuration {
        path: PathBuf,
        reason: &'static str,
    },

    /// Payload holds fewer bytes than the declared shape needs
    #[error(
        "truncated payload {}: expected {expected} bytes, found {actual}",
        path.display()
    )]
    TruncatedData {
        path: PathBuf,
        /// Bytes required by rows * cols * element size
        expected: u64,
        /// Bytes present on disk
        actual: u64,
    },

    /// Typed load requested a different element type than stored
    #[error("data type mismatch: expected {expected}, found {found}")]
    DataTypeMismatch {
        expected: DataType,
        found: DataType,
    },

    /// Underlying I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn format(artifact: &Path, kind: impl Into<FormatError>) -> Self {
        Error::Format {
            artifact: artifact.to_path_buf(),
            kind: kind.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this is a [`Error::Format`] or [`Error::InvalidDataset`]
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. } | Error::InvalidDataset(_))
    }

    /// The format problem, if this is a format error
    pub fn format_kind(&self) -> Option<&FormatError> {
        match self {
            Error::Format { kind, .. } | Error::InvalidDataset(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Attach the artifact path to `std::io` results
pub(crate) trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| Error::io(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_artifact() {
        let err = Error::format(Path::new("data.bin.meta"), DsioError::TagMismatch);
        let msg = err.to_string();
        assert!(msg.contains("data.bin.meta"));
        assert!(msg.contains("BINARY"));
        assert!(err.is_format());
        assert_eq!(
            err.format_kind(),
            Some(&FormatError::Header(DsioError::TagMismatch))
        );
    }

    #[test]
    fn test_truncated_display() {
        let err = Error::TruncatedData {
            path: PathBuf::from("points.bin"),
            expected: 24,
            actual: 20,
        };
        assert_eq!(
            err.to_string(),
            "truncated payload points.bin: expected 24 bytes, found 20"
        );
        assert!(!err.is_format());
    }

    #[test]
    fn test_io_context() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.at_path(Path::new("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path == Path::new("missing.txt")));
    }
}
