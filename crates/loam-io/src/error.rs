//! Error types for parameter persistence.

use std::fmt;
use std::io;

use loam_tensor::Dim;

/// Errors that can occur while saving or loading parameters.
#[derive(Debug)]
pub enum IoError {
    /// An I/O error occurred on the underlying stream.
    Io(io::Error),
    /// A record could not be parsed (truncated or corrupt data).
    MalformedRecord {
        /// 1-based line number where parsing failed.
        line: u64,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A record names a parameter that does not exist in the receiving
    /// collection.
    NameMismatch {
        /// The unmatched name from the stream.
        name: String,
    },
    /// A record's shape differs from the existing parameter's shape.
    ShapeMismatch {
        /// The parameter name.
        name: String,
        /// Shape of the existing parameter.
        expected: Dim,
        /// Shape carried by the record.
        found: Dim,
    },
    /// A collection parameter under the requested key received no record.
    MissingParameter {
        /// The unfilled parameter's name.
        name: String,
    },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedRecord { line, detail } => {
                write!(f, "malformed record at line {line}: {detail}")
            }
            Self::NameMismatch { name } => {
                write!(f, "no parameter named '{name}' in the receiving collection")
            }
            Self::ShapeMismatch {
                name,
                expected,
                found,
            } => {
                write!(
                    f,
                    "shape mismatch for '{name}': collection has {expected}, stream has {found}"
                )
            }
            Self::MissingParameter { name } => {
                write!(f, "parameter '{name}' was not present in the stream")
            }
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
