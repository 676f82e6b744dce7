//! Error types for file sources.

use std::io;
use std::path::PathBuf;

use crate::Format;

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// The source file does not exist.
    #[error("configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {} as {format}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: Format,
        message: String,
    },

    #[error("unsupported source format: {0}")]
    UnsupportedFormat(Format),

    /// The document parsed, but its top level is not a mapping.
    #[error("{}: top-level document must be a mapping, found {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },
}

impl SourceError {
    /// Check whether this is the "file does not exist" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }

    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SourceError::NotFound { path }
        } else {
            SourceError::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn not_found_from_io() {
        let err = SourceError::from_io(
            PathBuf::from("i_dont_exist.yml"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("i_dont_exist.yml"));
    }

    #[test]
    fn other_io_errors_keep_source() {
        let err = SourceError::from_io(
            PathBuf::from("locked.yml"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(StdError::source(&err).is_some());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn parse_error_display() {
        let err = SourceError::Parse {
            path: PathBuf::from("bad.json"),
            format: Format::JSON,
            message: "expected value".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("bad.json"));
        assert!(display.contains("application/json"));
        assert!(display.contains("expected value"));
    }
}
