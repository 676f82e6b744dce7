//! Error types for the core store.

use crate::key::{KeyPath, PathError};

/// Errors raised by path-based store operations.
///
/// Key-based operations on a [`Node`](crate::Node) never fail; only dotted
/// path traversal and conversions from foreign data can.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Path parsing error.
    #[error("{0}")]
    Path(#[from] PathError),

    /// A path walked through a value that is not a namespace.
    #[error("cannot descend into '{path}': it holds {found}, not a namespace")]
    NotANamespace { path: KeyPath, found: &'static str },

    /// Invalid path for an operation.
    #[error("invalid path: {message}")]
    InvalidPath { message: String },

    /// Data offered as a mapping was something else.
    #[error("expected a mapping, found {found}")]
    NotAMapping { found: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypath;
    use std::error::Error as StdError;

    #[test]
    fn not_a_namespace_display() {
        let e = Error::NotANamespace {
            path: keypath!("one"),
            found: "an integer",
        };
        let display = e.to_string();
        assert!(display.contains("'one'"));
        assert!(display.contains("an integer"));
    }

    #[test]
    fn invalid_path_display() {
        let e = Error::InvalidPath {
            message: "bad path".to_string(),
        };
        assert_eq!(e.to_string(), "invalid path: bad path");
    }

    #[test]
    fn path_error_conversion() {
        let path_err = PathError::EmptyComponent {
            path: "a..b".to_string(),
            position: 1,
        };
        let e: Error = path_err.into();
        assert!(matches!(e, Error::Path(_)));
        assert!(StdError::source(&e).is_some());
        assert!(e.to_string().contains("a..b"));
    }

    #[test]
    fn not_a_mapping_display() {
        let e = Error::NotAMapping { found: "a string" };
        assert_eq!(e.to_string(), "expected a mapping, found a string");
    }
}
