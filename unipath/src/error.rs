//! Error types for the unipath library.
//!
//! This module provides the error hierarchy for all path operations,
//! using `thiserror` for ergonomic error handling.

use std::io;

use thiserror::Error;

/// Result type alias for operations that may fail with a unipath error.
///
/// # Examples
///
/// ```
/// use unipath::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the unipath library.
///
/// The taxonomy has three layers:
/// - [`Error::InvalidPathInput`]: a bad argument at a construction boundary.
/// - [`Error::NoRelativePath`] / [`Error::RealPath`]: a semantic
///   impossibility (no relative representation across drives, no real path
///   for a missing file).
/// - [`Error::Io`]: an underlying filesystem failure, wrapped with the
///   attempted action and path for context.
///
/// Read-only informational accessors (`exists`, `list` on a missing
/// directory, version lookup) never produce an error; absence maps to a
/// neutral value instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be turned into a path string.
    #[error("invalid path input: {reason}")]
    InvalidPathInput {
        /// Why the input was rejected.
        reason: String,
    },

    /// No relative path exists between two paths.
    ///
    /// On a drive-letter filesystem this happens when the paths live on
    /// different drives.
    #[error("no relative path from {base} to {target}")]
    NoRelativePath {
        /// The base the relative path was computed against.
        base: String,
        /// The path that could not be expressed relative to the base.
        target: String,
    },

    /// A path could not be resolved to its real (symlink-free) form.
    #[error("cannot resolve real path of {path}: {reason}")]
    RealPath {
        /// The path that failed to resolve.
        path: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("{action} {path}: {source}")]
    Io {
        /// The operation that was attempted (e.g. `"remove"`, `"copy"`).
        action: &'static str,
        /// The path the operation was attempted on.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with operation context.
    pub(crate) fn io(action: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Check if this error wraps a not-found filesystem failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use unipath::intern;
    ///
    /// let missing = intern("/no/such/directory/anywhere");
    /// let err = missing.size().unwrap_err();
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }

    /// Check if this error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied
        )
    }
}
