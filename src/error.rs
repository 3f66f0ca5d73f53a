//! Error types for dirhash
//!
//! Every failure in the pipeline is one of three kinds: a filesystem
//! problem while walking or reading, a bad configuration value (most
//! notably an unknown hash algorithm), or a usage problem handled by the
//! binary before the pipeline starts.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for filesystem failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for usage errors (missing directory argument)
pub const EXIT_USAGE: i32 = 1;

/// Exit status for configuration errors such as an unsupported algorithm
pub const EXIT_CONFIG: i32 = 2;

/// Main error type for dirhash operations
#[derive(Error, Debug)]
pub enum DirHashError {
    /// I/O error while opening or reading a file
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path does not exist
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Root path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory traversal failed (unreadable directory, loop, ...)
    #[error("Failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    /// Hash algorithm not supported
    #[error("Unsupported hash type: {0}")]
    UnsupportedHashAlgorithm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DirHashError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Convert a walkdir failure, keeping the offending path when known
    pub fn walk(root: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());

        match err.into_io_error() {
            Some(source) => Self::Io { path, source },
            None => Self::Walk {
                path,
                message: "filesystem loop detected".to_string(),
            },
        }
    }

    /// Check if this error comes from bad configuration rather than the filesystem
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedHashAlgorithm(_) | Self::ConfigError(_)
        )
    }

    /// Check if this error is a permission issue
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            EXIT_CONFIG
        } else {
            EXIT_FAILURE
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. }
            | Self::NotFound(path)
            | Self::NotADirectory(path)
            | Self::Walk { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for dirhash operations
pub type Result<T> = std::result::Result<T, DirHashError>;

impl From<std::io::Error> for DirHashError {
    fn from(err: std::io::Error) -> Self {
        DirHashError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DirHashError {
    fn from(err: serde_json::Error) -> Self {
        DirHashError::ConfigError(format!("JSON encoding failed: {}", err))
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| DirHashError::io(path, e))
    }
}
