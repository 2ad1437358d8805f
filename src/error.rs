//! Error types
//!
//! `ServeError` covers everything that can go wrong while answering a single
//! request and maps each variant to exactly one status code. `StartupError`
//! covers the fatal conditions that stop the process before it serves anything.

use hyper::StatusCode;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Request handling error.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Path could not be decoded into something the file system understands.
    #[error("bad request path: {0}")]
    BadRequest(String),

    /// Path resolves outside the root directory.
    #[error("path escapes the root directory: {0}")]
    Forbidden(String),

    /// Directory exists but listing it is disabled.
    #[error("directory listing disabled: {0}")]
    ListingDisabled(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// File system failure other than a missing entry.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServeError {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// A missing entry is a 404; anything else (permission denied, read
    /// failure) is reported as an internal error.
    pub fn from_io(path: impl Into<PathBuf>, request_path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(request_path.to_string())
        } else {
            Self::Io {
                path: path.into(),
                source,
            }
        }
    }

    /// HTTP status code sent for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) | Self::ListingDisabled(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message shown in the error page.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad request path",
            Self::Forbidden(_) => "Path is outside the served directory",
            Self::ListingDisabled(_) => "Directory listing is disabled",
            Self::NotFound(_) => "File not found",
            Self::MethodNotAllowed(_) => "Only GET and HEAD are supported",
            Self::Io { .. } => "Failed to read from the served directory",
        }
    }
}

/// Fatal error raised before the accept loop starts.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("root directory '{}' is not accessible: {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root '{}' is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("failed to register signal handler: {0}")]
    Signal(#[source] std::io::Error),
}
