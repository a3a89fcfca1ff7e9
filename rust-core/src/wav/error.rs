//! Decoder error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for container decoding
pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    #[error("not a valid WAV file: {0}")]
    Format(String),

    #[error("unsupported WAV format: {0}")]
    UnsupportedFormat(String),

    #[error("truncated WAV file: {0}")]
    Truncated(String),
}

/// Coarse classification of a [`DecodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    Io,
    Format,
    UnsupportedFormat,
    Truncated,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::Io { .. } | DecodeError::Read(_) => DecodeErrorKind::Io,
            DecodeError::Format(_) => DecodeErrorKind::Format,
            DecodeError::UnsupportedFormat(_) => DecodeErrorKind::UnsupportedFormat,
            DecodeError::Truncated(_) => DecodeErrorKind::Truncated,
        }
    }

    /// Map an I/O error raised while reading `what`, turning an early end of
    /// stream into [`DecodeError::Truncated`]
    pub(crate) fn from_read(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::Truncated(format!("stream ended while reading {what}"))
        } else {
            DecodeError::Read(err)
        }
    }
}
