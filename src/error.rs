// Error types shared by the Ogg and Opus decoders

use std::io;
use thiserror::Error;

/// Errors produced while decoding an Ogg Opus stream.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying reader failed or ran out of bytes while a fixed or
    /// length-prefixed field was expected.
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),

    /// The bytes were read but do not describe a valid page or header.
    #[error("format error: {0}")]
    Format(String),
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// True for errors raised by a structural violation rather than I/O.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
