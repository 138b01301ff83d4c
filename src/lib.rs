//! Opusinfo - Ogg page and Opus header decoding
//!
//! Reads the identification and comment headers at the start of an Ogg Opus
//! stream without decoding any audio.
//!
//! ```no_run
//! use opusinfo::{OpusMetadata, ReadOptions};
//!
//! let meta = OpusMetadata::read_path("song.opus", &ReadOptions::default())?;
//! println!("{} channels, title {:?}", meta.channels, meta.comment("TITLE"));
//! # Ok::<(), opusinfo::Error>(())
//! ```

pub mod error;
pub mod field_mapping;
pub mod ogg;
pub mod opus;
pub mod utils;

pub use error::{Error, Result};
pub use field_mapping::Recording;
pub use ogg::OggPage;
pub use opus::{OpusHead, OpusMetadata, OpusTags, ReadOptions};
