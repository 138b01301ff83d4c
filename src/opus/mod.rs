// OPUS format support (in OGG container)
//
// OPUS File Structure:
// - Identification header: "OpusHead" (8 bytes), alone on the first page
// - Comment header: "OpusTags" (8 bytes) followed by a Vorbis comment, starting
//   on the second page and possibly spanning many pages
// - Audio data pages
//
// Reference:
// - RFC 7845: Ogg Encapsulation for the Opus Audio Codec

pub mod head;
pub mod tags;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::ogg::OggPage;

pub use head::OpusHead;
pub use tags::OpusTags;

pub const OPUS_HEAD_SIGNATURE: &[u8; 8] = b"OpusHead";
pub const OPUS_TAGS_SIGNATURE: &[u8; 8] = b"OpusTags";
pub const OPUS_VERSION: u8 = 1;

/// Default bound on the accumulated comment header size.
pub const DEFAULT_MAX_COMMENT_SIZE: usize = 16 * 1024 * 1024;

/// Decoding options
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Check each page's CRC-32 before using its payload.
    pub verify_checksum: bool,
    /// Largest comment header accepted, in bytes.
    pub max_comment_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            verify_checksum: false,
            max_comment_size: DEFAULT_MAX_COMMENT_SIZE,
        }
    }
}

/// Stream parameters and tags of an Ogg Opus file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpusMetadata {
    pub channels: u8,
    pub pre_skip: u16,
    pub sample_rate: u32,
    pub output_gain_db: f64,
    pub mapping_family: u8,
    pub vendor: String,
    pub comments: BTreeMap<String, String>,
}

impl OpusMetadata {
    pub fn new(head: OpusHead, tags: OpusTags) -> Self {
        OpusMetadata {
            channels: head.channels,
            pre_skip: head.pre_skip,
            sample_rate: head.sample_rate,
            output_gain_db: head.output_gain_db,
            mapping_family: head.mapping_family,
            vendor: tags.vendor,
            comments: tags.comments,
        }
    }

    /// Decode the headers at the start of an Ogg Opus stream.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Self::read_with(reader, &ReadOptions::default())
    }

    /// Decode with explicit options.
    ///
    /// Reads the identification page, then pulls pages until the comment
    /// packet is complete. No audio pages are touched.
    pub fn read_with<R: Read>(reader: &mut R, options: &ReadOptions) -> Result<Self> {
        let page = next_page(reader, options)?;
        if !page.first_page || !page.complete {
            return Err(Error::format("invalid identification header page"));
        }
        let head = OpusHead::read(&page.data)?;
        debug!(
            "opus head: {} channels, {} Hz, pre-skip {}",
            head.channels, head.sample_rate, head.pre_skip
        );

        let mut acc = TagsAccumulator::new(page.serial_number, options.max_comment_size);
        let packet = loop {
            let page = next_page(reader, options)?;
            match acc.push(page)? {
                Accumulation::Pending(next) => acc = next,
                Accumulation::Complete(packet) => break packet,
            }
        };
        let tags = OpusTags::read(&packet)?;

        Ok(OpusMetadata::new(head, tags))
    }

    /// Open `path` and decode its headers.
    pub fn read_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        Self::read_with(&mut reader, options)
    }

    /// Case-insensitive comment lookup.
    pub fn comment(&self, key: &str) -> Option<&str> {
        self.comments.get(&key.to_uppercase()).map(String::as_str)
    }
}

fn next_page<R: Read>(reader: &mut R, options: &ReadOptions) -> Result<OggPage> {
    let page = OggPage::read(reader)?;
    if options.verify_checksum {
        if let Err(e) = page.verify_checksum() {
            warn!("{}", e);
            return Err(e);
        }
    }
    Ok(page)
}

/// Comment packet bytes gathered so far
///
/// Passed by value through the page loop; each pushed page either yields the
/// next accumulator or the finished packet.
#[derive(Debug)]
pub struct TagsAccumulator {
    serial_number: u32,
    max_size: usize,
    data: Vec<u8>,
    pages: u32,
}

/// Result of feeding one page to a [`TagsAccumulator`]
#[derive(Debug)]
pub enum Accumulation {
    Pending(TagsAccumulator),
    Complete(Vec<u8>),
}

impl TagsAccumulator {
    /// Start accumulating for the logical stream `serial_number`.
    pub fn new(serial_number: u32, max_size: usize) -> Self {
        TagsAccumulator {
            serial_number,
            max_size,
            data: Vec::new(),
            pages: 0,
        }
    }

    pub fn push(mut self, page: OggPage) -> Result<Accumulation> {
        if page.serial_number != self.serial_number {
            return Err(Error::format(
                "interleaved logical bitstreams are not supported",
            ));
        }
        if self.data.len() + page.data.len() > self.max_size {
            return Err(Error::format("comment header too large"));
        }

        self.data.extend_from_slice(&page.data);
        self.pages += 1;

        if page.complete {
            debug!(
                "opus tags: {} bytes over {} page(s)",
                self.data.len(),
                self.pages
            );
            Ok(Accumulation::Complete(self.data))
        } else {
            Ok(Accumulation::Pending(self))
        }
    }

    /// Pages consumed so far.
    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
