// Ogg container support
//
// OGG Page Structure:
// - OGG Page Header (27 bytes)
//   - Capture Pattern: "OggS" (4 bytes)
//   - Version: 0 (1 byte)
//   - Header Type: 1=continuation, 2=bos, 4=eos (1 byte)
//   - Granule Position (8 bytes)
//   - Bitstream Serial Number (4 bytes)
//   - Page Sequence Number (4 bytes)
//   - CRC Checksum (4 bytes)
//   - Number of Page Segments (1 byte)
// - Segment Table (one lacing value per segment)
// - Payload (sum of lacing values)
//
// A lacing value of 255 means the packet continues in the next segment,
// possibly on the next page. Anything smaller ends the packet.

pub mod crc;
pub mod page;

pub use page::OggPage;

// OGG signature
pub const OGG_SIGNATURE: &[u8; 4] = b"OggS";
pub const OGG_VERSION: u8 = 0;
pub const OGG_PAGE_HEADER_SIZE: usize = 27;

// OGG page header types
pub const OGG_HEADER_TYPE_CONTINUATION: u8 = 0x01;
pub const OGG_HEADER_TYPE_BOS: u8 = 0x02; // Beginning of Stream
pub const OGG_HEADER_TYPE_EOS: u8 = 0x04; // End of Stream
