use std::io::Read;

use log::debug;

use crate::error::{Error, Result};
use crate::ogg::{
    crc, OGG_HEADER_TYPE_BOS, OGG_HEADER_TYPE_CONTINUATION, OGG_HEADER_TYPE_EOS,
    OGG_PAGE_HEADER_SIZE, OGG_SIGNATURE, OGG_VERSION,
};
use crate::utils::ByteCursor;

/// A single Ogg page
///
/// Pages are only produced by [`OggPage::read`], either fully valid or not at
/// all.
#[derive(Debug, Clone, PartialEq)]
pub struct OggPage {
    /// Page payload, `segment_table` lacing values summed.
    pub data: Vec<u8>,
    pub granule_position: i64,
    pub serial_number: u32,
    pub sequence_number: u32,
    /// Checksum as transmitted. Not checked by `read`.
    pub checksum: u32,
    /// Payload continues a packet started on an earlier page.
    pub continued: bool,
    pub first_page: bool,
    pub last_page: bool,
    /// The last packet on this page ends here instead of spilling over.
    pub complete: bool,
    pub(crate) header_type: u8,
    pub segment_table: Vec<u8>,
}

impl OggPage {
    /// Read the next page from `reader`.
    ///
    /// Consumes exactly the 27 header bytes, the segment table and the payload.
    /// Nothing is buffered past the end of the page.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        //  0                   1                   2                   3
        //  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1| Byte
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // | capture_pattern: Magic number for page start "OggS"           | 0-3
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // | version       | header_type   | granule_position              | 4-7
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                                                               | 8-11
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                               | bitstream_serial_number       | 12-15
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                               | page_sequence_number          | 16-19
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                               | CRC_checksum                  | 20-23
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                               |page_segments  | segment_table | 24-27
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        let mut cursor = ByteCursor::new(reader);

        let capture_pattern = cursor.read_array::<4>();
        let version = cursor.read_u8();
        let header_type = cursor.read_u8();
        let granule_position = cursor.read_u64() as i64;
        let serial_number = cursor.read_u32();
        let sequence_number = cursor.read_u32();
        let checksum = cursor.read_u32();
        let segment_count = cursor.read_u8();
        cursor.check()?;

        if &capture_pattern != OGG_SIGNATURE {
            return Err(Error::format("not an Ogg page"));
        }
        if version != OGG_VERSION {
            return Err(Error::format("unsupported version"));
        }

        let segment_table = cursor.read_bytes(segment_count as usize);
        cursor.check()?;

        let data_size: usize = segment_table.iter().map(|&x| x as usize).sum();
        let data = cursor.read_bytes(data_size);
        cursor.check()?;

        // An empty segment table carries an empty, finished payload.
        let complete = segment_table.last().map_or(true, |&last| last < 255);

        debug!(
            "ogg page seq={} serial={} size={} complete={}",
            sequence_number, serial_number, data_size, complete
        );

        Ok(OggPage {
            data,
            granule_position,
            serial_number,
            sequence_number,
            checksum,
            continued: header_type & OGG_HEADER_TYPE_CONTINUATION != 0,
            first_page: header_type & OGG_HEADER_TYPE_BOS != 0,
            last_page: header_type & OGG_HEADER_TYPE_EOS != 0,
            complete,
            header_type,
            segment_table,
        })
    }

    /// Total size of the page as it appeared in the stream.
    pub fn size(&self) -> usize {
        OGG_PAGE_HEADER_SIZE + self.segment_table.len() + self.data.len()
    }

    /// Recompute the checksum over the header, segment table and payload.
    pub fn compute_checksum(&self) -> u32 {
        let mut header = [0u8; OGG_PAGE_HEADER_SIZE];
        header[0..4].copy_from_slice(OGG_SIGNATURE);
        header[4] = OGG_VERSION;
        header[5] = self.header_type;
        header[6..14].copy_from_slice(&self.granule_position.to_le_bytes());
        header[14..18].copy_from_slice(&self.serial_number.to_le_bytes());
        header[18..22].copy_from_slice(&self.sequence_number.to_le_bytes());
        // 22..26 is the checksum field, zero while computing.
        header[26] = self.segment_table.len() as u8;

        crc::checksum(&[&header, &self.segment_table, &self.data])
    }

    /// Compare the transmitted checksum against the page contents.
    pub fn verify_checksum(&self) -> Result<()> {
        let computed = self.compute_checksum();
        if computed != self.checksum {
            return Err(Error::format(format!(
                "checksum mismatch on page {}: expected 0x{:08x}, got 0x{:08x}",
                self.sequence_number, self.checksum, computed
            )));
        }
        Ok(())
    }
}
