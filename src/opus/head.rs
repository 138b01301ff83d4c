// Opus identification header ("OpusHead")

use serde::Serialize;

use crate::error::{Error, Result};
use crate::opus::{OPUS_HEAD_SIGNATURE, OPUS_VERSION};
use crate::utils::ByteCursor;

/// Fixed fields of the identification header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpusHead {
    pub channels: u8,
    /// Samples to drop from the start of the decoded output.
    pub pre_skip: u16,
    /// Sample rate of the original input; informational only.
    pub sample_rate: u32,
    /// Output gain in dB (Q7.8 on the wire).
    pub output_gain_db: f64,
    /// 0 = mono/stereo, 1 = Vorbis channel order, 255 = unspecified.
    pub mapping_family: u8,
}

impl OpusHead {
    /// Parse the identification header from a complete first-page payload.
    ///
    /// Bytes past the fixed 19-byte layout (the channel mapping table) are
    /// ignored.
    pub fn read(data: &[u8]) -> Result<Self> {
        //  0                   1                   2                   3
        //  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |      'O'      |      'p'      |      'u'      |      's'      | 0-3
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |      'H'      |      'e'      |      'a'      |      'd'      | 4-7
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |  Version = 1  | Channel Count |           Pre-skip            | 8-11
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                     Input Sample Rate (Hz)                    | 12-15
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |   Output Gain (Q7.8 in dB)    | Mapping Family|               | 16-19
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+               :
        // :               Optional Channel Mapping Table...               :
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        let mut cursor = ByteCursor::new(data);

        let signature = cursor.read_array::<8>();
        let version = cursor.read_u8();
        let channels = cursor.read_u8();
        let pre_skip = cursor.read_u16();
        let sample_rate = cursor.read_u32();
        let output_gain = cursor.read_u16() as i16;
        let mapping_family = cursor.read_u8();
        cursor.check()?;

        if &signature != OPUS_HEAD_SIGNATURE {
            return Err(Error::format("expected magic signature 'OpusHead'"));
        }
        if version != OPUS_VERSION {
            return Err(Error::format(format!("unsupported Opus version {}", version)));
        }
        if channels == 0 {
            return Err(Error::format("invalid channel count 0"));
        }

        Ok(OpusHead {
            channels,
            pre_skip,
            sample_rate,
            output_gain_db: gain_to_db(output_gain),
            mapping_family,
        })
    }
}

/// Convert a Q7.8 fixed-point gain to dB.
pub fn gain_to_db(raw: i16) -> f64 {
    f64::from(raw) / 256.0
}
