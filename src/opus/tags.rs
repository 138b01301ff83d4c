// Opus comment header ("OpusTags")
//
// Same layout as a Vorbis comment, prefixed with the 8-byte signature.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::opus::OPUS_TAGS_SIGNATURE;
use crate::utils::encoding::decode_utf8;
use crate::utils::ByteCursor;

/// Vendor string and user comments
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpusTags {
    pub vendor: String,
    /// Comment values keyed by uppercased field name.
    pub comments: BTreeMap<String, String>,
}

impl OpusTags {
    /// Parse the comment header from the concatenated packet bytes.
    ///
    /// Entries without a `=` are skipped. A repeated key keeps the value of
    /// its last occurrence.
    pub fn read(data: &[u8]) -> Result<Self> {
        //  0                   1                   2                   3
        //  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |      'O'      |      'p'      |      'u'      |      's'      |
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |      'T'      |      'a'      |      'g'      |      's'      |
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                     Vendor String Length                      |
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // :                        Vendor String...                       :
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                   User Comment List Length                    |
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // |                 User Comment #0 String Length                 |
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // :                   User Comment #0 String...                   :
        // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
        // :                                                               :
        let mut cursor = ByteCursor::new(data);

        let signature = cursor.read_array::<8>();
        cursor.check()?;
        if &signature != OPUS_TAGS_SIGNATURE {
            return Err(Error::format("expected magic signature 'OpusTags'"));
        }

        let vendor_length = cursor.read_u32() as usize;
        let vendor = cursor.read_bytes(vendor_length);
        let comment_count = cursor.read_u32();
        cursor.check()?;

        let mut comments = BTreeMap::new();
        for index in 0..comment_count {
            let length = cursor.read_u32() as usize;
            let entry = cursor.read_bytes(length);
            if cursor.has_failed() {
                break;
            }

            match split_entry(&entry) {
                Some((key, value)) => {
                    comments.insert(key, value);
                }
                None => debug!("dropping comment #{} without '=' separator", index),
            }
        }
        cursor.check()?;

        Ok(OpusTags {
            vendor: decode_utf8(&vendor),
            comments,
        })
    }

    /// Case-insensitive comment lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.comments.get(&key.to_uppercase()).map(String::as_str)
    }
}

/// Split `KEY=VALUE` on the first `=`, uppercasing the key.
fn split_entry(entry: &[u8]) -> Option<(String, String)> {
    let pos = entry.iter().position(|&b| b == b'=')?;
    let key = decode_utf8(&entry[..pos]).to_uppercase();
    let value = decode_utf8(&entry[pos + 1..]);
    Some((key, value))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn tags_bytes(vendor: &str, entries: &[&str]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"OpusTags");
        data.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        data.extend_from_slice(vendor.as_bytes());
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        for entry in entries {
            data.extend_from_slice(&(entry.len() as u32).to_le_bytes());
            data.extend_from_slice(entry.as_bytes());
        }
        data
    }

    #[test]
    fn test_read_comments() {
        let data = tags_bytes("test", &["title=My Song", "Artist=Someone"]);
        let tags = OpusTags::read(&data).unwrap();
        assert_eq!(tags.vendor, "test");
        assert_eq!(tags.comments.len(), 2);
        assert_eq!(tags.comments["TITLE"], "My Song");
        assert_eq!(tags.get("artist"), Some("Someone"));
        assert_eq!(tags.get("album"), None);
    }

    #[test]
    fn test_entry_without_separator_is_dropped() {
        let tags = OpusTags::read(&tags_bytes("test", &["garbage", "ALBUM=Foo"])).unwrap();
        assert_eq!(tags.comments.len(), 1);
        assert_eq!(tags.get("ALBUM"), Some("Foo"));
    }

    #[test]
    fn test_split_on_first_separator() {
        let tags = OpusTags::read(&tags_bytes("v", &["COMMENT=a=b", "EMPTY="])).unwrap();
        assert_eq!(tags.get("COMMENT"), Some("a=b"));
        assert_eq!(tags.get("EMPTY"), Some(""));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let tags = OpusTags::read(&tags_bytes("v", &["ARTIST=A", "artist=B"])).unwrap();
        assert_eq!(tags.comments.len(), 1);
        assert_eq!(tags.get("ARTIST"), Some("B"));
    }

    #[test]
    fn test_no_comments() {
        let tags = OpusTags::read(&tags_bytes("libopus 1.4", &[])).unwrap();
        assert_eq!(tags.vendor, "libopus 1.4");
        assert!(tags.comments.is_empty());
    }

    #[test]
    fn test_bad_signature() {
        let mut data = tags_bytes("v", &[]);
        data[4..8].copy_from_slice(b"Head");
        assert!(OpusTags::read(&data).unwrap_err().is_format());
    }

    #[test]
    fn test_truncated_vendor() {
        let data = tags_bytes("a long vendor string", &[]);
        let err = OpusTags::read(&data[..16]).unwrap_err();
        assert!(matches!(err, Error::Stream(_)));
    }

    #[test]
    fn test_truncated_comment() {
        let data = tags_bytes("v", &["TITLE=Cut short"]);
        let err = OpusTags::read(&data[..data.len() - 3]).unwrap_err();
        assert!(matches!(err, Error::Stream(_)));
    }

    #[test]
    fn test_inflated_comment_count() {
        let mut data = tags_bytes("v", &["TITLE=x"]);
        // Claim far more entries than present.
        let count_at = 8 + 4 + 1;
        data[count_at..count_at + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = OpusTags::read(&data).unwrap_err();
        assert!(matches!(err, Error::Stream(_)));
    }

    #[test]
    fn test_non_utf8_value() {
        let mut data = tags_bytes("v", &[]);
        let entry = b"TITLE=\xFFok";
        let count_at = 8 + 4 + 1;
        data[count_at..count_at + 4].copy_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        data.extend_from_slice(entry);
        let tags = OpusTags::read(&data).unwrap();
        assert_eq!(tags.get("TITLE"), Some("\u{FFFD}ok"));
    }
}
