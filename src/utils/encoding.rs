// Text decoding for comment header strings

use encoding_rs::UTF_8;

/// Decode UTF-8 text, replacing invalid sequences with U+FFFD.
///
/// Vendor strings and comment values are declared UTF-8 by the format; they
/// are not validated beyond what decoding already does.
pub fn decode_utf8(data: &[u8]) -> String {
    UTF_8.decode_without_bom_handling(data).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_utf8("Sigur Rós".as_bytes()), "Sigur Rós");
        assert_eq!(decode_utf8(b""), "");
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        assert_eq!(decode_utf8(b"ab\xFFcd"), "ab\u{FFFD}cd");
    }

    #[test]
    fn test_bom_is_kept() {
        assert_eq!(decode_utf8(b"\xEF\xBB\xBFx"), "\u{FEFF}x");
    }
}
