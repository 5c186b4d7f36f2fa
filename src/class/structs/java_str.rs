use std::sync::Arc;

use cesu8_str::java as cesu8_java;

/// Decodes the payload of a Utf8 constant.
///
/// Class files store text as Java modified UTF-8: supplementary characters
/// are surrogate pairs encoded separately and NUL is the overlong `C0 80`.
/// Payloads that are not modified UTF-8 but are standard UTF-8 (4-byte
/// sequences, raw NUL) are accepted as such. Returns `None` when `bytes` is
/// neither.
pub(crate) fn decode_java_utf8(bytes: &[u8]) -> Option<Arc<str>> {
    if let Ok(java_str) = cesu8_java::JavaStr::from_java_cesu8(bytes) {
        return Some(Arc::from(cesu8_java::from_java_cesu8(java_str)));
    }
    std::str::from_utf8(bytes).ok().map(Arc::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(decode_java_utf8(b"java/lang/Object").as_deref(), Some("java/lang/Object"));
        assert_eq!(decode_java_utf8(b"").as_deref(), Some(""));
    }

    #[test]
    fn test_two_byte_sequence() {
        assert_eq!(decode_java_utf8(&[0x63, 0x61, 0x66, 0xc3, 0xa9]).as_deref(), Some("café"));
    }

    #[test]
    fn test_overlong_nul() {
        assert_eq!(decode_java_utf8(&[0x61, 0xc0, 0x80, 0x62]).as_deref(), Some("a\0b"));
    }

    #[test]
    fn test_surrogate_pair() {
        let bytes = [0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80];
        assert_eq!(decode_java_utf8(&bytes).as_deref(), Some("\u{1F600}"));
    }

    #[test]
    fn test_standard_utf8_fallback() {
        assert_eq!(
            decode_java_utf8(&[0xf0, 0x9f, 0x98, 0x80]).as_deref(),
            Some("\u{1F600}")
        );
        assert_eq!(decode_java_utf8(&[0x61, 0x00, 0x62]).as_deref(), Some("a\0b"));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(decode_java_utf8(&[0xff]), None);
        assert_eq!(decode_java_utf8(&[0x41, 0xc3]), None);
        assert_eq!(decode_java_utf8(&[0x80, 0x41]), None);
    }
}
