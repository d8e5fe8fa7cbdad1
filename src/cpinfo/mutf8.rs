//! Modified UTF-8 as stored in CONSTANT_Utf8 entries (JVMS §4.4.7)
//!
//! Differs from standard UTF-8 in two ways: U+0000 is written as the two
//! bytes `C0 80`, and supplementary characters are written as a surrogate
//! pair, each half a three-byte sequence.

use super::error::{CpInfoError, CpInfoResult};

/// Largest encoded length a CONSTANT_Utf8 entry can carry
pub const MAX_ENCODED_LEN: usize = u16::MAX as usize;

/// Number of bytes `value` occupies in modified UTF-8
pub fn encoded_len(value: &str) -> usize {
    value.encode_utf16().map(unit_len).sum()
}

fn unit_len(unit: u16) -> usize {
    match unit {
        0x0001..=0x007F => 1,
        0x0000 | 0x0080..=0x07FF => 2,
        _ => 3,
    }
}

pub fn encode(value: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(value));
    for unit in value.encode_utf16() {
        match unit_len(unit) {
            1 => bytes.push(unit as u8),
            2 => {
                bytes.push(0xC0 | (unit >> 6) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                bytes.push(0xE0 | (unit >> 12) as u8);
                bytes.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    bytes
}

/// Encode for a CONSTANT_Utf8 entry, failing when the result exceeds u16 length
pub fn encode_bounded(value: &str) -> CpInfoResult<Vec<u8>> {
    let len = encoded_len(value);
    if len > MAX_ENCODED_LEN {
        return Err(CpInfoError::StringTooLong(len));
    }
    Ok(encode(value))
}

pub fn decode(bytes: &[u8]) -> CpInfoResult<String> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut offsets = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let (unit, width) = match lead {
            0x01..=0x7F => (lead as u16, 1),
            0xC0..=0xDF => {
                let b1 = continuation(bytes, i, 1)?;
                (((lead as u16 & 0x1F) << 6) | b1, 2)
            }
            0xE0..=0xEF => {
                let b1 = continuation(bytes, i, 1)?;
                let b2 = continuation(bytes, i, 2)?;
                (((lead as u16 & 0x0F) << 12) | (b1 << 6) | b2, 3)
            }
            // raw NUL and four-byte forms never appear in modified UTF-8
            _ => return Err(CpInfoError::InvalidModifiedUtf8 { offset: i }),
        };
        units.push(unit);
        offsets.push(i);
        i += width;
    }

    let mut decoded = String::with_capacity(units.len());
    for (position, result) in char::decode_utf16(units.iter().copied()).enumerate() {
        match result {
            Ok(c) => decoded.push(c),
            Err(_) => {
                // a lone surrogate; report the byte where its sequence starts
                let offset = unit_offset(&units, &offsets, position);
                return Err(CpInfoError::InvalidModifiedUtf8 { offset });
            }
        }
    }
    Ok(decoded)
}

fn continuation(bytes: &[u8], lead: usize, n: usize) -> CpInfoResult<u16> {
    match bytes.get(lead + n) {
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        _ => Err(CpInfoError::InvalidModifiedUtf8 { offset: lead }),
    }
}

/// Byte offset of the `position`-th decoded item; pairs count as one item
fn unit_offset(units: &[u16], offsets: &[usize], position: usize) -> usize {
    let mut item = 0;
    let mut u = 0;
    while u < units.len() {
        if item == position {
            return offsets[u];
        }
        let is_pair = (0xD800..0xDC00).contains(&units[u])
            && units.get(u + 1).map_or(false, |next| (0xDC00..0xE000).contains(next));
        u += if is_pair { 2 } else { 1 };
        item += 1;
    }
    offsets.last().copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_unchanged() {
        assert_eq!(encode("java/lang/Object"), b"java/lang/Object".to_vec());
        assert_eq!(decode(b"java/lang/Object").unwrap(), "java/lang/Object");
    }

    #[test]
    fn test_nul_uses_two_bytes() {
        assert_eq!(encode("a\0b"), vec![b'a', 0xC0, 0x80, b'b']);
        assert_eq!(decode(&[b'a', 0xC0, 0x80, b'b']).unwrap(), "a\0b");
        assert!(matches!(decode(&[b'a', 0x00]), Err(CpInfoError::InvalidModifiedUtf8 { offset: 1 })));
    }

    #[test]
    fn test_supplementary_uses_surrogate_pair() {
        let clef = "\u{1D11E}";
        let bytes = encode(clef);
        assert_eq!(bytes, vec![0xED, 0xA0, 0xB4, 0xED, 0xB4, 0x9E]);
        assert_eq!(encoded_len(clef), 6);
        assert_eq!(decode(&bytes).unwrap(), clef);
    }

    #[test]
    fn test_malformed_sequences() {
        assert!(matches!(decode(&[0xE2, 0x82]), Err(CpInfoError::InvalidModifiedUtf8 { offset: 0 })));
        assert!(matches!(decode(&[b'x', 0xF0, 0x9F, 0x98, 0x80]), Err(CpInfoError::InvalidModifiedUtf8 { offset: 1 })));
        // lone high surrogate
        assert!(matches!(decode(&[b'x', 0xED, 0xA0, 0xB4]), Err(CpInfoError::InvalidModifiedUtf8 { offset: 1 })));
    }

    #[test]
    fn test_length_limit() {
        let long = "x".repeat(MAX_ENCODED_LEN + 1);
        assert!(matches!(encode_bounded(&long), Err(CpInfoError::StringTooLong(65536))));
        assert!(encode_bounded(&long[1..]).is_ok());
    }
}
