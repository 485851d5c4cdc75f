//! Base-62 short links for recipes.
//!
//! A recipe id is written in base 62 using digits, then lowercase, then
//! uppercase letters, most significant digit first and without padding.

use crate::error::ShortLinkError;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE: u64 = 62;

/// Encode an id as a base-62 string.
pub fn encode(mut id: u64) -> String {
    if id == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while id > 0 {
        digits.push(ALPHABET[(id % BASE) as usize]);
        id /= BASE;
    }
    digits.reverse();

    // Only ASCII bytes from ALPHABET were pushed
    String::from_utf8(digits).unwrap_or_default()
}

/// Decode a base-62 string back into an id.
pub fn decode(code: &str) -> Result<u64, ShortLinkError> {
    if code.is_empty() {
        return Err(ShortLinkError::Empty);
    }

    code.chars().try_fold(0u64, |acc, c| {
        let digit = digit_value(c).ok_or(ShortLinkError::InvalidCharacter(c))?;
        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(ShortLinkError::Overflow)
    })
}

fn digit_value(c: char) -> Option<u64> {
    let value = match c {
        '0'..='9' => c as u64 - '0' as u64,
        'a'..='z' => c as u64 - 'a' as u64 + 10,
        'A'..='Z' => c as u64 - 'A' as u64 + 36,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(1), "1");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "a");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "A");
        assert_eq!(encode(61), "Z");
        assert_eq!(encode(62), "10");
    }

    #[test]
    fn test_no_leading_zero() {
        for id in [1u64, 62, 3844, 238_328, 1_000_000] {
            assert!(!encode(id).starts_with('0'), "{} encoded with a leading zero", id);
        }
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("1"), Ok(1));
        assert_eq!(decode("10"), Ok(62));
        assert_eq!(decode("ZZ"), Ok(61 * 62 + 61));
        assert_eq!(decode("4c92"), Ok(1_000_000));
    }

    #[test]
    fn test_roundtrip_across_range() {
        let mut id = 1u64;
        while id < u64::MAX / 7 {
            assert_eq!(decode(&encode(id)), Ok(id));
            assert_eq!(decode(&encode(id + 1)), Ok(id + 1));
            id = id * 7 + 3;
        }
        assert_eq!(decode(&encode(u64::MAX)), Ok(u64::MAX));
        assert_eq!(decode(&encode(i32::MAX as u64)), Ok(i32::MAX as u64));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(decode("ab-c"), Err(ShortLinkError::InvalidCharacter('-')));
        assert_eq!(decode("ж"), Err(ShortLinkError::InvalidCharacter('ж')));
        assert_eq!(decode("a b"), Err(ShortLinkError::InvalidCharacter(' ')));
    }

    #[test]
    fn test_empty() {
        assert_eq!(decode(""), Err(ShortLinkError::Empty));
    }

    #[test]
    fn test_overflow() {
        let too_big = format!("{}0", encode(u64::MAX));
        assert_eq!(decode(&too_big), Err(ShortLinkError::Overflow));
    }
}
