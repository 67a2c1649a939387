//! SHA256 + base36 field id generation.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Prefix of every generated field id.
pub const FIELD_ID_PREFIX: &str = "field";

/// Length of the hash part of a generated id.
pub const FIELD_ID_LENGTH: usize = 8;

/// Converts a byte slice to a base36 string of exactly `length` characters.
///
/// Short results are zero-padded on the left; long results keep the least
/// significant digits.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let mut num = BigUint::from_bytes_be(data);
    let base = BigUint::from(36u32);

    let mut chars: Vec<char> = Vec::with_capacity(length);
    while !num.is_zero() {
        let rem = &num % &base;
        num /= &base;
        let idx = rem.to_u32_digits().first().copied().unwrap_or(0) as usize;
        chars.push(BASE36_ALPHABET[idx] as char);
    }
    chars.reverse();

    let mut s: String = chars.into_iter().collect();
    if s.len() < length {
        s = "0".repeat(length - s.len()) + &s;
    }
    if s.len() > length {
        s = s[s.len() - length..].to_owned();
    }
    s
}

/// Creates an id for a new field: `field_<8 base36 chars>`.
///
/// The hash covers the field type, the creation time and a nonce so that
/// fields added within the same clock tick still differ.
pub fn generate_field_id(field_type: &str, timestamp: DateTime<Utc>, nonce: u64) -> String {
    let content = format!(
        "{}|{}|{}",
        field_type,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );
    let hash = Sha256::digest(content.as_bytes());
    // 6 bytes = 48 bits ~ 9.3 base36 chars, truncated to 8.
    let short_hash = encode_base36(&hash[..6], FIELD_ID_LENGTH);
    format!("{}_{}", FIELD_ID_PREFIX, short_hash)
}
