#![allow(dead_code)]

use rand::Rng;

/// Splits a payload into `(tag, value)` pairs using the length prefixes.
///
/// Panics if a prefix is malformed or the lengths do not consume the
/// string exactly.
pub fn walk_fields(payload: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        assert!(rest.len() >= 4, "truncated field header in {payload}");
        let tag = &rest[..2];
        let length: usize = rest[2..4].parse().expect("length prefix is not numeric");
        assert!(rest.len() >= 4 + length, "field {tag} overruns the payload");
        fields.push((tag.to_string(), rest[4..4 + length].to_string()));
        rest = &rest[4 + length..];
    }
    fields
}

/// Reference CRC-16 (poly 0x1021, init 0xFFFF), kept apart from the crate's own.
pub fn reference_crc(data: &str) -> String {
    let mut crc: u32 = 0xFFFF;
    for byte in data.bytes() {
        crc ^= u32::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
            crc &= 0xFFFF;
        }
    }
    format!("{crc:04X}")
}

pub fn random_digits(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Sprinkles separators between digits the way people type identifiers.
pub fn with_separators(rng: &mut impl Rng, digits: &str) -> String {
    const SEPARATORS: [&str; 5] = ["-", " ", ".", "(", ")"];
    let mut out = String::new();
    for c in digits.chars() {
        if rng.gen_bool(0.3) {
            out.push_str(SEPARATORS[rng.gen_range(0..SEPARATORS.len())]);
        }
        out.push(c);
    }
    out
}
