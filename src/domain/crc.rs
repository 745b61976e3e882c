const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// CRC-16 as used by EMV QR payloads.
///
/// Polynomial `0x1021`, register starts at `0xFFFF`, bytes are fed MSB
/// first and the result is not reflected or XORed.
pub fn checksum(data: &[u8]) -> u16 {
    data.iter().fold(INITIAL, |crc, &byte| {
        let mut crc = crc ^ (u16::from(byte) << 8);
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// Formats a checksum as the 4 uppercase hex digits carried in the payload.
pub fn format_checksum(crc: u16) -> String {
    format!("{crc:04X}")
}
