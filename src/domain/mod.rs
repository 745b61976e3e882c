//! Domain layer: the value types and encoding rules of a PromptPay payload.
//!
//! Nothing here performs I/O or holds state between calls.

pub mod amount;
pub mod crc;
pub mod identifier;
pub mod tlv;
