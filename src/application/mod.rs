//! Application layer: turns a raw identifier and options into a payload.
//!
//! `generate_payload` is the single entry point callers need; `validate`
//! runs the same checks without encoding anything.

pub mod payload;
