//! PromptPay QR payload generation.
//!
//! Builds the EMV merchant-presented QR payload used by Thailand's
//! PromptPay scheme from a phone number, tax ID or e-wallet ID and an
//! optional amount. Rendering the payload into an image is left to the
//! caller.

pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;

pub use application::payload::{Payload, PayloadOptions, PayloadRecord, generate_payload, validate};
pub use domain::amount::ZeroAmountPolicy;
pub use domain::identifier::{Category, classify, format_for_display, sanitize};
pub use error::{PayloadError, Result};
