use crate::domain::tlv::Tag;
use crate::error::{PayloadError, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Digit count of a domestic mobile number (`0XXXXXXXXX`), also the
/// minimum accepted identifier length.
pub const PHONE_LEN: usize = 10;
/// Digit count of a national tax ID, and the canonical width of phone IDs.
pub const TAX_ID_LEN: usize = 13;
/// Identifiers with at least this many digits are e-wallet IDs.
pub const EWALLET_MIN_LEN: usize = 15;

const COUNTRY_CALLING_CODE: &str = "66";

/// The kind of payee an identifier refers to.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Phone,
    TaxId,
    EWallet,
}

impl Category {
    /// Sub-tag carrying the payee inside the merchant account template.
    pub fn merchant_tag(self) -> Tag {
        match self {
            Category::Phone => Tag::MERCHANT_PHONE,
            Category::TaxId => Tag::MERCHANT_TAX_ID,
            Category::EWallet => Tag::MERCHANT_EWALLET,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Phone => "phone",
            Category::TaxId => "taxid",
            Category::EWallet => "ewallet",
        }
    }

    fn from_digit_count(count: usize) -> Self {
        // Longest match first: both bounds are open-ended.
        if count >= EWALLET_MIN_LEN {
            Category::EWallet
        } else if count >= TAX_ID_LEN {
            Category::TaxId
        } else {
            Category::Phone
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps only the ASCII digits of `raw`, in order.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Classifies a raw identifier by its digit count. Never fails; short or
/// unrecognised input falls into [`Category::Phone`].
pub fn classify(raw: &str) -> Category {
    Category::from_digit_count(sanitize(raw).len())
}

/// Rewrites sanitized digits into the form embedded in the payload.
///
/// Identifiers of 13 digits or more are used as-is. Shorter ones are
/// treated as phone numbers: a leading `0` becomes the country calling
/// code and the result is left-padded with `0` to 13 digits.
pub fn canonicalize(digits: &str) -> String {
    if digits.len() >= TAX_ID_LEN {
        return digits.to_string();
    }

    let international = match digits.strip_prefix('0') {
        Some(rest) => format!("{COUNTRY_CALLING_CODE}{rest}"),
        None => {
            debug!(digits, "phone number without trunk prefix, padding only");
            digits.to_string()
        }
    };
    format!("{international:0>width$}", width = TAX_ID_LEN)
}

/// Groups an identifier for people to read: `081-234-5678` for phone
/// numbers and `1-2345-67890-12-3` for tax IDs. Everything else is
/// returned as plain digits.
pub fn format_for_display(raw: &str) -> String {
    let digits = sanitize(raw);
    let groups: &[usize] = match digits.len() {
        PHONE_LEN if digits.starts_with('0') => &[3, 3, 4],
        TAX_ID_LEN => &[1, 4, 5, 2, 1],
        _ => return digits,
    };

    let mut parts = Vec::with_capacity(groups.len());
    let mut start = 0;
    for &width in groups {
        parts.push(&digits[start..start + width]);
        start += width;
    }
    parts.join("-")
}

/// A validated payee identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    category: Category,
    canonical: String,
}

impl Identifier {
    /// Sanitizes and validates `raw`, then derives its category and
    /// canonical form.
    pub fn parse(raw: &str) -> Result<Self> {
        let digits = sanitize(raw);
        if digits.is_empty() {
            return Err(PayloadError::EmptyIdentifier);
        }
        if digits.len() < PHONE_LEN {
            return Err(PayloadError::IdentifierTooShort {
                length: digits.len(),
            });
        }

        let category = Category::from_digit_count(digits.len());
        let canonical = canonicalize(&digits);
        debug!(?category, %canonical, "identifier resolved");

        Ok(Self {
            category,
            canonical,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}
