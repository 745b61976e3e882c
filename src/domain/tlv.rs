use crate::error::{PayloadError, Result};
use std::fmt;

/// Largest value length the two-digit length prefix can express.
pub const MAX_VALUE_LEN: usize = 99;

/// A two-digit EMV field identifier.
///
/// Tags are only built from the constants below, so the set is closed and
/// every tag renders as exactly two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(u8);

impl Tag {
    pub const PAYLOAD_FORMAT_INDICATOR: Self = Self(0);
    pub const POINT_OF_INITIATION: Self = Self(1);
    pub const MERCHANT_ACCOUNT_PROMPTPAY: Self = Self(29);
    pub const TRANSACTION_CURRENCY: Self = Self(53);
    pub const TRANSACTION_AMOUNT: Self = Self(54);
    pub const COUNTRY_CODE: Self = Self(58);
    pub const CRC: Self = Self(63);

    // Sub-tags inside the merchant account template.
    pub const MERCHANT_GUID: Self = Self(0);
    pub const MERCHANT_PHONE: Self = Self(1);
    pub const MERCHANT_TAX_ID: Self = Self(2);
    pub const MERCHANT_EWALLET: Self = Self(3);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A single tag-length-value entry.
///
/// The length is derived from the value on encoding; a `Field` can only be
/// constructed when that length fits in two digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: Tag,
    value: String,
}

impl Field {
    pub fn new(tag: Tag, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let length = value.chars().count();
        if length > MAX_VALUE_LEN {
            return Err(PayloadError::FieldValueTooLong { tag, length });
        }
        Ok(Self { tag, value })
    }

    /// Builds a nested template whose value is the encoding of `fields`.
    pub fn template(tag: Tag, fields: &[Field]) -> Result<Self> {
        let mut inner = String::new();
        for field in fields {
            field.encode_into(&mut inner);
        }
        Self::new(tag, inner)
    }

    /// Appends `tag ++ length ++ value` to `out`.
    pub fn encode_into(&self, out: &mut String) {
        out.push_str(&header(self.tag, self.value.chars().count()));
        out.push_str(&self.value);
    }

    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(4 + self.value.len());
        self.encode_into(&mut out);
        out
    }
}

/// The `tag ++ length` prefix of a field, e.g. `"6304"`.
pub fn header(tag: Tag, length: usize) -> String {
    format!("{tag}{length:02}")
}
