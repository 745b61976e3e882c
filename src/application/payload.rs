use crate::domain::amount::{Amount, ZeroAmountPolicy};
use crate::domain::crc;
use crate::domain::identifier::{Category, Identifier, classify, format_for_display};
use crate::domain::tlv::{self, Field, Tag};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const PAYLOAD_FORMAT_EMV_QRCPS: &str = "01";
const POI_METHOD_STATIC: &str = "11";
const POI_METHOD_DYNAMIC: &str = "12";
const PROMPTPAY_GUID: &str = "A000000677010111";
const COUNTRY_CODE_TH: &str = "TH";
const CURRENCY_THB: &str = "764";
const CRC_VALUE_LEN: usize = 4;

/// Caller-supplied settings for a single payload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayloadOptions {
    /// Fixed amount in baht. `None` leaves the amount to the payer.
    pub amount: Option<Decimal>,
    /// How an amount of exactly zero is treated.
    pub zero_amount: ZeroAmountPolicy,
}

impl PayloadOptions {
    pub fn with_amount(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Validates the amount and resolves it into the optional amount field.
    pub fn resolve_amount(&self) -> Result<Option<Amount>> {
        let amount = self.amount.map(Amount::new).transpose()?;
        Ok(self.zero_amount.apply(amount))
    }
}

/// A complete, checksummed EMV QR payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(String);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A generated payload together with what went into it.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PayloadRecord {
    pub target: String,
    pub category: Category,
    pub amount: Option<String>,
    pub payload: String,
}

impl PayloadRecord {
    /// Generates the payload for `target` and captures the display form,
    /// category and resolved amount alongside it.
    pub fn generate(target: &str, options: &PayloadOptions) -> Result<Self> {
        let payload = generate_payload(target, options)?;
        let amount = options.resolve_amount()?.map(|amount| amount.to_string());
        Ok(Self {
            target: format_for_display(target),
            category: classify(target),
            amount,
            payload: payload.into_string(),
        })
    }
}

/// Checks the identifier and amount without building anything.
pub fn validate(target: &str, options: &PayloadOptions) -> Result<()> {
    Identifier::parse(target)?;
    options.resolve_amount()?;
    Ok(())
}

/// Builds the PromptPay payload for `target`.
///
/// Both inputs are validated before any field is encoded, so an error
/// never comes with a partial payload.
pub fn generate_payload(target: &str, options: &PayloadOptions) -> Result<Payload> {
    let identifier = Identifier::parse(target)?;
    let amount = options.resolve_amount()?;
    assemble(&identifier, amount)
}

/// Lays out the fields in profile order and appends the checksum.
pub fn assemble(identifier: &Identifier, amount: Option<Amount>) -> Result<Payload> {
    let poi_method = match amount {
        Some(_) => POI_METHOD_DYNAMIC,
        None => POI_METHOD_STATIC,
    };

    let merchant = Field::template(
        Tag::MERCHANT_ACCOUNT_PROMPTPAY,
        &[
            Field::new(Tag::MERCHANT_GUID, PROMPTPAY_GUID)?,
            Field::new(identifier.category().merchant_tag(), identifier.canonical())?,
        ],
    )?;

    let amount_field = amount
        .map(|amount| Field::new(Tag::TRANSACTION_AMOUNT, amount.to_field_value()))
        .transpose()?;

    let fields = [
        Some(Field::new(Tag::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_EMV_QRCPS)?),
        Some(Field::new(Tag::POINT_OF_INITIATION, poi_method)?),
        Some(merchant),
        Some(Field::new(Tag::COUNTRY_CODE, COUNTRY_CODE_TH)?),
        Some(Field::new(Tag::TRANSACTION_CURRENCY, CURRENCY_THB)?),
        amount_field,
    ];

    let mut payload = String::new();
    for field in fields.iter().flatten() {
        field.encode_into(&mut payload);
    }

    // The checksum covers its own tag and length but not its value.
    payload.push_str(&tlv::header(Tag::CRC, CRC_VALUE_LEN));
    let checksum = crc::checksum(payload.as_bytes());
    payload.push_str(&crc::format_checksum(checksum));

    debug!(
        category = ?identifier.category(),
        dynamic = amount.is_some(),
        length = payload.len(),
        "payload assembled"
    );
    Ok(Payload(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayloadError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_static_phone_payload() {
        let payload = generate_payload("081-234-5678", &PayloadOptions::default()).unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021129370016A000000677010111011300668123456785802TH530376463045D82"
        );
    }

    #[test]
    fn test_all_zero_phone_payload() {
        let payload = generate_payload("000-000-0000", &PayloadOptions::default()).unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021129370016A000000677010111011300660000000005802TH530376463048956"
        );
    }

    #[test]
    fn test_dynamic_tax_id_payload() {
        let options = PayloadOptions::with_amount(dec!(100.00));
        let payload = generate_payload("1234567890123", &options).unwrap();
        assert_eq!(
            payload.as_str(),
            "00020101021229370016A000000677010111021312345678901235802TH53037645406100.006304BB6C"
        );
    }

    #[test]
    fn test_ewallet_uses_sub_tag_03() {
        let payload = generate_payload("123456789012345", &PayloadOptions::default()).unwrap();
        assert!(payload.as_str().contains("0315123456789012345"));
        assert!(payload.as_str().starts_with("00020101021129390016A000000677010111"));
    }

    #[test]
    fn test_zero_amount_flexible_by_default() {
        let options = PayloadOptions::with_amount(dec!(0));
        let with_zero = generate_payload("0812345678", &options).unwrap();
        let without = generate_payload("0812345678", &PayloadOptions::default()).unwrap();
        assert_eq!(with_zero, without);
    }

    #[test]
    fn test_zero_amount_fixed() {
        let options = PayloadOptions {
            amount: Some(dec!(0)),
            zero_amount: ZeroAmountPolicy::Fixed,
        };
        let payload = generate_payload("0812345678", &options).unwrap();
        assert!(payload.as_str().starts_with("000201010212"));
        assert!(payload.as_str().contains("54040.00"));
    }

    #[test]
    fn test_validation_errors() {
        let options = PayloadOptions::default();
        assert!(matches!(
            generate_payload("", &options),
            Err(PayloadError::EmptyIdentifier)
        ));
        assert!(matches!(
            generate_payload("123", &options),
            Err(PayloadError::IdentifierTooShort { length: 3 })
        ));
        assert!(matches!(
            generate_payload("0812345678", &PayloadOptions::with_amount(dec!(-5))),
            Err(PayloadError::AmountNegative)
        ));
        assert!(matches!(
            generate_payload("0812345678", &PayloadOptions::with_amount(dec!(2000000))),
            Err(PayloadError::AmountTooLarge)
        ));
    }

    #[test]
    fn test_identifier_checked_before_amount() {
        let options = PayloadOptions::with_amount(dec!(-1));
        assert!(matches!(
            validate("", &options),
            Err(PayloadError::EmptyIdentifier)
        ));
    }

    #[test]
    fn test_validate_accepts_good_input() {
        assert!(validate("0812345678", &PayloadOptions::with_amount(dec!(1))).is_ok());
    }

    #[test]
    fn test_record_generation() {
        let record =
            PayloadRecord::generate("0812345678", &PayloadOptions::with_amount(dec!(42.5)))
                .unwrap();
        assert_eq!(record.target, "081-234-5678");
        assert_eq!(record.category, Category::Phone);
        assert_eq!(record.amount.as_deref(), Some("42.50"));
        assert!(record.payload.contains("540542.50"));
    }

    #[test]
    fn test_record_generation_zero_amount_flexible() {
        let record =
            PayloadRecord::generate("0812345678", &PayloadOptions::with_amount(dec!(0)))
                .unwrap();
        assert_eq!(record.amount, None);
        assert!(record.payload.starts_with("000201010211"));
    }

    #[test]
    fn test_record_generation_propagates_errors() {
        let result = PayloadRecord::generate("12345", &PayloadOptions::default());
        assert!(matches!(
            result,
            Err(PayloadError::IdentifierTooShort { length: 5 })
        ));
    }

    #[test]
    fn test_oversized_ewallet_fails_loudly() {
        let target = "1".repeat(80);
        assert!(matches!(
            generate_payload(&target, &PayloadOptions::default()),
            Err(PayloadError::FieldValueTooLong { length: 104, .. })
        ));
    }
}
