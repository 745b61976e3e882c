use crate::error::{PayloadError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt;

/// Largest amount a single code may request, in baht.
pub const MAX_AMOUNT: Decimal = dec!(1000000);

/// A fixed transaction amount, in baht.
///
/// Always within `0..=1_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(PayloadError::AmountNegative)
        } else if value > MAX_AMOUNT {
            Err(PayloadError::AmountTooLarge)
        } else if value.is_zero() {
            // Drops the sign of `-0`.
            Ok(Self(Decimal::ZERO))
        } else {
            Ok(Self(value))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Renders the amount with exactly two fraction digits, rounding the
    /// midpoint to even (`0.125` -> `0.12`, `0.135` -> `0.14`).
    pub fn to_field_value(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(2);
        rounded.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field_value())
    }
}

/// How an amount of exactly zero is encoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ZeroAmountPolicy {
    /// Zero means "no amount": the payer enters it and the code is static.
    #[default]
    Flexible,
    /// Zero is a real amount: emitted as `0.00` in a dynamic code.
    Fixed,
}

impl ZeroAmountPolicy {
    /// Resolves a validated amount into the optional amount field.
    pub fn apply(self, amount: Option<Amount>) -> Option<Amount> {
        match (self, amount) {
            (ZeroAmountPolicy::Flexible, Some(amount)) if amount.is_zero() => None,
            (_, amount) => amount,
        }
    }
}
