use crate::error::{PayloadError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a batch file: a payee and an optional fixed amount.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct TargetRecord {
    pub target: String,
    // Parsed from the field text; csv would otherwise hand over an f64.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
}

/// Reads batch targets from a CSV source.
///
/// Expects a `target,amount` header. Whitespace is trimmed and the amount
/// column may be empty or missing entirely.
pub struct TargetReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TargetReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one record per row.
    pub fn targets(self) -> impl Iterator<Item = Result<TargetRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayloadError::from))
    }
}
