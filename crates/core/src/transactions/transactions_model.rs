//! Transaction ledger models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result};

/// What a transaction's value measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Number of shares bought (positive) or sold (negative).
    Shares,
    /// Land value of a real estate position.
    Estate,
    /// Building value of a real estate position.
    Building,
    /// Stake in a fund, either as a fraction (0.2) or in percent (20).
    Percentage,
}

impl TransactionType {
    /// Returns the database string representation.
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            TransactionType::Shares => "Shares",
            TransactionType::Estate => "Estate",
            TransactionType::Building => "Building",
            TransactionType::Percentage => "Percentage",
        }
    }

    /// Parses a transaction type from its database string (case-insensitive).
    pub fn from_db_str(s: &str) -> Option<Self> {
        [
            TransactionType::Shares,
            TransactionType::Estate,
            TransactionType::Building,
            TransactionType::Percentage,
        ]
        .into_iter()
        .find(|t| t.as_db_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub investment_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub value: Decimal,
}

impl Transaction {
    pub fn new(
        investment_id: &str,
        date: NaiveDate,
        transaction_type: TransactionType,
        value: Decimal,
    ) -> Self {
        Self {
            investment_id: investment_id.to_string(),
            date,
            transaction_type,
            value,
        }
    }
}

/// Sums the values of all transactions of the given type.
///
/// Fails with [`Error::Overflow`] instead of panicking when the sum leaves the
/// range of `Decimal`.
pub fn sum_by_type(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Result<Decimal> {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .try_fold(Decimal::ZERO, |acc, t| {
            acc.checked_add(t.value).ok_or_else(|| {
                Error::Overflow(format!(
                    "{} sum of investment {}",
                    transaction_type, t.investment_id
                ))
            })
        })
}
