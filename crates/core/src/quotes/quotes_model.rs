//! Price point model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closing price of a security on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub isin: String,
    pub date: NaiveDate,
    pub price: Decimal,
}

impl Quote {
    pub fn new(isin: &str, date: NaiveDate, price: Decimal) -> Self {
        Self {
            isin: isin.to_string(),
            date,
            price,
        }
    }
}
