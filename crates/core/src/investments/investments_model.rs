//! Investment catalog models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Investment kind used for aggregation and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    Stock,
    RealEstate,
    Fund,
}

impl InvestmentType {
    /// Returns the database string representation.
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            InvestmentType::Stock => "Stock",
            InvestmentType::RealEstate => "RealEstate",
            InvestmentType::Fund => "Fund",
        }
    }

    /// Parses an investment type from its database string (case-insensitive).
    pub fn from_db_str(s: &str) -> Option<Self> {
        [
            InvestmentType::Stock,
            InvestmentType::RealEstate,
            InvestmentType::Fund,
        ]
        .into_iter()
        .find(|t| t.as_db_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Classification of an investment. Each variant carries only the reference
/// fields that matter for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InvestmentClass {
    /// Listed security, priced through its ISIN.
    Stock { isin: Option<String> },
    /// Real estate position. The city is informational only.
    RealEstate { city: Option<String> },
    /// Slice of another fund's holdings.
    #[serde(rename_all = "camelCase")]
    Fund { fund_id: Option<String> },
    /// Kind this build does not know how to value.
    Unknown { kind: String },
}

impl InvestmentClass {
    /// The aggregation bucket for this class, `None` for unknown kinds.
    pub fn investment_type(&self) -> Option<InvestmentType> {
        match self {
            InvestmentClass::Stock { .. } => Some(InvestmentType::Stock),
            InvestmentClass::RealEstate { .. } => Some(InvestmentType::RealEstate),
            InvestmentClass::Fund { .. } => Some(InvestmentType::Fund),
            InvestmentClass::Unknown { .. } => None,
        }
    }
}

/// An entry of the investment catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    #[serde(flatten)]
    pub class: InvestmentClass,
}

impl Investment {
    pub fn stock(id: &str, isin: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            class: InvestmentClass::Stock {
                isin: isin.map(str::to_string),
            },
        }
    }

    pub fn real_estate(id: &str, city: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            class: InvestmentClass::RealEstate {
                city: city.map(str::to_string),
            },
        }
    }

    pub fn fund(id: &str, fund_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            class: InvestmentClass::Fund {
                fund_id: fund_id.map(str::to_string),
            },
        }
    }

    pub fn investment_type(&self) -> Option<InvestmentType> {
        self.class.investment_type()
    }

    /// ISIN of a stock, `None` when absent or blank or when this is not a stock.
    pub fn security_id(&self) -> Option<&str> {
        match &self.class {
            InvestmentClass::Stock { isin } => non_blank(isin.as_deref()),
            _ => None,
        }
    }

    /// Target fund of a fund position, `None` when absent or blank or when
    /// this is not a fund position.
    pub fn fund_reference(&self) -> Option<&str> {
        match &self.class {
            InvestmentClass::Fund { fund_id } => non_blank(fund_id.as_deref()),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
