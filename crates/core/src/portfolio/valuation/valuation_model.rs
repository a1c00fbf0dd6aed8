//! Portfolio valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::InvestmentType;

/// Value contributed by one investment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeComposition {
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub value: Decimal,
}

/// Value of an investor's portfolio at a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub total_value: Decimal,
    /// One entry per type with a non-zero total, largest value first.
    pub composition_by_type: Vec<TypeComposition>,
}

impl PortfolioValuation {
    /// Value of a single type, zero when the type did not contribute.
    pub fn value_of(&self, investment_type: InvestmentType) -> Decimal {
        self.composition_by_type
            .iter()
            .find(|c| c.investment_type == investment_type)
            .map(|c| c.value)
            .unwrap_or(Decimal::ZERO)
    }
}
