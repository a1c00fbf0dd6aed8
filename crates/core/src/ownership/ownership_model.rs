//! Ownership link models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity that holds investments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerType {
    Investor,
    Fund,
}

impl OwnerType {
    /// Returns the database string representation.
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            OwnerType::Investor => "Investor",
            OwnerType::Fund => "Fund",
        }
    }

    /// Parses an owner type from its database string (case-insensitive).
    pub fn from_db_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("Investor") {
            Some(OwnerType::Investor)
        } else if s.eq_ignore_ascii_case("Fund") {
            Some(OwnerType::Fund)
        } else {
            None
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// `owner_id` (an investor or a fund) holds `investment_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipLink {
    pub owner_type: OwnerType,
    pub owner_id: String,
    pub investment_id: String,
}

impl OwnershipLink {
    pub fn new(owner_type: OwnerType, owner_id: &str, investment_id: &str) -> Self {
        Self {
            owner_type,
            owner_id: owner_id.to_string(),
            investment_id: investment_id.to_string(),
        }
    }
}
