//! Database model for investments.

use diesel::prelude::*;
use portfolio_calculator_core::errors::{Error, Result, ValidationError};
use portfolio_calculator_core::investments::{Investment, InvestmentClass, InvestmentType};

use crate::errors::corrupt;

/// One row of the `investments` table. Only the reference column of the
/// investment's own kind is populated.
#[derive(Queryable, Selectable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct InvestmentDB {
    pub id: String,
    pub investment_type: String,
    pub isin: Option<String>,
    pub city: Option<String>,
    pub fund_id: Option<String>,
}

impl TryFrom<&Investment> for InvestmentDB {
    type Error = Error;

    fn try_from(domain: &Investment) -> Result<Self> {
        let mut db = InvestmentDB {
            id: domain.id.clone(),
            investment_type: String::new(),
            isin: None,
            city: None,
            fund_id: None,
        };

        match &domain.class {
            InvestmentClass::Stock { isin } => {
                db.investment_type = InvestmentType::Stock.as_db_str().to_string();
                db.isin = isin.clone();
            }
            InvestmentClass::RealEstate { city } => {
                db.investment_type = InvestmentType::RealEstate.as_db_str().to_string();
                db.city = city.clone();
            }
            InvestmentClass::Fund { fund_id } => {
                db.investment_type = InvestmentType::Fund.as_db_str().to_string();
                db.fund_id = fund_id.clone();
            }
            InvestmentClass::Unknown { kind } => {
                return Err(ValidationError::InvalidInput(format!(
                    "Investment {} has unsupported type '{}'",
                    domain.id, kind
                ))
                .into());
            }
        }

        Ok(db)
    }
}

impl TryFrom<InvestmentDB> for Investment {
    type Error = Error;

    fn try_from(db: InvestmentDB) -> Result<Self> {
        let class = match InvestmentType::from_db_str(&db.investment_type) {
            Some(InvestmentType::Stock) => InvestmentClass::Stock { isin: db.isin },
            Some(InvestmentType::RealEstate) => InvestmentClass::RealEstate { city: db.city },
            Some(InvestmentType::Fund) => InvestmentClass::Fund { fund_id: db.fund_id },
            None => {
                return Err(corrupt(
                    "investments.investment_type",
                    &db.investment_type,
                    format!("unknown type for investment {}", db.id),
                ))
            }
        };

        Ok(Investment { id: db.id, class })
    }
}
