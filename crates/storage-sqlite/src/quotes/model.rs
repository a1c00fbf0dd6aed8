//! Database model for quotes.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use portfolio_calculator_core::errors::{Error, Result};
use portfolio_calculator_core::quotes::Quote;

use crate::errors::corrupt;
use crate::utils::DATE_FORMAT;

#[derive(Queryable, QueryableByName, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub isin: String,
    pub date: String,
    pub price: String,
}

impl From<&Quote> for QuoteDB {
    fn from(domain: &Quote) -> Self {
        Self {
            isin: domain.isin.clone(),
            date: domain.date.format(DATE_FORMAT).to_string(),
            price: domain.price.to_string(),
        }
    }
}

impl TryFrom<QuoteDB> for Quote {
    type Error = Error;

    fn try_from(db: QuoteDB) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&db.date, DATE_FORMAT)
            .map_err(|e| corrupt("quotes.date", &db.date, e))?;
        let price =
            Decimal::from_str(&db.price).map_err(|e| corrupt("quotes.price", &db.price, e))?;
        Ok(Quote {
            isin: db.isin,
            date,
            price,
        })
    }
}
