//! Database models for transactions.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use portfolio_calculator_core::errors::{Error, Result};
use portfolio_calculator_core::transactions::{Transaction, TransactionType};

use crate::errors::corrupt;
use crate::utils::DATE_FORMAT;

#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i32,
    pub investment_id: String,
    pub date: String,
    pub transaction_type: String,
    pub value: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub investment_id: String,
    pub date: String,
    pub transaction_type: String,
    pub value: String,
}

impl From<&Transaction> for NewTransactionDB {
    fn from(domain: &Transaction) -> Self {
        Self {
            investment_id: domain.investment_id.clone(),
            date: domain.date.format(DATE_FORMAT).to_string(),
            transaction_type: domain.transaction_type.as_db_str().to_string(),
            value: domain.value.to_string(),
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&db.date, DATE_FORMAT)
            .map_err(|e| corrupt("transactions.date", &db.date, e))?;
        let transaction_type = TransactionType::from_db_str(&db.transaction_type).ok_or_else(|| {
            corrupt(
                "transactions.transaction_type",
                &db.transaction_type,
                "unknown transaction type",
            )
        })?;
        let value = Decimal::from_str(&db.value)
            .map_err(|e| corrupt("transactions.value", &db.value, e))?;

        Ok(Transaction {
            investment_id: db.investment_id,
            date,
            transaction_type,
            value,
        })
    }
}
