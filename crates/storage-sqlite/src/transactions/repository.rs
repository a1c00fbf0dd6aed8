use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use portfolio_calculator_core::errors::{Error, Result};
use portfolio_calculator_core::transactions::{Transaction, TransactionRepositoryTrait};

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::utils::{chunk_for_sqlite, DATE_FORMAT};

pub struct TransactionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_up_to_date_impl(
        pool: &Pool<ConnectionManager<SqliteConnection>>,
        ids: &[String],
        cutoff: NaiveDate,
    ) -> Result<HashMap<String, Vec<Transaction>>> {
        let mut conn = get_connection(pool)?;
        let cutoff = cutoff.format(DATE_FORMAT).to_string();
        let mut result: HashMap<String, Vec<Transaction>> = HashMap::new();

        for chunk in chunk_for_sqlite(ids) {
            let rows = transactions::table
                .filter(transactions::investment_id.eq_any(chunk))
                .filter(transactions::date.le(&cutoff))
                .order((transactions::date.asc(), transactions::id.asc()))
                .select(TransactionDB::as_select())
                .load::<TransactionDB>(&mut conn)
                .map_err(StorageError::from)?;

            for row in rows {
                let tx = Transaction::try_from(row)?;
                result.entry(tx.investment_id.clone()).or_default().push(tx);
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn insert_many(&self, new_transactions: &[Transaction]) -> Result<usize> {
        let rows: Vec<NewTransactionDB> =
            new_transactions.iter().map(NewTransactionDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for chunk in chunk_for_sqlite(&rows) {
                    inserted += diesel::insert_into(transactions::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn delete_all(&self) -> Result<usize> {
        self.writer
            .exec(|conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn get_up_to_date(
        &self,
        investment_id: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let pool = Arc::clone(&self.pool);
        let ids = vec![investment_id.to_string()];

        let mut by_id = tokio::task::spawn_blocking(move || {
            Self::load_up_to_date_impl(&pool, &ids, cutoff)
        })
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))??;

        Ok(by_id.remove(investment_id).unwrap_or_default())
    }

    async fn get_up_to_date_by_investment_ids(
        &self,
        investment_ids: &[String],
        cutoff: NaiveDate,
    ) -> Result<HashMap<String, Vec<Transaction>>> {
        if investment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let pool = Arc::clone(&self.pool);
        let ids = investment_ids.to_vec();

        tokio::task::spawn_blocking(move || Self::load_up_to_date_impl(&pool, &ids, cutoff))
            .await
            .map_err(|e| Error::Unexpected(e.to_string()))?
    }
}
