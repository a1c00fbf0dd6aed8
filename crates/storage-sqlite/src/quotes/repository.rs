use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use portfolio_calculator_core::errors::{Error, Result};
use portfolio_calculator_core::quotes::{Quote, QuoteRepositoryTrait};

use super::model::QuoteDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::quotes;
use crate::utils::{chunk_for_sqlite, DATE_FORMAT};

pub struct QuoteRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl QuoteRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Only the newest row per ISIN on or before `date` leaves the database.
    fn load_latest_impl(
        pool: &Pool<ConnectionManager<SqliteConnection>>,
        isins: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, Option<Decimal>>> {
        let mut conn = get_connection(pool)?;
        let date = date.format(DATE_FORMAT).to_string();
        let mut result: HashMap<String, Option<Decimal>> = HashMap::new();

        for chunk in chunk_for_sqlite(isins) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT isin, date, price FROM ( \
                    SELECT isin, date, price, \
                        ROW_NUMBER() OVER (PARTITION BY isin ORDER BY date DESC) AS rn \
                    FROM quotes \
                    WHERE isin IN ({}) AND date <= ? \
                ) WHERE rn = 1",
                placeholders
            );

            let mut query = sql_query(sql).into_boxed::<Sqlite>();
            for isin in chunk {
                query = query.bind::<Text, _>(isin);
            }
            query = query.bind::<Text, _>(&date);

            let rows = query.load::<QuoteDB>(&mut conn).map_err(StorageError::from)?;
            for row in rows {
                let quote = Quote::try_from(row)?;
                result.insert(quote.isin, Some(quote.price));
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl QuoteRepositoryTrait for QuoteRepository {
    async fn insert_many(&self, new_quotes: &[Quote]) -> Result<usize> {
        let rows: Vec<QuoteDB> = new_quotes.iter().map(QuoteDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for row in &rows {
                    affected += diesel::insert_into(quotes::table)
                        .values(row)
                        .on_conflict((quotes::isin, quotes::date))
                        .do_update()
                        .set(quotes::price.eq(&row.price))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn delete_all(&self) -> Result<usize> {
        self.writer
            .exec(|conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(quotes::table)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn get_latest_price(&self, isin: &str, date: NaiveDate) -> Result<Option<Decimal>> {
        let pool = Arc::clone(&self.pool);
        let isins = vec![isin.to_string()];

        let latest =
            tokio::task::spawn_blocking(move || Self::load_latest_impl(&pool, &isins, date))
                .await
                .map_err(|e| Error::Unexpected(e.to_string()))??;

        Ok(latest.get(isin).copied().flatten())
    }

    async fn get_latest_prices(
        &self,
        isins: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, Option<Decimal>>> {
        if isins.is_empty() {
            return Ok(HashMap::new());
        }

        let pool = Arc::clone(&self.pool);
        let isins = isins.to_vec();

        tokio::task::spawn_blocking(move || Self::load_latest_impl(&pool, &isins, date))
            .await
            .map_err(|e| Error::Unexpected(e.to_string()))?
    }
}
