use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use portfolio_calculator_core::errors::{Error, Result};
use portfolio_calculator_core::investments::{Investment, InvestmentRepositoryTrait};

use super::model::InvestmentDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investments;
use crate::utils::chunk_for_sqlite;

pub struct InvestmentRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_by_ids_impl(
        pool: &Pool<ConnectionManager<SqliteConnection>>,
        ids: &[String],
    ) -> Result<HashMap<String, Investment>> {
        let mut conn = get_connection(pool)?;
        let mut result = HashMap::with_capacity(ids.len());

        for chunk in chunk_for_sqlite(ids) {
            let rows = investments::table
                .filter(investments::id.eq_any(chunk))
                .select(InvestmentDB::as_select())
                .load::<InvestmentDB>(&mut conn)
                .map_err(StorageError::from)?;

            for row in rows {
                let investment = Investment::try_from(row)?;
                result.insert(investment.id.clone(), investment);
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    async fn upsert_many(&self, new_investments: &[Investment]) -> Result<usize> {
        let rows = new_investments
            .iter()
            .map(InvestmentDB::try_from)
            .collect::<Result<Vec<_>>>()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for row in &rows {
                    affected += diesel::insert_into(investments::table)
                        .values(row)
                        .on_conflict(investments::id)
                        .do_update()
                        .set(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn get_by_id(&self, investment_id: &str) -> Result<Option<Investment>> {
        let pool = Arc::clone(&self.pool);
        let investment_id = investment_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<Investment>> {
            let mut conn = get_connection(&pool)?;
            investments::table
                .find(investment_id.as_str())
                .select(InvestmentDB::as_select())
                .first::<InvestmentDB>(&mut conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Investment::try_from)
                .transpose()
        })
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))?
    }

    async fn get_by_ids(&self, investment_ids: &[String]) -> Result<HashMap<String, Investment>> {
        if investment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let pool = Arc::clone(&self.pool);
        let ids = investment_ids.to_vec();

        tokio::task::spawn_blocking(move || Self::load_by_ids_impl(&pool, &ids))
            .await
            .map_err(|e| Error::Unexpected(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_test_database;
    use portfolio_calculator_core::errors::ValidationError;
    use portfolio_calculator_core::investments::InvestmentClass;

    #[tokio::test]
    async fn test_upsert_and_load_by_ids() {
        let (pool, writer, _dir) = open_test_database();
        let repo = InvestmentRepository::new(pool, writer);

        let written = repo
            .upsert_many(&[
                Investment::stock("S1", Some("US123")),
                Investment::real_estate("R1", Some("Berlin")),
                Investment::fund("FP1", Some("FondsA")),
            ])
            .await
            .unwrap();
        assert_eq!(written, 3);

        let loaded = repo
            .get_by_ids(&["S1".to_string(), "FP1".to_string(), "MISSING".to_string()])
            .await
            .unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["S1"], Investment::stock("S1", Some("US123")));
        assert_eq!(loaded["FP1"], Investment::fund("FP1", Some("FondsA")));
        assert!(!loaded.contains_key("MISSING"));

        assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_classification() {
        let (pool, writer, _dir) = open_test_database();
        let repo = InvestmentRepository::new(pool, writer);

        repo.upsert_many(&[Investment::stock("X1", Some("US123"))])
            .await
            .unwrap();
        repo.upsert_many(&[Investment::fund("X1", Some("FondsB"))])
            .await
            .unwrap();

        let loaded = repo.get_by_id("X1").await.unwrap();
        assert_eq!(loaded, Some(Investment::fund("X1", Some("FondsB"))));
        assert_eq!(repo.get_by_id("x1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_stored_type_fails_the_read() {
        let (pool, writer, _dir) = open_test_database();
        {
            let mut conn = get_connection(&pool).unwrap();
            diesel::sql_query(
                "INSERT INTO investments (id, investment_type) VALUES ('B1', 'Bond')",
            )
            .execute(&mut conn)
            .unwrap();
        }
        let repo = InvestmentRepository::new(pool, writer);

        let result = repo.get_by_ids(&["B1".to_string()]).await;
        assert!(matches!(
            result,
            Err(Error::Database(
                portfolio_calculator_core::errors::DatabaseError::Internal(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_storing_unknown_kind_is_rejected() {
        let (pool, writer, _dir) = open_test_database();
        let repo = InvestmentRepository::new(pool, writer);

        let bond = Investment {
            id: "B1".to_string(),
            class: InvestmentClass::Unknown {
                kind: "Bond".to_string(),
            },
        };

        let result = repo.upsert_many(&[bond]).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert_eq!(repo.get_by_id("B1").await.unwrap(), None);
    }
}
