use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use portfolio_calculator_core::errors::{Error, Result};
use portfolio_calculator_core::ownership::{OwnerType, OwnershipLink, OwnershipRepositoryTrait};

use super::model::NewOwnershipLinkDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::ownership_links;

pub struct OwnershipRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl OwnershipRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl OwnershipRepositoryTrait for OwnershipRepository {
    async fn upsert_links(&self, links: &[OwnershipLink]) -> Result<usize> {
        let rows: Vec<NewOwnershipLinkDB> = links.iter().map(NewOwnershipLinkDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut added = 0;
                for row in &rows {
                    added += diesel::insert_into(ownership_links::table)
                        .values(row)
                        .on_conflict((
                            ownership_links::owner_type,
                            ownership_links::owner_id,
                            ownership_links::investment_id,
                        ))
                        .do_nothing()
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(added)
            })
            .await
    }

    async fn get_owned_investment_ids(
        &self,
        owner_type: OwnerType,
        owner_id: &str,
    ) -> Result<Vec<String>> {
        let pool = Arc::clone(&self.pool);
        let owner_id = owner_id.to_string();

        tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let mut conn = get_connection(&pool)?;
            let ids = ownership_links::table
                .filter(ownership_links::owner_type.eq(owner_type.as_db_str()))
                .filter(ownership_links::owner_id.eq(&owner_id))
                .order(ownership_links::id.asc())
                .select(ownership_links::investment_id)
                .load::<String>(&mut conn)
                .into_core()?;
            Ok(ids)
        })
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))?
    }
}
