//! Database model for ownership links.

use diesel::prelude::*;
use portfolio_calculator_core::ownership::OwnershipLink;

/// Row to insert. The autoincrement id is assigned by SQLite and gives the
/// insertion order of an owner's holdings.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::ownership_links)]
pub struct NewOwnershipLinkDB {
    pub owner_type: String,
    pub owner_id: String,
    pub investment_id: String,
}

impl From<&OwnershipLink> for NewOwnershipLinkDB {
    fn from(domain: &OwnershipLink) -> Self {
        Self {
            owner_type: domain.owner_type.as_db_str().to_string(),
            owner_id: domain.owner_id.clone(),
            investment_id: domain.investment_id.clone(),
        }
    }
}
