//! SQLite storage implementation for ownership links.

mod model;
mod repository;

pub use model::NewOwnershipLinkDB;
pub use repository::OwnershipRepository;
