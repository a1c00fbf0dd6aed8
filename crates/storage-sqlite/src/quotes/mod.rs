//! SQLite storage implementation for security prices.

mod model;
mod repository;

pub use model::QuoteDB;
pub use repository::QuoteRepository;
