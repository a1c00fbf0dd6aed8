//! SQLite storage implementation for the investment catalog.

mod model;
mod repository;

pub use model::InvestmentDB;
pub use repository::InvestmentRepository;
