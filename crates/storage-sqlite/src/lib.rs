//! SQLite storage implementation for the portfolio calculator.
//!
//! This crate implements the repository traits defined in
//! `portfolio-calculator-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for investments, ownership links,
//!   transactions and quotes
//!
//! ```text
//! core (domain, valuation engine)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod investments;
pub mod ownership;
pub mod quotes;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use investments::InvestmentRepository;
pub use ownership::OwnershipRepository;
pub use quotes::QuoteRepository;
pub use transactions::TransactionRepository;

// Re-export from portfolio-calculator-core for convenience
pub use portfolio_calculator_core::errors::{DatabaseError, Error, Result};
