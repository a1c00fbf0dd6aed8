//! Portfolio Calculator Core - Domain entities, services, and traits.
//!
//! This crate contains the valuation logic for investor portfolios.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod investments;
pub mod ownership;
pub mod portfolio;
pub mod quotes;
pub mod transactions;

// Re-export the valuation entry points
pub use portfolio::valuation::{
    PortfolioValuation, PortfolioValuationService, PortfolioValuationServiceTrait,
    TypeComposition,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
