//! Quotes module - price history of listed securities.

mod quotes_model;
mod quotes_traits;

pub use quotes_model::Quote;
pub use quotes_traits::QuoteRepositoryTrait;
