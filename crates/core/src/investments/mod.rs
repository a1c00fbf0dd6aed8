//! Investments module - the investment catalog and its classification model.

mod investments_model;
mod investments_traits;

#[cfg(test)]
mod investments_model_tests;

pub use investments_model::{Investment, InvestmentClass, InvestmentType};
pub use investments_traits::InvestmentRepositoryTrait;
