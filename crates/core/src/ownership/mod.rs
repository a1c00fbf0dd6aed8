//! Ownership module - which investor or fund holds which investments.

mod ownership_model;
mod ownership_traits;

pub use ownership_model::{OwnerType, OwnershipLink};
pub use ownership_traits::OwnershipRepositoryTrait;
