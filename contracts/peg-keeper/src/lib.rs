pub mod contract;
mod error;
pub mod helpers;
pub mod query;
pub mod state;

#[cfg(test)]
mod testing;

pub use crate::error::ContractError;
