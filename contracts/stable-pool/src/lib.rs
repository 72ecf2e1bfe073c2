pub mod contract;
mod error;
pub mod helpers;
pub mod math;
pub mod query;
pub mod state;


pub use crate::error::ContractError;
