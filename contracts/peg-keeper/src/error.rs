use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Callable only by the pool")]
    OnlyPool {},

    #[error("Active action")]
    ActiveAction {},

    #[error("No active action")]
    NoActiveAction {},

    #[error("Insufficient time, action unlocks at {deadline}")]
    InsufficientTime { deadline: u64 },

    #[error("Bad asymmetry value")]
    BadAsymmetry {},

    #[error("Bad caller share value")]
    BadCallerShare {},

    #[error("Peg was unprofitable")]
    UnprofitablePeg {},

    #[error("Pegged index mismatch, keeper uses {keeper} but the pool binds {pool}")]
    PeggedIndexMismatch { keeper: usize, pool: usize },

    #[error("Action not supported by this peg keeper")]
    UnsupportedAction {},

    #[error("Custom Error val: {val:?}")]
    CustomError { val: String },
}
