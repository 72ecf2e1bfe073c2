use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid zero amount")]
    ZeroAmount {},

    #[error("Insufficient balance: {balance} < {amount}")]
    InsufficientBalance { balance: Uint128, amount: Uint128 },

    #[error("Insufficient allowance: {allowance} < {amount}")]
    InsufficientAllowance { allowance: Uint128, amount: Uint128 },

    #[error("Cannot set allowance to own account")]
    CannotSetOwnAccount {},
}
