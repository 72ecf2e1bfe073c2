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

    #[error("Callable only by Peg Keeper")]
    OnlyPegKeeper {},

    #[error("Invalid coin index")]
    InvalidCoinIndex {},

    #[error("Initial deposit requires all coins")]
    InitialDepositRequiresAllCoins {},

    #[error("Slippage limit exceeded: {amount} vs limit {limit}")]
    Slippage { amount: Uint128, limit: Uint128 },

    #[error("Amount {amount} is below the pool minimum of {minimum}")]
    BelowMinCoinAmount { amount: Uint128, minimum: Uint128 },

    #[error("Insufficient LP balance: {balance} < {amount}")]
    InsufficientLpBalance { balance: Uint128, amount: Uint128 },

    #[error("Bad fee value")]
    BadFee {},

    #[error("Active action")]
    ActiveAction {},

    #[error("No active action")]
    NoActiveAction {},

    #[error("Insufficient time, action unlocks at {deadline}")]
    InsufficientTime { deadline: u64 },

    #[error("Custom Error val: {val:?}")]
    CustomError { val: String },
}
