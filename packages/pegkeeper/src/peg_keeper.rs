use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::types::Capabilities;

#[cw_serde]
pub struct InstantiateMsg {
    /// Stable pool contract
    pub pool: String,
    /// Position of the pegged coin in the pool, defaults to 0
    pub pegged_index: Option<usize>,
    /// Profit receiver
    pub receiver: String,
    /// Defaults to the instantiator
    pub admin: Option<String>,
    /// Reserve keepers only, defaults to the admin
    pub pegged_admin: Option<String>,
    /// In 1e10, exclusive bounds (0, 1e10)
    pub min_asymmetry: u64,
    /// In 1e5, defaults to 0
    pub caller_share: Option<u64>,
    /// Defaults to 3 days
    pub admin_actions_delay: Option<u64>,
    pub capabilities: Capabilities,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Rebalance the pool toward 1:1 and harvest.
    /// Response data is a bool, true when the keeper provided or withdrew.
    Update {
        /// Receives the caller share, defaults to the sender
        beneficiary: Option<String>,
    },
    /// Pool-driven keepers only
    Provide { amount: Uint128 },
    /// Pool-driven keepers only
    Withdraw { amount: Uint128 },
    /// Send all profit to the receiver. Response data is the LP amount.
    WithdrawProfit {},
    //////////////GOVERNANCE////////////////
    CommitNewAdmin { new_admin: String },
    /// Only callable by the future admin
    ApplyNewAdmin {},
    CommitNewReceiver { new_receiver: String },
    ApplyNewReceiver {},
    /// Cancel a pending admin or receiver change
    RevertNewStaff {},
    SetNewMinAsymmetry { new_min_asymmetry: u64 },
    SetNewCallerShare { new_caller_share: u64 },
    //////////////RESERVE////////////////
    CommitNewPeggedAdmin { new_pegged_admin: String },
    /// Only callable by the future pegged admin
    ApplyNewPeggedAdmin {},
    RevertNewPeggedAdmin {},
    /// Send reserve coins out, capped at the keeper's balance
    WithdrawPegged {
        amount: Uint128,
        receiver: Option<String>,
    },
    //////////////CALLBACKS////////////////
    /// Asserts an update didn't lower the keeper's profit and pays the caller share.
    /// Only callable by the contract
    ProfitAssurance {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(StateResponse)]
    State {},
    #[returns(Uint128)]
    CalcProfit {},
    #[returns(AsymmetryResponse)]
    Asymmetry {},
}

#[cw_serde]
pub struct Config {
    pub pool: Addr,
    pub pegged: Addr,
    pub pegged_index: usize,
    pub admin: Addr,
    pub receiver: Addr,
    pub pegged_admin: Addr,
    pub min_asymmetry: u64,
    pub caller_share: u64,
    pub admin_actions_delay: u64,
    pub capabilities: Capabilities,
}

#[cw_serde]
pub struct StateResponse {
    pub debt: Uint128,
    pub last_change: u64,
    pub future_admin: Option<Addr>,
    pub future_receiver: Option<Addr>,
    pub admin_actions_deadline: u64,
    pub future_pegged_admin: Option<Addr>,
    pub pegged_admin_deadline: u64,
}

#[cw_serde]
pub struct AsymmetryResponse {
    /// In 1e10
    pub asymmetry: u64,
    /// Rate-scaled pool balances
    pub balance_peg: Uint128,
    pub balance_pegged: Uint128,
}
