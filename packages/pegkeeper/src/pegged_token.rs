use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Defaults to the instantiator
    pub owner: Option<String>,
    /// Addresses allowed to mint from the start
    pub minters: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    /// Spend `owner`'s balance within the caller's allowance
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
    },
    Burn {
        amount: Uint128,
    },
    BurnFrom {
        owner: String,
        amount: Uint128,
    },
    /// Only callable by minters
    Mint {
        recipient: String,
        amount: Uint128,
    },
    /// Owner only
    AddMinter {
        minter: String,
    },
    /// Owner only
    RemoveMinter {
        minter: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(BalanceResponse)]
    Balance { address: String },
    #[returns(TokenInfoResponse)]
    TokenInfo {},
    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },
    #[returns(MintersResponse)]
    Minters {},
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub minters: Vec<Addr>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct TokenInfoResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

#[cw_serde]
pub struct AllowanceResponse {
    pub allowance: Uint128,
}

#[cw_serde]
pub struct MintersResponse {
    pub owner: Addr,
    pub minters: Vec<Addr>,
}
