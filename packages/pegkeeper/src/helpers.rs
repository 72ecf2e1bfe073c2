use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};

use crate::pegged_token::{BalanceResponse, ExecuteMsg as TokenExecuteMsg, QueryMsg as TokenQueryMsg};
use crate::stable_pool::{BalancesResponse, Config as PoolConfig, QueryMsg as PoolQueryMsg};

/// Returns `address`'s balance of a pegged-token contract
pub fn query_token_balance(
    querier: QuerierWrapper,
    token: &Addr,
    address: &Addr,
) -> StdResult<Uint128> {
    let resp: BalanceResponse = querier.query_wasm_smart(
        token.to_string(),
        &TokenQueryMsg::Balance {
            address: address.to_string(),
        },
    )?;

    Ok(resp.balance)
}

/// Builds an execute msg for a token contract
pub fn token_msg(token: &Addr, msg: &TokenExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Builds a token transfer from the calling contract
pub fn token_transfer_msg(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    token_msg(
        token,
        &TokenExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

/// Builds a token pull from `owner` to `recipient`, spending the caller's allowance
pub fn token_transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    token_msg(
        token,
        &TokenExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn query_pool_config(querier: QuerierWrapper, pool: &Addr) -> StdResult<PoolConfig> {
    querier.query_wasm_smart(pool.to_string(), &PoolQueryMsg::Config {})
}

pub fn query_pool_balances(querier: QuerierWrapper, pool: &Addr) -> StdResult<BalancesResponse> {
    querier.query_wasm_smart(pool.to_string(), &PoolQueryMsg::Balances {})
}

pub fn query_virtual_price(querier: QuerierWrapper, pool: &Addr) -> StdResult<Uint128> {
    querier.query_wasm_smart(pool.to_string(), &PoolQueryMsg::GetVirtualPrice {})
}

/// Returns `address`'s LP share balance in a stable pool
pub fn query_lp_balance(querier: QuerierWrapper, pool: &Addr, address: &Addr) -> StdResult<Uint128> {
    querier.query_wasm_smart(
        pool.to_string(),
        &PoolQueryMsg::BalanceOf {
            address: address.to_string(),
        },
    )
}
