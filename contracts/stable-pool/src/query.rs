use cosmwasm_std::{Deps, Env, StdError, StdResult, Uint128};

use crate::math::StableSwap;
use crate::state::{BALANCES, CONFIG, TOTAL_SUPPLY};
use pegkeeper::helpers::query_token_balance;
use pegkeeper::math::N_COINS;
use pegkeeper::stable_pool::{BalancesResponse, QueryMsg};

pub fn query_virtual_price(deps: Deps) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;

    StableSwap::new(&config).virtual_price(&balances, supply)
}

/// Token balances held above the accounted reserves
pub fn query_admin_balances(deps: Deps, env: Env) -> StdResult<BalancesResponse> {
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;

    let mut admin_balances = [Uint128::zero(); N_COINS];
    for i in 0..N_COINS {
        let held = query_token_balance(deps.querier, &config.coins[i], &env.contract.address)?;
        admin_balances[i] = held.saturating_sub(balances[i]);
    }

    Ok(BalancesResponse {
        balances: admin_balances,
    })
}

/// Pricing queries that run the pool math without touching state
pub fn query_calc(deps: Deps, msg: QueryMsg) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    let balances = BALANCES.load(deps.storage)?;
    let supply = TOTAL_SUPPLY.load(deps.storage)?;
    let swap = StableSwap::new(&config);

    let pegged_index = || -> StdResult<usize> {
        config
            .peg_keeper
            .as_ref()
            .map(|binding| binding.pegged_index)
            .ok_or_else(|| StdError::generic_err("No peg keeper bound"))
    };

    match msg {
        QueryMsg::CalcTokenAmount { amounts, is_deposit } => {
            swap.calc_token_amount(&balances, supply, &amounts, is_deposit)
        }
        QueryMsg::CalcWithdrawOneCoin { token_amount, i } => {
            Ok(swap.withdraw_one_coin(&balances, supply, token_amount, i)?.dy)
        }
        QueryMsg::CalcRemoveImbalance { amounts } => {
            Ok(swap.remove_liquidity_imbalance(&balances, supply, &amounts)?.burn_amount)
        }
        QueryMsg::CalcPegKeeperRemove { amount } => {
            let mut amounts = [Uint128::zero(); N_COINS];
            amounts[pegged_index()?] = amount;
            Ok(StableSwap::feeless(&config)
                .remove_liquidity_imbalance(&balances, supply, &amounts)?
                .burn_amount)
        }
        QueryMsg::CalcPegKeeperRemoveViaToken { token_amount } => Ok(StableSwap::feeless(&config)
            .withdraw_one_coin(&balances, supply, token_amount, pegged_index()?)?
            .dy),
        QueryMsg::GetDy { i, j, dx } => Ok(swap.exchange(&balances, i, j, dx)?.dy),
        _ => Err(StdError::generic_err("Not a pricing query")),
    }
}
