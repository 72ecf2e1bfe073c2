use cosmwasm_std::{Deps, Env, QuerierWrapper, StdResult, Uint128, Uint256};

use crate::state::{CONFIG, PEGGED_ADMIN_CHANGE, STAFF_CHANGE, STATE};
use pegkeeper::helpers::{query_lp_balance, query_pool_balances, query_pool_config, query_virtual_price};
use pegkeeper::math::{asymmetry, calc_profit, scale, to_u128};
use pegkeeper::peg_keeper::{AsymmetryResponse, Config, StateResponse};
use pegkeeper::stable_pool::Config as PoolConfig;

/// Pool reserves as seen by the keeper, scaled by the pool's rate multipliers
pub struct PoolView {
    pub config: PoolConfig,
    pub balance_peg: Uint256,
    pub balance_pegged: Uint256,
}

impl PoolView {
    pub fn asymmetry(&self) -> StdResult<Uint256> {
        asymmetry(self.balance_peg, self.balance_pegged)
    }
}

pub fn query_pool_view(querier: QuerierWrapper, config: &Config) -> StdResult<PoolView> {
    let pool_config = query_pool_config(querier, &config.pool)?;
    let balances = query_pool_balances(querier, &config.pool)?.balances;
    let peg_index = 1 - config.pegged_index;

    Ok(PoolView {
        balance_peg: scale(balances[peg_index], pool_config.rates[peg_index])?,
        balance_pegged: scale(
            balances[config.pegged_index],
            pool_config.rates[config.pegged_index],
        )?,
        config: pool_config,
    })
}

/// Harvestable LP held by the keeper
pub fn query_profit(
    querier: QuerierWrapper,
    env: &Env,
    config: &Config,
    debt: Uint128,
) -> StdResult<Uint128> {
    let lp_balance = query_lp_balance(querier, &config.pool, &env.contract.address)?;
    let virtual_price = query_virtual_price(querier, &config.pool)?;

    calc_profit(lp_balance, debt, virtual_price)
}

pub fn query_state(deps: Deps) -> StdResult<StateResponse> {
    let state = STATE.load(deps.storage)?;
    let staff_change = STAFF_CHANGE.load(deps.storage)?;
    let pegged_admin_change = PEGGED_ADMIN_CHANGE.load(deps.storage)?;

    Ok(StateResponse {
        debt: state.debt,
        last_change: state.last_change,
        future_admin: staff_change.future_admin,
        future_receiver: staff_change.future_receiver,
        admin_actions_deadline: staff_change.admin_actions_deadline,
        future_pegged_admin: pegged_admin_change.future,
        pegged_admin_deadline: pegged_admin_change.deadline,
    })
}

pub fn query_calc_profit(deps: Deps, env: Env) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;

    query_profit(deps.querier, &env, &config, state.debt)
}

pub fn query_asymmetry(deps: Deps) -> StdResult<AsymmetryResponse> {
    let config = CONFIG.load(deps.storage)?;
    let view = query_pool_view(deps.querier, &config)?;

    Ok(AsymmetryResponse {
        asymmetry: to_u128(view.asymmetry()?)?.u128() as u64,
        balance_peg: to_u128(view.balance_peg)?,
        balance_pegged: to_u128(view.balance_pegged)?,
    })
}
