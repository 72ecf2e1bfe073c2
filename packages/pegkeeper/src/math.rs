use std::convert::TryFrom;

use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

/// Number of coins in a pool
pub const N_COINS: usize = 2;
/// 1e18, rate multipliers and virtual price are expressed in it
pub const PRECISION: u128 = 1_000_000_000_000_000_000;
/// Pool fees are fractions of 1e10
pub const FEE_DENOMINATOR: u128 = 10_000_000_000;
/// Maximum pool swap fee, 50%
pub const MAX_FEE: u128 = 5_000_000_000;
/// Amplification coefficients are stored multiplied by this
pub const A_PRECISION: u128 = 100;
/// Asymmetry is a fraction of 1e10
pub const ASYMMETRY_PRECISION: u128 = 10_000_000_000;
/// Caller share is a fraction of 1e5
pub const SHARE_PRECISION: u128 = 100_000;
/// LP amount the keeper holds back from the reported profit
pub const PROFIT_THRESHOLD: u128 = PRECISION;
/// Keeper acts on 1/5 of the imbalance per update
pub const ACTION_DIVISOR: u128 = 5;

pub fn u256(value: Uint128) -> Uint256 {
    Uint256::from(value)
}

pub fn to_u128(value: Uint256) -> StdResult<Uint128> {
    Ok(Uint128::try_from(value)?)
}

/// Converts a raw coin balance into 1e18-normalised units
pub fn scale(amount: Uint128, rate: Uint128) -> StdResult<Uint256> {
    Ok(u256(amount).checked_mul(u256(rate))? / Uint256::from(PRECISION))
}

/// Inverse of [`scale`], floors
pub fn unscale(amount: Uint256, rate: Uint128) -> StdResult<Uint128> {
    if rate.is_zero() {
        return Err(StdError::generic_err("Rate multiplier can't be zero"));
    }
    to_u128(amount.checked_mul(Uint256::from(PRECISION))? / u256(rate))
}

/// How far a two-sided balance is from 1:1.
///
/// `1e10 - 4e10 * x * y / (x + y)^2`, so a balanced pool gives 0 and a one-sided pool
/// gives 1e10. An empty pool counts as balanced.
pub fn asymmetry(x: Uint256, y: Uint256) -> StdResult<Uint256> {
    let sum = x.checked_add(y)?;
    if sum.is_zero() {
        return Ok(Uint256::zero());
    }
    let precision = Uint256::from(ASYMMETRY_PRECISION);
    let product = Uint256::from(4u128 * ASYMMETRY_PRECISION)
        .checked_mul(x)?
        .checked_mul(y)?;
    let balanced_share = product / sum.checked_mul(sum)?;

    Ok(precision.saturating_sub(balanced_share))
}

/// Profit the keeper can release: LP held beyond what backs its debt, less [`PROFIT_THRESHOLD`]
pub fn calc_profit(
    lp_balance: Uint128,
    debt: Uint128,
    virtual_price: Uint128,
) -> StdResult<Uint128> {
    let aim_profit = aim_profit(lp_balance, debt, virtual_price)?;

    Ok(aim_profit.saturating_sub(Uint128::new(PROFIT_THRESHOLD)))
}

/// LP held beyond what backs the debt at the current virtual price, floored at zero
pub fn aim_profit(
    lp_balance: Uint128,
    debt: Uint128,
    virtual_price: Uint128,
) -> StdResult<Uint128> {
    if virtual_price.is_zero() {
        return Ok(lp_balance);
    }
    let lp_debt = to_u128(
        u256(debt).checked_mul(Uint256::from(PRECISION))? / u256(virtual_price),
    )?;

    Ok(lp_balance.saturating_sub(lp_debt))
}

/// `amount * share / 1e5`
pub fn apply_share(amount: Uint128, share: u64) -> StdResult<Uint128> {
    to_u128(u256(amount).checked_mul(Uint256::from(u128::from(share)))? / Uint256::from(SHARE_PRECISION))
}
