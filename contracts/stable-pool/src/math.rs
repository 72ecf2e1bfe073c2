use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

use pegkeeper::math::{to_u128, u256, A_PRECISION, FEE_DENOMINATOR, N_COINS, PRECISION};
use pegkeeper::stable_pool::Config;

const MAX_ITERATIONS: usize = 255;

/// Result of a deposit
#[derive(Debug, PartialEq)]
pub struct Deposit {
    pub mint_amount: Uint128,
    pub fees: [Uint128; N_COINS],
    /// Accounted balances after the admin share of fees is taken out
    pub balances: [Uint128; N_COINS],
}

/// Result of an imbalanced withdrawal
#[derive(Debug, PartialEq)]
pub struct Withdrawal {
    pub burn_amount: Uint128,
    pub fees: [Uint128; N_COINS],
    pub balances: [Uint128; N_COINS],
}

/// Result of a single coin withdrawal
#[derive(Debug, PartialEq)]
pub struct OneCoin {
    pub dy: Uint128,
    pub fee: Uint128,
    pub balances: [Uint128; N_COINS],
}

/// Result of a swap
#[derive(Debug, PartialEq)]
pub struct Swap {
    pub dy: Uint128,
    pub fee: Uint128,
    pub balances: [Uint128; N_COINS],
}

fn n_coins() -> Uint256 {
    Uint256::from(N_COINS as u128)
}

fn converged(current: Uint256, previous: Uint256) -> bool {
    if current > previous {
        current - previous <= Uint256::from(1u128)
    } else {
        previous - current <= Uint256::from(1u128)
    }
}

fn abs_diff(a: Uint256, b: Uint256) -> Uint256 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// StableSwap invariant D for rate-scaled balances
pub fn get_d(xp: &[Uint256; N_COINS], amp: Uint256) -> StdResult<Uint256> {
    let n = n_coins();
    let a_precision = Uint256::from(A_PRECISION);

    let s = xp.iter().fold(Uint256::zero(), |acc, x| acc + *x);
    if s.is_zero() {
        return Ok(Uint256::zero());
    }
    if xp.iter().any(|x| x.is_zero()) {
        return Err(StdError::generic_err("Pool can't hold a zero balance"));
    }

    let ann = amp * n;
    let mut d = s;
    for _ in 0..MAX_ITERATIONS {
        let mut d_p = d;
        for x in xp.iter() {
            d_p = d_p * d / (*x * n);
        }
        let d_prev = d;
        d = (ann * s / a_precision + d_p * n) * d
            / ((ann - a_precision) * d / a_precision + (n + Uint256::from(1u128)) * d_p);

        if converged(d, d_prev) {
            return Ok(d);
        }
    }

    Err(StdError::generic_err("D didn't converge"))
}

/// Newton iteration for `y^2 + b*y = c` shared by [`get_y`] and [`get_y_d`]
fn solve_y(c: Uint256, b: Uint256, d: Uint256) -> StdResult<Uint256> {
    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let y_prev = y;
        y = (y * y + c) / (y * Uint256::from(2u128) + b - d);

        if converged(y, y_prev) {
            return Ok(y);
        }
    }

    Err(StdError::generic_err("y didn't converge"))
}

/// New balance of coin `j` when coin `i` is set to `x`, holding D constant
pub fn get_y(i: usize, j: usize, x: Uint256, xp: &[Uint256; N_COINS], amp: Uint256) -> StdResult<Uint256> {
    if i == j || i >= N_COINS || j >= N_COINS {
        return Err(StdError::generic_err("Invalid coin index"));
    }
    let n = n_coins();
    let a_precision = Uint256::from(A_PRECISION);
    let d = get_d(xp, amp)?;
    let ann = amp * n;

    let mut c = d;
    let mut s = Uint256::zero();
    for k in 0..N_COINS {
        let x_k = if k == i {
            x
        } else if k != j {
            xp[k]
        } else {
            continue;
        };
        s += x_k;
        c = c * d / (x_k * n);
    }
    c = c * d * a_precision / (ann * n);
    let b = s + d * a_precision / ann;

    solve_y(c, b, d)
}

/// Balance of coin `i` that brings the invariant to `d`
pub fn get_y_d(i: usize, xp: &[Uint256; N_COINS], d: Uint256, amp: Uint256) -> StdResult<Uint256> {
    if i >= N_COINS {
        return Err(StdError::generic_err("Invalid coin index"));
    }
    let n = n_coins();
    let a_precision = Uint256::from(A_PRECISION);
    let ann = amp * n;

    let mut c = d;
    let mut s = Uint256::zero();
    for (k, x_k) in xp.iter().enumerate() {
        if k == i {
            continue;
        }
        s += *x_k;
        c = c * d / (*x_k * n);
    }
    c = c * d * a_precision / (ann * n);
    let b = s + d * a_precision / ann;

    solve_y(c, b, d)
}

/// Invariant math for one pool, fees included unless built with [`StableSwap::feeless`]
pub struct StableSwap {
    pub amp: Uint256,
    pub rates: [Uint128; N_COINS],
    pub fee: Uint256,
    pub admin_fee: Uint256,
}

impl StableSwap {
    pub fn new(config: &Config) -> Self {
        StableSwap {
            amp: Uint256::from(u128::from(config.amp)),
            rates: config.rates,
            fee: Uint256::from(u128::from(config.fee)),
            admin_fee: Uint256::from(u128::from(config.admin_fee)),
        }
    }

    /// Same curve with fees switched off, used for the peg keeper entry points
    pub fn feeless(config: &Config) -> Self {
        StableSwap {
            fee: Uint256::zero(),
            admin_fee: Uint256::zero(),
            ..StableSwap::new(config)
        }
    }

    fn fee_denominator() -> Uint256 {
        Uint256::from(FEE_DENOMINATOR)
    }

    /// Fee charged on the imbalanced part of a deposit or withdrawal
    fn base_fee(&self) -> Uint256 {
        let n = n_coins();
        self.fee * n / (Uint256::from(4u128) * (n - Uint256::from(1u128)))
    }

    pub fn xp(&self, balances: &[Uint128; N_COINS]) -> [Uint256; N_COINS] {
        let mut xp = [Uint256::zero(); N_COINS];
        for (i, balance) in balances.iter().enumerate() {
            xp[i] = u256(*balance) * u256(self.rates[i]) / Uint256::from(PRECISION);
        }
        xp
    }

    pub fn get_d_mem(&self, balances: &[Uint128; N_COINS]) -> StdResult<Uint256> {
        get_d(&self.xp(balances), self.amp)
    }

    /// D * 1e18 / supply, 0 for an empty pool
    pub fn virtual_price(&self, balances: &[Uint128; N_COINS], supply: Uint128) -> StdResult<Uint128> {
        if supply.is_zero() {
            return Ok(Uint128::zero());
        }
        let d = self.get_d_mem(balances)?;
        to_u128(d * Uint256::from(PRECISION) / u256(supply))
    }

    /// Charges the imbalance fee against `ideal = d1 * old / d0` for each coin.
    /// Returns (fees, accounted balances, balances used for the post-fee invariant).
    #[allow(clippy::type_complexity)]
    fn charge_imbalance_fees(
        &self,
        old_balances: &[Uint128; N_COINS],
        new_balances: &[Uint128; N_COINS],
        d0: Uint256,
        d1: Uint256,
    ) -> StdResult<([Uint128; N_COINS], [Uint128; N_COINS], [Uint128; N_COINS])> {
        let base_fee = self.base_fee();
        let mut fees = [Uint128::zero(); N_COINS];
        let mut stored = *new_balances;
        let mut reduced = *new_balances;

        for i in 0..N_COINS {
            let ideal_balance = d1 * u256(old_balances[i]) / d0;
            let difference = abs_diff(ideal_balance, u256(new_balances[i]));
            let fee = to_u128(base_fee * difference / Self::fee_denominator())?;
            let admin_part = to_u128(u256(fee) * self.admin_fee / Self::fee_denominator())?;

            fees[i] = fee;
            stored[i] = new_balances[i].checked_sub(admin_part)?;
            reduced[i] = new_balances[i].checked_sub(fee)?;
        }

        Ok((fees, stored, reduced))
    }

    pub fn add_liquidity(
        &self,
        balances: &[Uint128; N_COINS],
        supply: Uint128,
        amounts: &[Uint128; N_COINS],
    ) -> StdResult<Deposit> {
        let d0 = self.get_d_mem(balances)?;

        let mut new_balances = *balances;
        for i in 0..N_COINS {
            new_balances[i] = new_balances[i].checked_add(amounts[i])?;
        }
        let d1 = self.get_d_mem(&new_balances)?;
        if d1 <= d0 {
            return Err(StdError::generic_err("Deposit doesn't increase D"));
        }

        if supply.is_zero() {
            return Ok(Deposit {
                mint_amount: to_u128(d1)?,
                fees: [Uint128::zero(); N_COINS],
                balances: new_balances,
            });
        }

        let (fees, stored, reduced) = self.charge_imbalance_fees(balances, &new_balances, d0, d1)?;
        let d2 = self.get_d_mem(&reduced)?;
        let mint_amount = to_u128(u256(supply) * (d2 - d0) / d0)?;

        Ok(Deposit {
            mint_amount,
            fees,
            balances: stored,
        })
    }

    pub fn remove_liquidity_imbalance(
        &self,
        balances: &[Uint128; N_COINS],
        supply: Uint128,
        amounts: &[Uint128; N_COINS],
    ) -> StdResult<Withdrawal> {
        if supply.is_zero() {
            return Err(StdError::generic_err("Pool is empty"));
        }
        let d0 = self.get_d_mem(balances)?;

        let mut new_balances = *balances;
        for i in 0..N_COINS {
            new_balances[i] = new_balances[i].checked_sub(amounts[i])?;
        }
        let d1 = self.get_d_mem(&new_balances)?;

        let (fees, stored, reduced) = self.charge_imbalance_fees(balances, &new_balances, d0, d1)?;
        let d2 = self.get_d_mem(&reduced)?;

        let burn_amount = to_u128((d0 - d2) * u256(supply) / d0 + Uint256::from(1u128))?;
        if burn_amount <= Uint128::new(1) {
            return Err(StdError::generic_err("Zero tokens burned"));
        }

        Ok(Withdrawal {
            burn_amount,
            fees,
            balances: stored,
        })
    }

    pub fn withdraw_one_coin(
        &self,
        balances: &[Uint128; N_COINS],
        supply: Uint128,
        token_amount: Uint128,
        i: usize,
    ) -> StdResult<OneCoin> {
        if i >= N_COINS {
            return Err(StdError::generic_err("Invalid coin index"));
        }
        if supply.is_zero() || token_amount > supply {
            return Err(StdError::generic_err("Burn amount exceeds supply"));
        }
        let xp = self.xp(balances);
        let d0 = get_d(&xp, self.amp)?;
        let d1 = d0 - u256(token_amount) * d0 / u256(supply);
        let new_y = get_y_d(i, &xp, d1, self.amp)?;

        let base_fee = self.base_fee();
        let mut xp_reduced = xp;
        for (j, xp_j) in xp.iter().enumerate() {
            let dx_expected = if j == i {
                (*xp_j * d1 / d0).saturating_sub(new_y)
            } else {
                *xp_j - *xp_j * d1 / d0
            };
            xp_reduced[j] = *xp_j - base_fee * dx_expected / Self::fee_denominator();
        }

        let precision = Uint256::from(PRECISION);
        let rate = u256(self.rates[i]);
        let dy = xp_reduced[i] - get_y_d(i, &xp_reduced, d1, self.amp)?;
        //Withdraw less to account for rounding errors
        let dy = dy.saturating_sub(Uint256::from(1u128)) * precision / rate;
        let dy_0 = (xp[i] - new_y) * precision / rate;

        let dy = to_u128(dy)?;
        let fee = to_u128(dy_0.saturating_sub(u256(dy)))?;
        let admin_part = to_u128(u256(fee) * self.admin_fee / Self::fee_denominator())?;

        let mut stored = *balances;
        stored[i] = stored[i].checked_sub(dy.checked_add(admin_part)?)?;

        Ok(OneCoin {
            dy,
            fee,
            balances: stored,
        })
    }

    pub fn exchange(
        &self,
        balances: &[Uint128; N_COINS],
        i: usize,
        j: usize,
        dx: Uint128,
    ) -> StdResult<Swap> {
        if i == j || i >= N_COINS || j >= N_COINS {
            return Err(StdError::generic_err("Invalid coin index"));
        }
        let precision = Uint256::from(PRECISION);
        let xp = self.xp(balances);

        let x = xp[i] + u256(dx) * u256(self.rates[i]) / precision;
        let y = get_y(i, j, x, &xp, self.amp)?;
        let dy = xp[j]
            .checked_sub(y)?
            .saturating_sub(Uint256::from(1u128));
        let dy_fee = dy * self.fee / Self::fee_denominator();

        //Back to real units
        let rate_j = u256(self.rates[j]);
        let dy_out = to_u128((dy - dy_fee) * precision / rate_j)?;
        let admin_part = to_u128(dy_fee * self.admin_fee / Self::fee_denominator() * precision / rate_j)?;

        let mut stored = *balances;
        stored[i] = stored[i].checked_add(dx)?;
        stored[j] = stored[j].checked_sub(dy_out.checked_add(admin_part)?)?;

        Ok(Swap {
            dy: dy_out,
            fee: to_u128(dy_fee * precision / rate_j)?,
            balances: stored,
        })
    }

    /// LP minted or burned for `amounts`, fees not included
    pub fn calc_token_amount(
        &self,
        balances: &[Uint128; N_COINS],
        supply: Uint128,
        amounts: &[Uint128; N_COINS],
        is_deposit: bool,
    ) -> StdResult<Uint128> {
        let d0 = self.get_d_mem(balances)?;
        let mut new_balances = *balances;
        for i in 0..N_COINS {
            new_balances[i] = if is_deposit {
                new_balances[i].checked_add(amounts[i])?
            } else {
                new_balances[i].checked_sub(amounts[i])?
            };
        }
        let d1 = self.get_d_mem(&new_balances)?;

        if supply.is_zero() {
            return if is_deposit { to_u128(d1) } else { Ok(Uint128::zero()) };
        }
        let diff = abs_diff(d1, d0);

        to_u128(diff * u256(supply) / d0)
    }
}
