use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::math::N_COINS;
use crate::types::{PegKeeperBinding, PegKeeperLedger};

#[cw_serde]
pub struct InstantiateMsg {
    /// Token contracts of the two pool coins
    pub coins: [String; N_COINS],
    /// Per-coin rate multipliers in 1e18, defaults to 1e18 for both
    pub rates: Option<[Uint128; N_COINS]>,
    /// Amplification coefficient, unscaled
    pub a: u64,
    /// Swap fee in 1e10
    pub fee: u64,
    /// Share of every fee kept for the owner, in 1e10
    pub admin_fee: u64,
    /// Smallest amount the peg keeper entry points accept
    pub min_coin_amount: Option<Uint128>,
    /// Defaults to the instantiator
    pub owner: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit coins for LP shares. Coins are pulled with `transfer_from`.
    AddLiquidity {
        amounts: [Uint128; N_COINS],
        min_mint_amount: Uint128,
    },
    /// Burn LP for both coins in proportion to the reserves
    RemoveLiquidity {
        amount: Uint128,
        min_amounts: [Uint128; N_COINS],
    },
    /// Withdraw exact coin amounts, burning at most `max_burn_amount` LP
    RemoveLiquidityImbalance {
        amounts: [Uint128; N_COINS],
        max_burn_amount: Uint128,
    },
    /// Burn LP for a single coin
    RemoveLiquidityOneCoin {
        token_amount: Uint128,
        i: usize,
        min_amount: Uint128,
    },
    /// Swap `dx` of coin `i` for at least `min_dy` of coin `j`
    Exchange {
        i: usize,
        j: usize,
        dx: Uint128,
        min_dy: Uint128,
    },
    /// Move LP shares
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    //////////////PEG KEEPER////////////////
    /// Feeless single-sided deposit of the pegged coin.
    /// Only callable by the bound peg keeper.
    PegKeeperAdd {
        amount: Uint128,
    },
    /// Feeless single-sided withdrawal of the pegged coin.
    /// Only callable by the bound peg keeper.
    PegKeeperRemove {
        amount: Uint128,
    },
    /// Feeless redemption of `token_amount` LP for the pegged coin.
    /// Only callable by the bound peg keeper, returns the amount as data.
    PegKeeperRemoveViaToken {
        token_amount: Uint128,
    },
    //////////////OWNER////////////////
    SetPegKeeper {
        /// None unbinds
        peg_keeper: Option<String>,
        pegged_index: usize,
        auto_update: bool,
    },
    CommitNewFee {
        fee: u64,
        admin_fee: u64,
    },
    ApplyNewFee {},
    RevertNewParameters {},
    /// Send accrued admin fees to the owner
    WithdrawAdminFees {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(BalancesResponse)]
    Balances {},
    /// D * 1e18 / LP supply
    #[returns(Uint128)]
    GetVirtualPrice {},
    #[returns(Uint128)]
    TotalSupply {},
    #[returns(Uint128)]
    BalanceOf { address: String },
    /// LP minted or burned for `amounts` without fees
    #[returns(Uint128)]
    CalcTokenAmount {
        amounts: [Uint128; N_COINS],
        is_deposit: bool,
    },
    /// coin `i` received for burning `token_amount` LP
    #[returns(Uint128)]
    CalcWithdrawOneCoin { token_amount: Uint128, i: usize },
    /// LP burned by `remove_liquidity_imbalance` for `amounts`
    #[returns(Uint128)]
    CalcRemoveImbalance { amounts: [Uint128; N_COINS] },
    /// LP burned by `peg_keeper_remove`
    #[returns(Uint128)]
    CalcPegKeeperRemove { amount: Uint128 },
    /// pegged coins received from `peg_keeper_remove_via_token`
    #[returns(Uint128)]
    CalcPegKeeperRemoveViaToken { token_amount: Uint128 },
    #[returns(Uint128)]
    GetDy { i: usize, j: usize, dx: Uint128 },
    #[returns(BalancesResponse)]
    AdminBalances {},
    #[returns(PegKeeperLedger)]
    PegKeeperLedger {},
    #[returns(PendingFeeResponse)]
    PendingFee {},
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub coins: [Addr; N_COINS],
    pub rates: [Uint128; N_COINS],
    /// Amplification times A_PRECISION
    pub amp: u64,
    pub fee: u64,
    pub admin_fee: u64,
    pub min_coin_amount: Uint128,
    pub peg_keeper: Option<PegKeeperBinding>,
}

#[cw_serde]
pub struct BalancesResponse {
    pub balances: [Uint128; N_COINS],
}

#[cw_serde]
pub struct PendingFeeResponse {
    pub future_fee: u64,
    pub future_admin_fee: u64,
    /// 0 when nothing is pending
    pub deadline: u64,
}
