use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// Seconds between effectful keeper actions for the shipped presets
pub const DEFAULT_ACTION_DELAY: u64 = 15 * 60;
/// Seconds a committed role change waits before it can be applied
pub const ADMIN_ACTIONS_DELAY: u64 = 3 * 86_400;

/// How the keeper reaches the pool's liquidity
#[cw_serde]
pub enum PoolAccess {
    /// Feeless `peg_keeper_*` entry points, the keeper must be bound on the pool
    Privileged,
    /// The keeper is an ordinary LP and pays pool fees
    Public,
}

/// Where provided pegged coins come from
#[cw_serde]
pub enum PeggedSource {
    /// Minted on provide, burned on withdraw
    Mint,
    /// Drawn from the keeper's own balance, withdrawn coins are kept
    Reserve,
}

/// Behaviour switches that distinguish keeper flavours
#[cw_serde]
pub struct Capabilities {
    /// Only the pool may call `update`, `provide` and `withdraw`
    pub requires_pool_caller: bool,
    pub action_delay: u64,
    /// Pay part of each harvest to the `update` caller
    pub supports_caller_share: bool,
    pub pool_access: PoolAccess,
    pub pegged_source: PeggedSource,
}

impl Capabilities {
    /// Pool-driven keeper, updated as a side effect of pool operations
    pub fn template() -> Self {
        Capabilities {
            requires_pool_caller: true,
            action_delay: DEFAULT_ACTION_DELAY,
            supports_caller_share: false,
            pool_access: PoolAccess::Privileged,
            pegged_source: PeggedSource::Mint,
        }
    }

    /// Permissionless keeper bound to the pool's privileged entry points
    pub fn pluggable() -> Self {
        Capabilities {
            requires_pool_caller: false,
            action_delay: DEFAULT_ACTION_DELAY,
            supports_caller_share: true,
            pool_access: PoolAccess::Privileged,
            pegged_source: PeggedSource::Mint,
        }
    }

    /// Permissionless keeper that uses public pool liquidity operations
    pub fn optimized() -> Self {
        Capabilities {
            pool_access: PoolAccess::Public,
            ..Capabilities::pluggable()
        }
    }

    /// Like `optimized` but spends a pre-funded pegged reserve instead of minting
    pub fn reserve() -> Self {
        Capabilities {
            pegged_source: PeggedSource::Reserve,
            ..Capabilities::optimized()
        }
    }
}

/// A role change waiting out its delay
#[cw_serde]
#[derive(Default)]
pub struct PendingChange {
    pub future: Option<Addr>,
    /// 0 when nothing is pending
    pub deadline: u64,
}

impl PendingChange {
    pub fn is_active(&self) -> bool {
        self.deadline != 0
    }
}

/// Pool-side record of which keeper may use the privileged entry points
#[cw_serde]
pub struct PegKeeperBinding {
    pub peg_keeper: Addr,
    /// Coin the keeper adds and removes
    pub pegged_index: usize,
    /// Notify the keeper with `update` after every public liquidity operation and swap
    pub auto_update: bool,
}

/// Pool-side mirror of the keeper's position
#[cw_serde]
#[derive(Default)]
pub struct PegKeeperLedger {
    pub debt: Uint128,
    pub last_change: u64,
}
