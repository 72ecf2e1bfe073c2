use cosmwasm_schema::cw_serde;

use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

use pegkeeper::peg_keeper::Config;
use pegkeeper::types::PendingChange;

#[cw_serde]
#[derive(Default)]
pub struct KeeperState {
    /// Pegged coins provided and not yet withdrawn
    pub debt: Uint128,
    /// Time of the last provide or withdraw
    pub last_change: u64,
}

/// Admin and receiver changes share one deadline
#[cw_serde]
#[derive(Default)]
pub struct StaffChange {
    pub future_admin: Option<Addr>,
    pub future_receiver: Option<Addr>,
    pub admin_actions_deadline: u64,
}

#[cw_serde]
pub struct ProfitAssurance {
    pub initial_profit: Uint128,
    /// Receives the caller share
    pub beneficiary: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const STATE: Item<KeeperState> = Item::new("state");
pub const STAFF_CHANGE: Item<StaffChange> = Item::new("staff_change");
pub const PEGGED_ADMIN_CHANGE: Item<PendingChange> = Item::new("pegged_admin_change");
pub const PROFIT_ASSURANCE: Item<ProfitAssurance> = Item::new("profit_assurance");
