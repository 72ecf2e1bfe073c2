use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use pegkeeper::math::N_COINS;
use pegkeeper::stable_pool::{Config, PendingFeeResponse};
use pegkeeper::types::PegKeeperLedger;

pub const CONFIG: Item<Config> = Item::new("config");
/// Accounted reserves, net of admin fees
pub const BALANCES: Item<[Uint128; N_COINS]> = Item::new("balances");
pub const TOTAL_SUPPLY: Item<Uint128> = Item::new("total_supply");
pub const LP_BALANCES: Map<&Addr, Uint128> = Map::new("lp_balances");
pub const PENDING_FEE: Item<PendingFeeResponse> = Item::new("pending_fee");
pub const PEG_KEEPER_LEDGER: Item<PegKeeperLedger> = Item::new("peg_keeper_ledger");
