use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use pegkeeper::pegged_token::{Config, TokenInfoResponse};

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_INFO: Item<TokenInfoResponse> = Item::new("token_info");
pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");
//(owner, spender)
pub const ALLOWANCES: Map<(&Addr, &Addr), Uint128> = Map::new("allowances");
