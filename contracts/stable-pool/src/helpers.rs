use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};

use pegkeeper::math::N_COINS;
use pegkeeper::stable_pool::{BalancesResponse, ExecuteMsg, QueryMsg};

/// StablePoolContract is a wrapper around Addr that provides a lot of helpers
/// for working with this.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct StablePoolContract(pub Addr);

impl StablePoolContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<ExecuteMsg>>(&self, msg: T) -> StdResult<CosmosMsg> {
        let msg = to_json_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn balances(&self, querier: QuerierWrapper) -> StdResult<[Uint128; N_COINS]> {
        let resp: BalancesResponse = querier.query_wasm_smart(self.addr(), &QueryMsg::Balances {})?;
        Ok(resp.balances)
    }

    pub fn virtual_price(&self, querier: QuerierWrapper) -> StdResult<Uint128> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::GetVirtualPrice {})
    }

    pub fn lp_balance(&self, querier: QuerierWrapper, address: &Addr) -> StdResult<Uint128> {
        querier.query_wasm_smart(
            self.addr(),
            &QueryMsg::BalanceOf {
                address: address.to_string(),
            },
        )
    }
}
