use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};

use pegkeeper::peg_keeper::{Config, ExecuteMsg, QueryMsg, StateResponse};

/// PegKeeperContract is a wrapper around Addr that provides a lot of helpers
/// for working with this.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PegKeeperContract(pub Addr);

impl PegKeeperContract {
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

    /// Permissionless `update`, the caller share goes to `beneficiary` when set
    pub fn update(&self, beneficiary: Option<String>) -> StdResult<CosmosMsg> {
        self.call(ExecuteMsg::Update { beneficiary })
    }

    pub fn config(&self, querier: QuerierWrapper) -> StdResult<Config> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::Config {})
    }

    pub fn state(&self, querier: QuerierWrapper) -> StdResult<StateResponse> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::State {})
    }

    pub fn profit(&self, querier: QuerierWrapper) -> StdResult<Uint128> {
        querier.query_wasm_smart(self.addr(), &QueryMsg::CalcProfit {})
    }
}
