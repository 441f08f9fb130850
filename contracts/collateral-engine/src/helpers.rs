use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, WasmMsg};

use keel::engine::{ExecuteMsg, QueryMsg};

/// EngineContract is a wrapper around Addr that provides helpers
/// for calling & querying the engine.
#[cw_serde]
pub struct EngineContract(pub Addr);

impl EngineContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<ExecuteMsg>>(&self, msg: T) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn query<T: serde::de::DeserializeOwned>(
        &self,
        querier: &QuerierWrapper,
        msg: QueryMsg,
    ) -> StdResult<T> {
        querier.query_wasm_smart(self.addr(), &msg)
    }
}
