use cosmwasm_std::{to_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use crate::price_feed::{DecimalsResponse, QueryMsg as FeedQueryMsg, RoundDataResponse};

/// Build a cw20 transfer out of the sender's balance
pub fn cw20_transfer_msg(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}

/// Build a cw20 transfer spending the sender's allowance from `owner`
pub fn cw20_transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}

/// Query the decimals of a cw20 token
pub fn query_token_decimals(querier: QuerierWrapper, token: &Addr) -> StdResult<u8> {
    let token_info: TokenInfoResponse =
        querier.query_wasm_smart(token.to_string(), &Cw20QueryMsg::TokenInfo {})?;

    Ok(token_info.decimals)
}

/// Query the precision a price feed answers in
pub fn query_feed_decimals(querier: QuerierWrapper, price_feed: &Addr) -> StdResult<u8> {
    let res: DecimalsResponse =
        querier.query_wasm_smart(price_feed.to_string(), &FeedQueryMsg::Decimals {})?;

    Ok(res.decimals)
}

/// Query a price feed's latest round
pub fn query_latest_round(querier: QuerierWrapper, price_feed: &Addr) -> StdResult<RoundDataResponse> {
    querier.query_wasm_smart(price_feed.to_string(), &FeedQueryMsg::LatestRoundData {})
}

/// An empty or blank address string stands for "no address"
pub fn is_null_address(address: &str) -> bool {
    address.trim().is_empty()
}
