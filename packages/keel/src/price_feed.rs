//! Interface of the external price source.
//! Feeds answer in their own precision, reported by `Decimals`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

#[cw_serde]
pub enum QueryMsg {
    /// Returns RoundDataResponse for the most recent round
    LatestRoundData {},
    /// Returns DecimalsResponse
    Decimals {},
}

#[cw_serde]
pub struct RoundDataResponse {
    pub round_id: u64,
    /// Price of one whole asset unit in unit-of-account, scaled by 10^decimals
    pub answer: Uint128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[cw_serde]
pub struct DecimalsResponse {
    pub decimals: u8,
}
