use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Expiration;

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    /// Defaults to 18, the unit-of-account precision
    pub decimals: Option<u8>,
    /// Holder of the mint/burn capability.
    /// Defaults to the sender.
    pub owner: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Standard cw20 transfer
    Transfer { recipient: String, amount: Uint128 },
    /// Standard cw20 send with a receive hook
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    SendFrom {
        owner: String,
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    /// Owner only. Create `amount` new tokens for `recipient`.
    Mint { recipient: String, amount: Uint128 },
    /// Owner only. Destroy `amount` of the owner's own tokens.
    Burn { amount: Uint128 },
    /// Owner only. Hand the mint/burn capability to `new_owner`.
    TransferOwnership { new_owner: String },
}

#[cw_serde]
pub enum QueryMsg {
    /// Returns cw20::BalanceResponse
    Balance { address: String },
    /// Returns cw20::TokenInfoResponse
    TokenInfo {},
    /// Returns cw20::AllowanceResponse
    Allowance { owner: String, spender: String },
    /// Returns OwnerResponse
    Owner {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}
