use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Cw20(#[from] cw20_base::ContractError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Recipient can't be the null address")]
    ZeroAddressTarget {},

    #[error("Amount must be more than zero")]
    NonPositiveAmount {},

    #[error("Burn amount exceeds balance: {balance} < {amount}")]
    InsufficientBalance { balance: Uint128, amount: Uint128 },
}
