use cosmwasm_std::{Decimal, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Collateral token and price feed lists differ in length: {tokens} != {price_feeds}")]
    LengthMismatch { tokens: usize, price_feeds: usize },

    #[error("At least one collateral token is required")]
    NoCollateral {},

    #[error("Collateral token listed twice: {token}")]
    DuplicateCollateral { token: String },

    #[error("Amount needs to be more than zero")]
    NeedsMoreThanZero {},

    #[error("Token not allowed as collateral: {token}")]
    TokenNotAllowed { token: String },

    #[error("Operation already in progress, re-entrant call rejected")]
    ReentrantCall {},

    #[error("Health factor is below minimum: {health_factor}")]
    HealthFactorIsBelowMinimum { health_factor: Decimal },

    #[error("Health factor is ok, position can't be liquidated: {health_factor}")]
    HealthFactorOk { health_factor: Decimal },

    #[error("Liquidation didn't improve the health factor: {starting} -> {ending}")]
    HealthFactorNotImproved { starting: Decimal, ending: Decimal },

    #[error("Insufficient collateral: {deposited} deposited, {requested} requested")]
    InsufficientCollateral { deposited: Uint128, requested: Uint128 },

    #[error("Repayment exceeds outstanding debt: {debt} < {repayment}")]
    ExcessRepayment { debt: Uint128, repayment: Uint128 },

    #[error("Price feed returned an invalid price for {token}")]
    InvalidPrice { token: String },

    #[error("Collateral deposit failed: {reason}")]
    CollateralDepositFailed { reason: String },

    #[error("Collateral redemption failed: {reason}")]
    CollateralRedeemFailed { reason: String },

    #[error("Debt token transfer for burn failed: {reason}")]
    BurnDebtTransferFailed { reason: String },

    #[error("Debt token burn failed: {reason}")]
    BurnFailed { reason: String },

    #[error("Debt token mint failed: {reason}")]
    MintFailed { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
