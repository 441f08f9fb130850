use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Accepted collateral cw20 contracts, in enumeration order
    pub collateral_tokens: Vec<String>,
    /// Price feed for each collateral token, index-aligned with `collateral_tokens`
    pub price_feeds: Vec<String>,
    /// Debt token contract.
    /// Its ownership must be handed to the engine before debt can be minted.
    pub debt_token: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pull collateral from the sender into the engine.
    /// Requires a cw20 allowance for the engine.
    DepositCollateral {
        /// Collateral cw20 contract
        token: String,
        amount: Uint128,
    },
    /// Mint debt tokens to the sender against their deposited collateral
    MintDebt {
        amount: Uint128,
    },
    /// Deposit collateral and mint debt in one atomic call
    DepositCollateralAndMintDebt {
        token: String,
        collateral_amount: Uint128,
        debt_amount: Uint128,
    },
    /// Send deposited collateral back to the sender
    RedeemCollateral {
        token: String,
        amount: Uint128,
    },
    /// Repay debt, then redeem collateral
    RedeemCollateralForDebt {
        token: String,
        collateral_amount: Uint128,
        debt_amount: Uint128,
    },
    /// Repay debt with the sender's debt tokens.
    /// Requires a debt token allowance for the engine.
    BurnDebt {
        amount: Uint128,
    },
    /// Repay part of an undercollateralized user's debt in exchange for
    /// their collateral plus the liquidation bonus
    Liquidate {
        /// Collateral to seize
        collateral_token: String,
        /// Position owner being liquidated
        user: String,
        /// Debt repaid by the liquidator, in unit-of-account
        debt_to_cover: Uint128,
    },
    /// Callbacks; only callable by the contract
    Callback(CallbackMsg),
}

/// Note: CallbackMsg is always sent by the contract itself
#[cw_serde]
pub enum CallbackMsg {
    /// Clears the re-entrancy lock once every message of the outer call has run
    ReleaseLock {},
}

#[cw_serde]
pub enum QueryMsg {
    /// Returns the contract's config
    Config {},
    /// Returns accepted collateral tokens in enumeration order
    CollateralTokens {},
    /// Returns the price feed registered for a collateral token
    CollateralTokenPriceFeed { token: String },
    /// Returns a user's deposited balance of one collateral token
    CollateralBalanceOfUser { user: String, token: String },
    /// Returns (debt minted, collateral value) for a user
    AccountInformation { user: String },
    /// Returns the unit-of-account value of all of a user's collateral
    AccountCollateralValue { user: String },
    /// Returns a user's current health factor
    HealthFactor { user: String },
    /// Health factor for an arbitrary debt/collateral-value pair
    CalculateHealthFactor {
        total_debt_minted: Uint128,
        collateral_value_in_usd: Uint128,
    },
    /// Unit-of-account value of `amount` of a collateral token
    UsdValue { token: String, amount: Uint128 },
    /// Collateral token amount worth `usd_amount`
    TokenAmountFromUsd { token: String, usd_amount: Uint128 },
    /// Returns the engine's fixed risk constants
    RiskParameters {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct Config {
    /// Debt token contract
    pub debt_token: Addr,
    /// Accepted collateral tokens, in enumeration order
    pub collateral_tokens: Vec<Addr>,
}

/// Price feed registry entry for one collateral token
#[cw_serde]
pub struct CollateralInfo {
    pub token: Addr,
    pub price_feed: Addr,
    /// Decimals of the collateral cw20
    pub token_decimals: u8,
    /// Decimals of the feed's answer
    pub feed_decimals: u8,
}

#[cw_serde]
pub struct AccountInformationResponse {
    pub total_debt_minted: Uint128,
    pub collateral_value_in_usd: Uint128,
}

#[cw_serde]
pub struct RiskParametersResponse {
    /// Fixed-point scale of debt and valuations
    pub precision: Uint128,
    /// Percent of collateral value counted toward safety
    pub liquidation_threshold: Uint128,
    pub liquidation_precision: Uint128,
    /// Percent premium paid to liquidators in seized collateral
    pub liquidation_bonus: Uint128,
    pub min_health_factor: Decimal,
}
