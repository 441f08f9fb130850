use std::convert::TryFrom;

use cosmwasm_std::{Addr, Decimal, QuerierWrapper, StdError, StdResult, Storage, Uint128, Uint256};

use keel::engine::CollateralInfo;
use keel::helpers::query_latest_round;
use keel::math::{mul_div, pow10, PRECISION};

use crate::state::{collateral_deposited, debt_minted, CONFIG, PRICE_FEEDS};
use crate::ContractError;

/// Percent of collateral value counted toward safety, i.e. 200% collateralization
pub const LIQUIDATION_THRESHOLD: u128 = 50;
pub const LIQUIDATION_PRECISION: u128 = 100;
/// Percent of the covered debt paid to liquidators on top, in collateral
pub const LIQUIDATION_BONUS: u128 = 10;
/// 1.0
pub const MIN_HEALTH_FACTOR: Decimal = Decimal::raw(PRECISION);

/// Returns the registry entry for `token`, erroring if it isn't accepted collateral
pub fn registered_collateral(
    storage: &dyn Storage,
    token: &Addr,
) -> Result<CollateralInfo, ContractError> {
    PRICE_FEEDS
        .may_load(storage, token)?
        .ok_or_else(|| ContractError::TokenNotAllowed {
            token: token.to_string(),
        })
}

/// Spot price from the collateral's feed, in the feed's precision
pub fn read_price(
    querier: QuerierWrapper,
    collateral: &CollateralInfo,
) -> Result<Uint128, ContractError> {
    let round = query_latest_round(querier, &collateral.price_feed)?;

    if round.answer.is_zero() {
        return Err(ContractError::InvalidPrice {
            token: collateral.token.to_string(),
        });
    }

    Ok(round.answer)
}

/// Unit-of-account value of `amount` at `price`.
/// price * amount * 10^18 / (10^feed_decimals * 10^token_decimals)
pub fn usd_value_at_price(
    collateral: &CollateralInfo,
    price: Uint128,
    amount: Uint128,
) -> StdResult<Uint128> {
    let scale = pow10(collateral.feed_decimals)?.checked_mul(pow10(collateral.token_decimals)?)?;
    let price_amount = Uint256::from(price).checked_mul(Uint256::from(amount))?;

    mul_div(price_amount, Uint256::from(PRECISION), scale)
}

/// Collateral amount worth `usd_amount` at `price`, rounded down.
/// usd_amount * 10^feed_decimals * 10^token_decimals / (price * 10^18)
pub fn token_amount_at_price(
    collateral: &CollateralInfo,
    price: Uint128,
    usd_amount: Uint128,
) -> StdResult<Uint128> {
    let scale = pow10(collateral.feed_decimals)?.checked_mul(pow10(collateral.token_decimals)?)?;
    let scaled_price = Uint256::from(price).checked_mul(Uint256::from(PRECISION))?;

    mul_div(Uint256::from(usd_amount), scale, scaled_price)
}

pub fn usd_value(
    storage: &dyn Storage,
    querier: QuerierWrapper,
    token: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let collateral = registered_collateral(storage, token)?;
    let price = read_price(querier, &collateral)?;

    Ok(usd_value_at_price(&collateral, price, amount)?)
}

pub fn token_amount_from_usd(
    storage: &dyn Storage,
    querier: QuerierWrapper,
    token: &Addr,
    usd_amount: Uint128,
) -> Result<Uint128, ContractError> {
    let collateral = registered_collateral(storage, token)?;
    let price = read_price(querier, &collateral)?;

    Ok(token_amount_at_price(&collateral, price, usd_amount)?)
}

/// Sum of the user's deposits at spot prices
pub fn account_collateral_value(
    storage: &dyn Storage,
    querier: QuerierWrapper,
    user: &Addr,
) -> Result<Uint128, ContractError> {
    let config = CONFIG.load(storage)?;
    let mut total = Uint128::zero();

    for token in config.collateral_tokens.iter() {
        let amount = collateral_deposited(storage, user, token)?;
        if amount.is_zero() {
            continue;
        }
        total = total.checked_add(usd_value(storage, querier, token, amount)?)
            .map_err(StdError::from)?;
    }

    Ok(total)
}

/// Returns (debt minted, collateral value)
pub fn account_information(
    storage: &dyn Storage,
    querier: QuerierWrapper,
    user: &Addr,
) -> Result<(Uint128, Uint128), ContractError> {
    let total_debt_minted = debt_minted(storage, user)?;
    let collateral_value = account_collateral_value(storage, querier, user)?;

    Ok((total_debt_minted, collateral_value))
}

/// (collateral value * threshold / liquidation precision) / debt, as a fixed-point ratio.
/// No debt is maximally safe; ratios beyond Decimal's range saturate.
pub fn calculate_health_factor(
    total_debt_minted: Uint128,
    collateral_value: Uint128,
) -> StdResult<Decimal> {
    if total_debt_minted.is_zero() {
        return Ok(Decimal::MAX);
    }

    let adjusted_collateral = mul_div(
        Uint256::from(collateral_value),
        Uint256::from(LIQUIDATION_THRESHOLD),
        Uint256::from(LIQUIDATION_PRECISION),
    )?;
    let ratio = Uint256::from(adjusted_collateral)
        .checked_mul(Uint256::from(PRECISION))?
        .checked_div(Uint256::from(total_debt_minted))
        .map_err(|err| StdError::generic_err(err.to_string()))?;

    match Uint128::try_from(ratio) {
        Ok(ratio) => Ok(Decimal::raw(ratio.u128())),
        Err(_) => Ok(Decimal::MAX),
    }
}

pub fn health_factor(
    storage: &dyn Storage,
    querier: QuerierWrapper,
    user: &Addr,
) -> Result<Decimal, ContractError> {
    let (total_debt_minted, collateral_value) = account_information(storage, querier, user)?;

    Ok(calculate_health_factor(total_debt_minted, collateral_value)?)
}

/// Error if the user's position is below the minimum health factor
pub fn assert_health_factor_not_broken(
    storage: &dyn Storage,
    querier: QuerierWrapper,
    user: &Addr,
) -> Result<(), ContractError> {
    let health_factor = health_factor(storage, querier, user)?;

    if health_factor < MIN_HEALTH_FACTOR {
        return Err(ContractError::HealthFactorIsBelowMinimum { health_factor });
    }

    Ok(())
}
