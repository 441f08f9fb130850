use cosmwasm_std::{Addr, Decimal, Deps, StdError, StdResult, Uint128};

use keel::engine::{AccountInformationResponse, CollateralInfo, RiskParametersResponse};
use keel::math::PRECISION;

use crate::risk_engine::{
    account_collateral_value, account_information, calculate_health_factor, health_factor,
    registered_collateral, token_amount_from_usd, usd_value, LIQUIDATION_BONUS,
    LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR,
};
use crate::state::{collateral_deposited, CONFIG};
use crate::ContractError;

fn into_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        err => StdError::generic_err(err.to_string()),
    }
}

/// Returns accepted collateral tokens in enumeration order
pub fn query_collateral_tokens(deps: Deps) -> StdResult<Vec<Addr>> {
    Ok(CONFIG.load(deps.storage)?.collateral_tokens)
}

pub fn query_collateral_price_feed(deps: Deps, token: String) -> StdResult<CollateralInfo> {
    let token = deps.api.addr_validate(&token)?;
    registered_collateral(deps.storage, &token).map_err(into_std)
}

pub fn query_collateral_balance(deps: Deps, user: String, token: String) -> StdResult<Uint128> {
    let user = deps.api.addr_validate(&user)?;
    let token = deps.api.addr_validate(&token)?;

    collateral_deposited(deps.storage, &user, &token)
}

pub fn query_account_information(deps: Deps, user: String) -> StdResult<AccountInformationResponse> {
    let user = deps.api.addr_validate(&user)?;
    let (total_debt_minted, collateral_value_in_usd) =
        account_information(deps.storage, deps.querier, &user).map_err(into_std)?;

    Ok(AccountInformationResponse {
        total_debt_minted,
        collateral_value_in_usd,
    })
}

pub fn query_account_collateral_value(deps: Deps, user: String) -> StdResult<Uint128> {
    let user = deps.api.addr_validate(&user)?;
    account_collateral_value(deps.storage, deps.querier, &user).map_err(into_std)
}

pub fn query_health_factor(deps: Deps, user: String) -> StdResult<Decimal> {
    let user = deps.api.addr_validate(&user)?;
    health_factor(deps.storage, deps.querier, &user).map_err(into_std)
}

pub fn query_calculate_health_factor(
    total_debt_minted: Uint128,
    collateral_value_in_usd: Uint128,
) -> StdResult<Decimal> {
    calculate_health_factor(total_debt_minted, collateral_value_in_usd)
}

pub fn query_usd_value(deps: Deps, token: String, amount: Uint128) -> StdResult<Uint128> {
    let token = deps.api.addr_validate(&token)?;
    usd_value(deps.storage, deps.querier, &token, amount).map_err(into_std)
}

pub fn query_token_amount_from_usd(
    deps: Deps,
    token: String,
    usd_amount: Uint128,
) -> StdResult<Uint128> {
    let token = deps.api.addr_validate(&token)?;
    token_amount_from_usd(deps.storage, deps.querier, &token, usd_amount).map_err(into_std)
}

pub fn query_risk_parameters() -> RiskParametersResponse {
    RiskParametersResponse {
        precision: Uint128::new(PRECISION),
        liquidation_threshold: Uint128::new(LIQUIDATION_THRESHOLD),
        liquidation_precision: Uint128::new(LIQUIDATION_PRECISION),
        liquidation_bonus: Uint128::new(LIQUIDATION_BONUS),
        min_health_factor: MIN_HEALTH_FACTOR,
    }
}
