use cosmwasm_std::{attr, DepsMut, Env, MessageInfo, Response, StdError, Uint128};

use crate::positions::{allowed_token, more_than_zero, remove_collateral, remove_debt};
use crate::risk_engine::{
    assert_health_factor_not_broken, health_factor, token_amount_from_usd, LIQUIDATION_BONUS,
    LIQUIDATION_PRECISION, MIN_HEALTH_FACTOR,
};
use crate::ContractError;

/// Cover `debt_to_cover` of an unhealthy user's debt.
/// The liquidator receives the equivalent collateral plus the liquidation bonus
/// and pays with their own debt tokens.
/// Fails if the user's health factor doesn't strictly improve.
pub fn liquidate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collateral_token: String,
    user: String,
    debt_to_cover: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(debt_to_cover)?;
    let collateral_token = allowed_token(deps.api, deps.storage, &collateral_token)?;
    let user = deps.api.addr_validate(&user)?;

    let starting_health_factor = health_factor(deps.storage, deps.querier, &user)?;
    if starting_health_factor >= MIN_HEALTH_FACTOR {
        return Err(ContractError::HealthFactorOk {
            health_factor: starting_health_factor,
        });
    }

    //Collateral owed for the debt, plus the bonus
    let token_amount_from_debt_covered =
        token_amount_from_usd(deps.storage, deps.querier, &collateral_token, debt_to_cover)?;
    let bonus_collateral =
        token_amount_from_debt_covered.multiply_ratio(LIQUIDATION_BONUS, LIQUIDATION_PRECISION);
    let total_collateral_to_redeem = token_amount_from_debt_covered
        .checked_add(bonus_collateral)
        .map_err(StdError::from)?;

    let (event, redeem_msg) = remove_collateral(
        deps.storage,
        &collateral_token,
        total_collateral_to_redeem,
        &user,
        &info.sender,
    )?;
    let burn_msgs = remove_debt(deps.storage, &env, debt_to_cover, &user, &info.sender)?;

    let ending_health_factor = health_factor(deps.storage, deps.querier, &user)?;
    if ending_health_factor <= starting_health_factor {
        return Err(ContractError::HealthFactorNotImproved {
            starting: starting_health_factor,
            ending: ending_health_factor,
        });
    }
    //Liquidating can't leave the liquidator's own position unhealthy
    assert_health_factor_not_broken(deps.storage, deps.querier, &info.sender)?;

    Ok(Response::new()
        .add_submessage(redeem_msg)
        .add_submessages(burn_msgs)
        .add_event(event)
        .add_attributes(vec![
            attr("method", "liquidate"),
            attr("liquidator", info.sender.to_string()),
            attr("user", user.to_string()),
            attr("collateral_token", collateral_token.to_string()),
            attr("debt_covered", debt_to_cover.to_string()),
            attr("collateral_seized", total_collateral_to_redeem.to_string()),
            attr("starting_health_factor", starting_health_factor.to_string()),
            attr("ending_health_factor", ending_health_factor.to_string()),
        ]))
}
