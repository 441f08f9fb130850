#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, WasmMsg,
};
use cw2::set_contract_version;

use keel::engine::{
    CallbackMsg, CollateralInfo, Config, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg,
};
use keel::helpers::{query_feed_decimals, query_token_decimals};

use crate::error::ContractError;
use crate::liquidations::liquidate;
use crate::positions::{
    burn_debt, deposit_collateral, deposit_collateral_and_mint_debt, mint_debt,
    redeem_collateral, redeem_collateral_for_debt,
};
use crate::query::{
    query_account_collateral_value, query_account_information, query_calculate_health_factor,
    query_collateral_balance, query_collateral_price_feed, query_collateral_tokens,
    query_health_factor, query_risk_parameters, query_token_amount_from_usd, query_usd_value,
};
use crate::reply::handle_external_call_reply;
use crate::state::{acquire_lock, release_lock, CONFIG, LOCK, PRICE_FEEDS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:collateral-engine";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.collateral_tokens.len() != msg.price_feeds.len() {
        return Err(ContractError::LengthMismatch {
            tokens: msg.collateral_tokens.len(),
            price_feeds: msg.price_feeds.len(),
        });
    }
    if msg.collateral_tokens.is_empty() {
        return Err(ContractError::NoCollateral {});
    }

    let debt_token = deps.api.addr_validate(&msg.debt_token)?;

    let mut collateral_tokens = vec![];
    for (token, price_feed) in msg.collateral_tokens.into_iter().zip(msg.price_feeds) {
        let token = deps.api.addr_validate(&token)?;
        let price_feed = deps.api.addr_validate(&price_feed)?;

        if PRICE_FEEDS.has(deps.storage, &token) {
            return Err(ContractError::DuplicateCollateral {
                token: token.to_string(),
            });
        }

        //Store both precisions so valuations don't assume them
        let collateral = CollateralInfo {
            token_decimals: query_token_decimals(deps.querier, &token)?,
            feed_decimals: query_feed_decimals(deps.querier, &price_feed)?,
            token: token.clone(),
            price_feed,
        };
        PRICE_FEEDS.save(deps.storage, &token, &collateral)?;
        collateral_tokens.push(token);
    }

    let config = Config {
        debt_token,
        collateral_tokens,
    };
    CONFIG.save(deps.storage, &config)?;
    LOCK.save(deps.storage, &false)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "instantiate"),
        attr("creator", info.sender.to_string()),
        attr("debt_token", config.debt_token.to_string()),
        attr("collateral_tokens", format!("{:?}", config.collateral_tokens)),
        attr("contract_address", env.contract.address.to_string()),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Callback(callback) => {
            if info.sender != env.contract.address {
                return Err(ContractError::Unauthorized {});
            }
            match callback {
                CallbackMsg::ReleaseLock {} => {
                    release_lock(deps.storage)?;
                    Ok(Response::new().add_attribute("method", "release_lock"))
                }
            }
        }
        msg => {
            //Held until every message this call dispatches has run
            acquire_lock(deps.storage)?;
            let release_msg = release_lock_msg(&env)?;

            let response = execute_locked(deps, env, info, msg)?;
            Ok(response.add_message(release_msg))
        }
    }
}

fn execute_locked(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::DepositCollateral { token, amount } => {
            deposit_collateral(deps, env, info, token, amount)
        }
        ExecuteMsg::MintDebt { amount } => mint_debt(deps, info, amount),
        ExecuteMsg::DepositCollateralAndMintDebt {
            token,
            collateral_amount,
            debt_amount,
        } => deposit_collateral_and_mint_debt(deps, env, info, token, collateral_amount, debt_amount),
        ExecuteMsg::RedeemCollateral { token, amount } => {
            redeem_collateral(deps, info, token, amount)
        }
        ExecuteMsg::RedeemCollateralForDebt {
            token,
            collateral_amount,
            debt_amount,
        } => redeem_collateral_for_debt(deps, env, info, token, collateral_amount, debt_amount),
        ExecuteMsg::BurnDebt { amount } => burn_debt(deps, env, info, amount),
        ExecuteMsg::Liquidate {
            collateral_token,
            user,
            debt_to_cover,
        } => liquidate(deps, env, info, collateral_token, user, debt_to_cover),
        ExecuteMsg::Callback(_) => Err(ContractError::Unauthorized {}),
    }
}

fn release_lock_msg(env: &Env) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_binary(&ExecuteMsg::Callback(CallbackMsg::ReleaseLock {}))?,
        funds: vec![],
    }))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::CollateralTokens {} => to_binary(&query_collateral_tokens(deps)?),
        QueryMsg::CollateralTokenPriceFeed { token } => {
            to_binary(&query_collateral_price_feed(deps, token)?)
        }
        QueryMsg::CollateralBalanceOfUser { user, token } => {
            to_binary(&query_collateral_balance(deps, user, token)?)
        }
        QueryMsg::AccountInformation { user } => {
            to_binary(&query_account_information(deps, user)?)
        }
        QueryMsg::AccountCollateralValue { user } => {
            to_binary(&query_account_collateral_value(deps, user)?)
        }
        QueryMsg::HealthFactor { user } => to_binary(&query_health_factor(deps, user)?),
        QueryMsg::CalculateHealthFactor {
            total_debt_minted,
            collateral_value_in_usd,
        } => to_binary(&query_calculate_health_factor(
            total_debt_minted,
            collateral_value_in_usd,
        )?),
        QueryMsg::UsdValue { token, amount } => to_binary(&query_usd_value(deps, token, amount)?),
        QueryMsg::TokenAmountFromUsd { token, usd_amount } => {
            to_binary(&query_token_amount_from_usd(deps, token, usd_amount)?)
        }
        QueryMsg::RiskParameters {} => to_binary(&query_risk_parameters()),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_external_call_reply(msg)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attribute("method", "migrate"))
}
