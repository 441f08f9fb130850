use cosmwasm_std::{
    attr, to_binary, Addr, Api, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response,
    QuerierWrapper, StdResult, Storage, SubMsg, Uint128, WasmMsg,
};

use keel::debt_token::ExecuteMsg as DebtTokenExecuteMsg;
use keel::helpers::{cw20_transfer_from_msg, cw20_transfer_msg};

use crate::risk_engine::{assert_health_factor_not_broken, registered_collateral};
use crate::state::{collateral_deposited, debt_minted, COLLATERAL_DEPOSITED, CONFIG, DEBT_MINTED};
use crate::ContractError;

//External call reply ids
pub const DEPOSIT_REPLY_ID: u64 = 1u64;
pub const REDEEM_REPLY_ID: u64 = 2u64;
pub const BURN_TRANSFER_REPLY_ID: u64 = 3u64;
pub const BURN_REPLY_ID: u64 = 4u64;
pub const MINT_REPLY_ID: u64 = 5u64;

pub fn more_than_zero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::NeedsMoreThanZero {});
    }
    Ok(())
}

/// Validate `token` and confirm it's registered collateral
pub fn allowed_token(api: &dyn Api, storage: &dyn Storage, token: &str) -> Result<Addr, ContractError> {
    let token = api.addr_validate(token).map_err(|_| ContractError::TokenNotAllowed {
        token: token.to_string(),
    })?;
    registered_collateral(storage, &token)?;

    Ok(token)
}

/// Deposit collateral from the sender
pub fn deposit_collateral(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(amount)?;
    let token = allowed_token(deps.api, deps.storage, &token)?;

    let (event, transfer_msg) = add_collateral(deps.storage, &env, &info.sender, &token, amount)?;

    Ok(Response::new()
        .add_submessage(transfer_msg)
        .add_event(event)
        .add_attributes(vec![
            attr("method", "deposit_collateral"),
            attr("user", info.sender.to_string()),
            attr("token", token.to_string()),
            attr("amount", amount.to_string()),
        ]))
}

/// Mint debt to the sender
pub fn mint_debt(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(amount)?;

    let mint_msg = add_debt(deps.storage, deps.querier, &info.sender, amount)?;

    Ok(Response::new()
        .add_submessage(mint_msg)
        .add_attributes(vec![
            attr("method", "mint_debt"),
            attr("user", info.sender.to_string()),
            attr("amount", amount.to_string()),
        ]))
}

/// Deposit collateral then mint debt against it
pub fn deposit_collateral_and_mint_debt(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    collateral_amount: Uint128,
    debt_amount: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(collateral_amount)?;
    more_than_zero(debt_amount)?;
    let token = allowed_token(deps.api, deps.storage, &token)?;

    let (event, transfer_msg) =
        add_collateral(deps.storage, &env, &info.sender, &token, collateral_amount)?;
    let mint_msg = add_debt(deps.storage, deps.querier, &info.sender, debt_amount)?;

    Ok(Response::new()
        .add_submessages(vec![transfer_msg, mint_msg])
        .add_event(event)
        .add_attributes(vec![
            attr("method", "deposit_collateral_and_mint_debt"),
            attr("user", info.sender.to_string()),
            attr("token", token.to_string()),
            attr("collateral_amount", collateral_amount.to_string()),
            attr("debt_amount", debt_amount.to_string()),
        ]))
}

/// Send collateral back to the sender, as long as their position stays healthy
pub fn redeem_collateral(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(amount)?;
    let token = allowed_token(deps.api, deps.storage, &token)?;

    let (event, transfer_msg) =
        remove_collateral(deps.storage, &token, amount, &info.sender, &info.sender)?;
    assert_health_factor_not_broken(deps.storage, deps.querier, &info.sender)?;

    Ok(Response::new()
        .add_submessage(transfer_msg)
        .add_event(event)
        .add_attributes(vec![
            attr("method", "redeem_collateral"),
            attr("user", info.sender.to_string()),
            attr("token", token.to_string()),
            attr("amount", amount.to_string()),
        ]))
}

/// Repay debt, then redeem collateral
pub fn redeem_collateral_for_debt(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    collateral_amount: Uint128,
    debt_amount: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(collateral_amount)?;
    more_than_zero(debt_amount)?;
    let token = allowed_token(deps.api, deps.storage, &token)?;

    let mut msgs = remove_debt(deps.storage, &env, debt_amount, &info.sender, &info.sender)?;
    let (event, transfer_msg) =
        remove_collateral(deps.storage, &token, collateral_amount, &info.sender, &info.sender)?;
    msgs.push(transfer_msg);

    assert_health_factor_not_broken(deps.storage, deps.querier, &info.sender)?;

    Ok(Response::new()
        .add_submessages(msgs)
        .add_event(event)
        .add_attributes(vec![
            attr("method", "redeem_collateral_for_debt"),
            attr("user", info.sender.to_string()),
            attr("token", token.to_string()),
            attr("collateral_amount", collateral_amount.to_string()),
            attr("debt_amount", debt_amount.to_string()),
        ]))
}

/// Repay the sender's debt with their own debt tokens
pub fn burn_debt(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    more_than_zero(amount)?;

    let msgs = remove_debt(deps.storage, &env, amount, &info.sender, &info.sender)?;
    //Can't break after a repayment, checked anyway
    assert_health_factor_not_broken(deps.storage, deps.querier, &info.sender)?;

    Ok(Response::new()
        .add_submessages(msgs)
        .add_attributes(vec![
            attr("method", "burn_debt"),
            attr("user", info.sender.to_string()),
            attr("amount", amount.to_string()),
        ]))
}

/// Credit the ledger, then pull the tokens from `user`.
/// A failed pull reverts the credit through the reply.
pub(crate) fn add_collateral(
    storage: &mut dyn Storage,
    env: &Env,
    user: &Addr,
    token: &Addr,
    amount: Uint128,
) -> Result<(Event, SubMsg), ContractError> {
    COLLATERAL_DEPOSITED.update(
        storage,
        (user, token),
        |deposited: Option<Uint128>| -> StdResult<_> {
            Ok(deposited.unwrap_or_default().checked_add(amount)?)
        },
    )?;

    let event = Event::new("collateral_deposited")
        .add_attribute("user", user.to_string())
        .add_attribute("token", token.to_string())
        .add_attribute("amount", amount.to_string());

    let transfer_msg = cw20_transfer_from_msg(token, user, &env.contract.address, amount)?;

    Ok((event, SubMsg::reply_on_error(transfer_msg, DEPOSIT_REPLY_ID)))
}

/// Debit `from`'s ledger and send the tokens to `to`
pub(crate) fn remove_collateral(
    storage: &mut dyn Storage,
    token: &Addr,
    amount: Uint128,
    from: &Addr,
    to: &Addr,
) -> Result<(Event, SubMsg), ContractError> {
    let deposited = collateral_deposited(storage, from, token)?;
    let remaining = deposited
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientCollateral {
            deposited,
            requested: amount,
        })?;
    COLLATERAL_DEPOSITED.save(storage, (from, token), &remaining)?;

    let event = Event::new("collateral_redeemed")
        .add_attribute("redeemed_from", from.to_string())
        .add_attribute("redeemed_to", to.to_string())
        .add_attribute("token", token.to_string())
        .add_attribute("amount", amount.to_string());

    let transfer_msg = cw20_transfer_msg(token, to, amount)?;

    Ok((event, SubMsg::reply_on_error(transfer_msg, REDEEM_REPLY_ID)))
}

/// Credit the user's debt, confirm the position still holds, and mint to them
pub(crate) fn add_debt(
    storage: &mut dyn Storage,
    querier: QuerierWrapper,
    user: &Addr,
    amount: Uint128,
) -> Result<SubMsg, ContractError> {
    DEBT_MINTED.update(storage, user, |debt: Option<Uint128>| -> StdResult<_> {
        Ok(debt.unwrap_or_default().checked_add(amount)?)
    })?;
    assert_health_factor_not_broken(storage, querier, user)?;

    let config = CONFIG.load(storage)?;
    let mint_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.debt_token.to_string(),
        msg: to_binary(&DebtTokenExecuteMsg::Mint {
            recipient: user.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(SubMsg::reply_on_error(mint_msg, MINT_REPLY_ID))
}

/// Debit `on_behalf_of`'s debt, pull the debt tokens from `debt_from` and burn them.
/// Health isn't checked here.
pub(crate) fn remove_debt(
    storage: &mut dyn Storage,
    env: &Env,
    amount: Uint128,
    on_behalf_of: &Addr,
    debt_from: &Addr,
) -> Result<Vec<SubMsg>, ContractError> {
    let debt = debt_minted(storage, on_behalf_of)?;
    let remaining = debt
        .checked_sub(amount)
        .map_err(|_| ContractError::ExcessRepayment {
            debt,
            repayment: amount,
        })?;
    DEBT_MINTED.save(storage, on_behalf_of, &remaining)?;

    let config = CONFIG.load(storage)?;
    let transfer_msg = cw20_transfer_from_msg(
        &config.debt_token,
        debt_from,
        &env.contract.address,
        amount,
    )?;
    let burn_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.debt_token.to_string(),
        msg: to_binary(&DebtTokenExecuteMsg::Burn { amount })?,
        funds: vec![],
    });

    Ok(vec![
        SubMsg::reply_on_error(transfer_msg, BURN_TRANSFER_REPLY_ID),
        SubMsg::reply_on_error(burn_msg, BURN_REPLY_ID),
    ])
}
