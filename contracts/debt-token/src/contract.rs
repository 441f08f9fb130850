#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Storage,
    Uint128,
};
use cw2::set_contract_version;

use cw20_base::allowances::{
    execute_decrease_allowance, execute_increase_allowance, execute_send_from,
    execute_transfer_from, query_allowance,
};
use cw20_base::contract::{execute_send, execute_transfer, query_balance, query_token_info};
use cw20_base::msg::InstantiateMsg as Cw20InstantiateMsg;
use cw20_base::state::{BALANCES, TOKEN_INFO};

use keel::debt_token::{ExecuteMsg, InstantiateMsg, MigrateMsg, OwnerResponse, QueryMsg};
use keel::helpers::is_null_address;

use crate::error::ContractError;
use crate::state::OWNER;

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:debt-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unit-of-account precision
const DEFAULT_DECIMALS: u8 = 18;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };

    //Token metadata & balances are cw20-base's; supply only moves through the owner
    cw20_base::contract::instantiate(
        deps.branch(),
        env,
        info,
        Cw20InstantiateMsg {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals.unwrap_or(DEFAULT_DECIMALS),
            initial_balances: vec![],
            mint: None,
            marketing: None,
        },
    )?;

    OWNER.save(deps.storage, &owner)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "instantiate"),
        attr("owner", owner.to_string()),
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
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, info, recipient, amount),
        ExecuteMsg::Burn { amount } => execute_burn(deps, info, amount),
        ExecuteMsg::TransferOwnership { new_owner } => transfer_ownership(deps, info, new_owner),
        ExecuteMsg::Transfer { recipient, amount } => {
            Ok(execute_transfer(deps, env, info, recipient, amount)?)
        }
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => Ok(execute_send(deps, env, info, contract, amount, msg)?),
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_increase_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_decrease_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => Ok(execute_transfer_from(
            deps, env, info, owner, recipient, amount,
        )?),
        ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        } => Ok(execute_send_from(
            deps, env, info, owner, contract, amount, msg,
        )?),
    }
}

fn assert_owner(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if *sender != OWNER.load(storage)? {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

/// Create new supply for `recipient`
pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    if is_null_address(&recipient) {
        return Err(ContractError::ZeroAddressTarget {});
    }
    if amount.is_zero() {
        return Err(ContractError::NonPositiveAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    TOKEN_INFO.update(deps.storage, |mut token_info| -> StdResult<_> {
        token_info.total_supply = token_info.total_supply.checked_add(amount)?;
        Ok(token_info)
    })?;
    BALANCES.update(
        deps.storage,
        &recipient,
        |balance: Option<Uint128>| -> StdResult<_> {
            Ok(balance.unwrap_or_default().checked_add(amount)?)
        },
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "mint"),
        attr("to", recipient.to_string()),
        attr("amount", amount.to_string()),
    ]))
}

/// Destroy supply out of the owner's own balance
pub fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::NonPositiveAmount {});
    }

    let balance = BALANCES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if balance < amount {
        return Err(ContractError::InsufficientBalance { balance, amount });
    }

    BALANCES.save(deps.storage, &info.sender, &(balance - amount))?;
    TOKEN_INFO.update(deps.storage, |mut token_info| -> StdResult<_> {
        token_info.total_supply = token_info.total_supply.checked_sub(amount)?;
        Ok(token_info)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "burn"),
        attr("from", info.sender.to_string()),
        attr("amount", amount.to_string()),
    ]))
}

/// Hand the mint/burn capability to a new owner
fn transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    if is_null_address(&new_owner) {
        return Err(ContractError::ZeroAddressTarget {});
    }
    let new_owner = deps.api.addr_validate(&new_owner)?;
    OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "transfer_ownership"),
        attr("previous_owner", info.sender.to_string()),
        attr("new_owner", new_owner.to_string()),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => to_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_binary(&query_token_info(deps)?),
        QueryMsg::Allowance { owner, spender } => {
            to_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::Owner {} => to_binary(&OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attribute("method", "migrate"))
}
