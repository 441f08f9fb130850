use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use keel::engine::{CollateralInfo, Config};

use crate::ContractError;

/// Debt token & collateral list. Written once at instantiation.
pub const CONFIG: Item<Config> = Item::new("config");
/// Price feed registry, keyed by collateral token. Written once at instantiation.
pub(crate) const PRICE_FEEDS: Map<&Addr, CollateralInfo> = Map::new("price_feeds");

/// (user, collateral token) -> deposited amount in the token's native decimals
pub(crate) const COLLATERAL_DEPOSITED: Map<(&Addr, &Addr), Uint128> =
    Map::new("collateral_deposited");
/// user -> debt minted
pub(crate) const DEBT_MINTED: Map<&Addr, Uint128> = Map::new("debt_minted");

/// Set while a mutating call and the messages it dispatched are in flight
pub(crate) const LOCK: Item<bool> = Item::new("lock");

/// Take the re-entrancy lock, erroring if it's already held
pub fn acquire_lock(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if LOCK.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::ReentrantCall {});
    }
    LOCK.save(storage, &true)?;

    Ok(())
}

pub fn release_lock(storage: &mut dyn Storage) -> StdResult<()> {
    LOCK.save(storage, &false)
}

pub fn is_locked(storage: &dyn Storage) -> StdResult<bool> {
    Ok(LOCK.may_load(storage)?.unwrap_or(false))
}

/// Returns a user's deposited balance of `token`
pub fn collateral_deposited(storage: &dyn Storage, user: &Addr, token: &Addr) -> StdResult<Uint128> {
    Ok(COLLATERAL_DEPOSITED
        .may_load(storage, (user, token))?
        .unwrap_or_default())
}

/// Returns a user's minted debt
pub fn debt_minted(storage: &dyn Storage, user: &Addr) -> StdResult<Uint128> {
    Ok(DEBT_MINTED.may_load(storage, user)?.unwrap_or_default())
}
