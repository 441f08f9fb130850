use cosmwasm_std::Addr;
use cw_storage_plus::Item;

/// Sole holder of the mint/burn capability
pub const OWNER: Item<Addr> = Item::new("owner");
