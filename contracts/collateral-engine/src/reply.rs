use cosmwasm_std::{Reply, Response};

use crate::positions::{
    BURN_REPLY_ID, BURN_TRANSFER_REPLY_ID, DEPOSIT_REPLY_ID, MINT_REPLY_ID, REDEEM_REPLY_ID,
};
use crate::ContractError;

/// External calls reply on error only.
/// Name the failed call site; erroring here reverts the whole operation.
pub fn handle_external_call_reply(msg: Reply) -> Result<Response, ContractError> {
    let reason = match msg.result.into_result() {
        Ok(_result) => return Ok(Response::new()),
        Err(reason) => reason,
    };

    Err(match msg.id {
        DEPOSIT_REPLY_ID => ContractError::CollateralDepositFailed { reason },
        REDEEM_REPLY_ID => ContractError::CollateralRedeemFailed { reason },
        BURN_TRANSFER_REPLY_ID => ContractError::BurnDebtTransferFailed { reason },
        BURN_REPLY_ID => ContractError::BurnFailed { reason },
        MINT_REPLY_ID => ContractError::MintFailed { reason },
        id => ContractError::UnknownReplyId { id },
    })
}
