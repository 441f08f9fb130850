use std::convert::TryFrom;

use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

/// 10^18, the unit-of-account fixed-point scale
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// 10^exponent as a Uint256
pub fn pow10(exponent: u8) -> StdResult<Uint256> {
    let value = 10u128
        .checked_pow(exponent as u32)
        .ok_or_else(|| StdError::generic_err(format!("10^{} overflows", exponent)))?;

    Ok(Uint256::from(value))
}

/// `a * b / denominator` with a 256-bit intermediate, rounded down.
/// Errors if the denominator is zero or the result doesn't fit a Uint128.
pub fn mul_div(a: Uint256, b: Uint256, denominator: Uint256) -> StdResult<Uint128> {
    let product = a.checked_mul(b)?;
    let quotient = product
        .checked_div(denominator)
        .map_err(|err| StdError::generic_err(err.to_string()))?;

    Uint128::try_from(quotient).map_err(|err| StdError::generic_err(err.to_string()))
}
