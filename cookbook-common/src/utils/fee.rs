//! Basis point arithmetic on token amounts. Integer only, rounding towards zero.

use num_bigint::BigUint;

use crate::config::{ConfigError, BASIS_POINTS_DENOMINATOR};

/// `floor(amount * basis_points / 10000)`.
///
/// Amounts are arbitrary precision so the product cannot overflow; basis points above 10000
/// would make the fee exceed the amount and are rejected.
pub fn fee_amount(amount: &BigUint, basis_points: u32) -> Result<BigUint, ConfigError> {
    if basis_points > BASIS_POINTS_DENOMINATOR {
        return Err(ConfigError::InvalidBasisPoints(basis_points));
    }
    Ok(amount * BigUint::from(basis_points) / BigUint::from(BASIS_POINTS_DENOMINATOR))
}

/// Splits `amount` into `(amount - fee, fee)`.
pub fn amount_after_fee(
    amount: &BigUint,
    basis_points: u32,
) -> Result<(BigUint, BigUint), ConfigError> {
    let fee = fee_amount(amount, basis_points)?;
    Ok((amount - &fee, fee))
}

/// Worst case amount received when `slippage_basis_points` of `amount` may be lost.
pub fn min_amount_after_slippage(
    amount: &BigUint,
    slippage_basis_points: u32,
) -> Result<BigUint, ConfigError> {
    amount_after_fee(amount, slippage_basis_points).map(|(remaining, _)| remaining)
}
