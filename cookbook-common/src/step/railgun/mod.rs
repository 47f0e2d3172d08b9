//! Boundary steps moving balances out of and back into the private pool.

mod shield;
mod unshield;

pub use shield::ShieldStep;
pub use unshield::UnshieldStep;

use crate::{
    models::{RecipeERC20AmountRecipient, StepOutputERC20Amount},
    step::StepError,
    utils::fee::amount_after_fee,
};

/// Deducts the protocol fee from every balance. The remainder is known exactly, so the output
/// minimum equals its expected balance.
fn deduct_fees(
    amounts: &[StepOutputERC20Amount],
    basis_points: u32,
    recipient: &str,
    keep_approvals: bool,
) -> Result<(Vec<StepOutputERC20Amount>, Vec<RecipeERC20AmountRecipient>), StepError> {
    let mut outputs = Vec::with_capacity(amounts.len());
    let mut fees = Vec::with_capacity(amounts.len());
    for amount in amounts {
        let (remaining, fee) = amount_after_fee(&amount.expected_balance, basis_points)?;
        outputs.push(StepOutputERC20Amount {
            info: amount.info.clone(),
            min_balance: remaining.clone(),
            expected_balance: remaining,
            approved_spender: if keep_approvals { amount.approved_spender } else { None },
        });
        fees.push(RecipeERC20AmountRecipient::new(amount.info.clone(), fee, recipient));
    }
    Ok((outputs, fees))
}
