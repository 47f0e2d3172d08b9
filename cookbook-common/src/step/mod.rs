//! Steps: the unit of computation in a recipe.
//!
//! A step turns a balance snapshot ([`StepInput`]) into transactions plus a new snapshot. Each
//! concrete step only implements [`Step::get_step_output`]; the recipe always calls
//! [`Step::get_valid_step_output`], which runs the shared balance checks in [`validation`]
//! before the result can feed the next step.
//!
//! ## Available steps
//!
//! - [`railgun::UnshieldStep`] and [`railgun::ShieldStep`] frame every recipe and cannot be
//!   added by callers.
//! - [`token::ApproveERC20SpenderStep`] grants an allowance.
//! - [`swap::SwapStep`], [`liquidity::AddLiquidityStep`] and [`liquidity::RemoveLiquidityStep`]
//!   execute externally quoted exchanges.

pub mod errors;
pub mod liquidity;
pub mod railgun;
pub mod swap;
pub mod token;
pub mod validation;

use async_trait::async_trait;
use num_bigint::BigUint;

pub use errors::StepError;

use crate::{
    models::{RecipeERC20Info, StepInput, StepOutput, StepOutputERC20Amount, UnvalidatedStepOutput},
    utils::{filters::find_first_input_erc20_amount, format_address},
};

#[async_trait]
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether callers may place this step in a recipe. Boundary steps return `false`.
    fn can_add_step(&self) -> bool {
        true
    }

    /// Step specific logic. Must not be called directly; use
    /// [`Step::get_valid_step_output`].
    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError>;

    /// Runs the step and validates its output against the input balances.
    async fn get_valid_step_output(&self, input: &StepInput) -> Result<StepOutput, StepError> {
        let output = self.get_step_output(input).await?;
        let validated = validation::validate_step_output(self.name(), input, output)?;
        Ok(StepOutput::from_validated(self.name(), self.description(), validated))
    }
}

/// Looks up the balance a step operates on.
pub(crate) fn find_input_amount<'a>(
    step: &str,
    input: &'a StepInput,
    info: &RecipeERC20Info,
) -> Result<&'a StepOutputERC20Amount, StepError> {
    find_first_input_erc20_amount(&input.erc20_amounts, info).ok_or_else(|| {
        StepError::MissingInputToken {
            step: step.to_string(),
            token: format_address(&info.token_address),
        }
    })
}

/// Guards a spend against the worst case balance. Spending is only safe up to `min_balance`,
/// since the expected balance may not materialize after slippage.
pub(crate) fn ensure_spendable(
    step: &str,
    amount: &BigUint,
    balance: &StepOutputERC20Amount,
) -> Result<(), StepError> {
    if amount > &balance.min_balance {
        return Err(StepError::AmountExceedsBalance {
            step: step.to_string(),
            amount: amount.clone(),
            balance: balance.min_balance.clone(),
        });
    }
    Ok(())
}

/// The balance left after spending `amount`, keeping the token and its approval.
///
/// Callers must have checked the spend with [`ensure_spendable`].
pub(crate) fn change_after_spend(
    balance: &StepOutputERC20Amount,
    amount: &BigUint,
) -> StepOutputERC20Amount {
    StepOutputERC20Amount {
        info: balance.info.clone(),
        expected_balance: &balance.expected_balance - amount,
        min_balance: &balance.min_balance - amount,
        approved_spender: balance.approved_spender,
    }
}

/// The balance of `info` after receiving `expected` (at worst `min`) from an exchange.
///
/// Balances of the same token already held are merged in. The merged balance has no approval.
pub(crate) fn received_balance(
    input: &StepInput,
    info: &RecipeERC20Info,
    expected: &BigUint,
    min: &BigUint,
) -> StepOutputERC20Amount {
    let mut received = StepOutputERC20Amount {
        info: info.clone(),
        expected_balance: expected.clone(),
        min_balance: min.clone(),
        approved_spender: None,
    };
    for held in input.erc20_amounts.iter().filter(|held| held.info.matches(info)) {
        received.expected_balance += &held.expected_balance;
        received.min_balance += &held.min_balance;
    }
    received
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use alloy_primitives::{address, Address};
    use num_bigint::BigUint;

    use crate::models::{NetworkName, RecipeERC20Info, StepInput, StepOutputERC20Amount};

    pub const SPENDER: Address = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");

    pub fn weth() -> RecipeERC20Info {
        RecipeERC20Info::new(address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"))
    }

    pub fn usdc() -> RecipeERC20Info {
        RecipeERC20Info::new(address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"))
    }

    pub fn lp_token() -> RecipeERC20Info {
        RecipeERC20Info::new(address!("b4e16d0168e52d35cacd2c6185b44281ec28c9dc"))
    }

    pub fn amount(info: RecipeERC20Info, expected: u64, min: u64) -> StepOutputERC20Amount {
        StepOutputERC20Amount {
            info,
            expected_balance: BigUint::from(expected),
            min_balance: BigUint::from(min),
            approved_spender: None,
        }
    }

    pub fn step_input(erc20_amounts: Vec<StepOutputERC20Amount>) -> StepInput {
        StepInput::new(NetworkName::Ethereum, erc20_amounts, vec![])
    }
}
