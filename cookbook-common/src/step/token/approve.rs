use alloy_primitives::Address;
use async_trait::async_trait;
use num_bigint::BigUint;
use tracing::debug;

use crate::{
    erc20::encode_approve,
    models::{PopulatedTransaction, RecipeERC20Info, StepInput, UnvalidatedStepOutput},
    step::{find_input_amount, Step, StepError},
    utils::format_address,
};

/// Grants `spender` an allowance over a token balance.
///
/// Emits nothing when the balance is already approved for `spender`.
#[derive(Debug, Clone)]
pub struct ApproveERC20SpenderStep {
    spender: Address,
    token: RecipeERC20Info,
    /// Allowance to grant. Defaults to the full expected balance.
    amount: Option<BigUint>,
}

impl ApproveERC20SpenderStep {
    pub fn new(spender: Address, token: RecipeERC20Info, amount: Option<BigUint>) -> Self {
        Self { spender, token, amount }
    }
}

#[async_trait]
impl Step for ApproveERC20SpenderStep {
    fn name(&self) -> &str {
        "Approve ERC20 Spender"
    }

    fn description(&self) -> &str {
        "Approves ERC20 for spender contract."
    }

    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError> {
        if self.token.is_base_token {
            return Err(StepError::BaseTokenUnsupported { action: "approve" });
        }
        let balance = find_input_amount(self.name(), input, &self.token)?;
        if balance.approved_spender == Some(self.spender) {
            debug!(
                token = %format_address(&self.token.token_address),
                spender = %format_address(&self.spender),
                "Spender already approved, skipping approval"
            );
            return Ok(UnvalidatedStepOutput::default());
        }

        let allowance = self
            .amount
            .as_ref()
            .unwrap_or(&balance.expected_balance);
        let data = encode_approve(self.spender, allowance).ok_or_else(|| StepError::Encoding {
            step: self.name().to_string(),
            reason: format!("approval amount {allowance} does not fit in uint256"),
        })?;

        let output_erc20_amounts = input
            .erc20_amounts
            .iter()
            .filter(|amount| amount.info.matches(&self.token))
            .map(|amount| {
                let mut approved = amount.clone();
                approved.approved_spender = Some(self.spender);
                approved
            })
            .collect();

        Ok(UnvalidatedStepOutput {
            populated_transactions: vec![PopulatedTransaction::new(self.token.token_address, data)],
            output_erc20_amounts,
            ..Default::default()
        })
    }
}
