use async_trait::async_trait;
use num_bigint::BigUint;

use super::pool_recipient;
use crate::{
    models::{RecipeERC20AmountRecipient, StepInput, UnvalidatedStepOutput},
    quote::RemoveLiquidityData,
    step::{
        change_after_spend, ensure_spendable, find_input_amount, received_balance, Step, StepError,
    },
};

/// Burns LP tokens for the underlying token pair.
#[derive(Debug, Clone)]
pub struct RemoveLiquidityStep {
    name: String,
    description: String,
    protocol_name: String,
    data: RemoveLiquidityData,
}

impl RemoveLiquidityStep {
    pub fn new(protocol_name: &str, data: RemoveLiquidityData) -> Self {
        Self {
            name: format!("{protocol_name} Remove Liquidity"),
            description: format!("Removes ERC20 token pair liquidity from a {protocol_name} pool."),
            protocol_name: protocol_name.to_string(),
            data,
        }
    }
}

#[async_trait]
impl Step for RemoveLiquidityStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError> {
        let lp = &self.data.lp_erc20_amount;
        let lp_balance = find_input_amount(&self.name, input, &lp.info)?;
        ensure_spendable(&self.name, &lp.amount, lp_balance)?;

        let mut output_erc20_amounts = vec![
            received_balance(
                input,
                &self.data.expected_amount_a.info,
                &self.data.expected_amount_a.amount,
                &self.data.min_amount_a,
            ),
            received_balance(
                input,
                &self.data.expected_amount_b.info,
                &self.data.expected_amount_b.amount,
                &self.data.min_amount_b,
            ),
        ];
        let change = change_after_spend(lp_balance, &lp.amount);
        if change.expected_balance > BigUint::ZERO {
            output_erc20_amounts.push(change);
        }

        Ok(UnvalidatedStepOutput {
            populated_transactions: vec![self.data.populated_transaction.clone()],
            spent_erc20_amounts: vec![RecipeERC20AmountRecipient::new(
                lp_balance.info.clone(),
                lp.amount.clone(),
                pool_recipient(&self.protocol_name),
            )],
            output_erc20_amounts,
            ..Default::default()
        })
    }
}
