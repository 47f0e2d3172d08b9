use async_trait::async_trait;
use num_bigint::BigUint;

use super::pool_recipient;
use crate::{
    models::{RecipeERC20Amount, RecipeERC20AmountRecipient, StepInput, UnvalidatedStepOutput},
    quote::AddLiquidityData,
    step::{
        change_after_spend, ensure_spendable, find_input_amount, received_balance, Step, StepError,
    },
};

/// Deposits a token pair into a pool in exchange for LP tokens.
#[derive(Debug, Clone)]
pub struct AddLiquidityStep {
    name: String,
    description: String,
    protocol_name: String,
    data: AddLiquidityData,
}

impl AddLiquidityStep {
    pub fn new(protocol_name: &str, data: AddLiquidityData) -> Self {
        Self {
            name: format!("{protocol_name} Add Liquidity"),
            description: format!("Adds ERC20 token pair liquidity to a {protocol_name} pool."),
            protocol_name: protocol_name.to_string(),
            data,
        }
    }
}

#[async_trait]
impl Step for AddLiquidityStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError> {
        let recipient = pool_recipient(&self.protocol_name);
        let mut spent_erc20_amounts = Vec::with_capacity(2);
        let mut changes = Vec::with_capacity(2);
        for deposit in [&self.data.erc20_amount_a, &self.data.erc20_amount_b] {
            let RecipeERC20Amount { info, amount } = deposit;
            let balance = find_input_amount(&self.name, input, info)?;
            ensure_spendable(&self.name, amount, balance)?;
            let change = change_after_spend(balance, amount);
            if change.expected_balance > BigUint::ZERO {
                changes.push(change);
            }
            spent_erc20_amounts.push(RecipeERC20AmountRecipient::new(
                balance.info.clone(),
                amount.clone(),
                recipient.clone(),
            ));
        }

        let lp = received_balance(
            input,
            &self.data.expected_lp_amount.info,
            &self.data.expected_lp_amount.amount,
            &self.data.min_lp_amount,
        );
        let mut output_erc20_amounts = vec![lp];
        output_erc20_amounts.extend(changes);

        Ok(UnvalidatedStepOutput {
            populated_transactions: vec![self.data.populated_transaction.clone()],
            spent_erc20_amounts,
            output_erc20_amounts,
            ..Default::default()
        })
    }
}
