use async_trait::async_trait;
use num_bigint::BigUint;

use crate::{
    models::{RecipeERC20AmountRecipient, RecipeERC20Info, StepInput, UnvalidatedStepOutput},
    quote::SwapQuoteData,
    step::{
        change_after_spend, ensure_spendable, find_input_amount, received_balance, Step, StepError,
    },
};

/// Executes a quoted swap: spends the sell amount, receives the bought token.
///
/// The bought balance is uncertain, so it carries the quote's expected amount and its
/// guaranteed minimum. Any unsold change keeps its approval.
#[derive(Debug, Clone)]
pub struct SwapStep {
    name: String,
    description: String,
    exchange_name: String,
    quote: SwapQuoteData,
    sell_token: RecipeERC20Info,
}

impl SwapStep {
    pub fn new(exchange_name: &str, quote: SwapQuoteData, sell_token: RecipeERC20Info) -> Self {
        Self {
            name: format!("{exchange_name} Swap"),
            description: format!("Swaps two ERC20 tokens using {exchange_name} DEX Aggregator."),
            exchange_name: exchange_name.to_string(),
            quote,
            sell_token,
        }
    }
}

#[async_trait]
impl Step for SwapStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError> {
        let sell_balance = find_input_amount(&self.name, input, &self.sell_token)?;
        let sell_amount = &self.quote.sell_token_value;
        ensure_spendable(&self.name, sell_amount, sell_balance)?;

        let bought = received_balance(
            input,
            &self.quote.buy_erc20_amount.info,
            &self.quote.buy_erc20_amount.amount,
            &self.quote.minimum_buy_amount,
        );
        let mut output_erc20_amounts = vec![bought];
        let change = change_after_spend(sell_balance, sell_amount);
        if change.expected_balance > BigUint::ZERO {
            output_erc20_amounts.push(change);
        }

        Ok(UnvalidatedStepOutput {
            populated_transactions: vec![self.quote.populated_transaction.clone()],
            spent_erc20_amounts: vec![RecipeERC20AmountRecipient::new(
                sell_balance.info.clone(),
                sell_amount.clone(),
                self.exchange_name.clone(),
            )],
            output_erc20_amounts,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Bytes};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        models::{PopulatedTransaction, RecipeERC20Amount},
        step::test_fixtures::*,
    };

    fn quote(sell: u64, buy: u64, min_buy: u64) -> SwapQuoteData {
        SwapQuoteData {
            sell_token_value: BigUint::from(sell),
            spender: Some(SPENDER),
            populated_transaction: PopulatedTransaction::new(
                address!("def1c0ded9bec7f1a1670819833240f027b25eff"),
                Bytes::from_static(&[0x56, 0x78]),
            )
            .with_value(BigUint::ZERO),
            buy_erc20_amount: RecipeERC20Amount::new(usdc(), buy),
            minimum_buy_amount: BigUint::from(min_buy),
            sell_token_address: weth().token_address,
        }
    }

    #[tokio::test]
    async fn test_swap_outputs_bought_token_and_change() {
        let step = SwapStep::new("0x Exchange", quote(10000, 500, 495), weth());
        let mut balance = amount(weth(), 11970, 11970);
        balance.approved_spender = Some(SPENDER);

        let output = step
            .get_valid_step_output(&step_input(vec![balance]))
            .await
            .unwrap();

        let mut change = amount(weth(), 1970, 1970);
        change.approved_spender = Some(SPENDER);
        assert_eq!(output.name, "0x Exchange Swap");
        assert_eq!(output.output_erc20_amounts, vec![amount(usdc(), 500, 495), change]);
        assert_eq!(
            output.spent_erc20_amounts,
            vec![RecipeERC20AmountRecipient::new(weth(), BigUint::from(10000u32), "0x Exchange")]
        );
        assert_eq!(
            output.populated_transactions,
            vec![quote(10000, 500, 495).populated_transaction]
        );
    }

    #[tokio::test]
    async fn test_swap_of_full_balance_leaves_no_change() {
        let step = SwapStep::new("0x Exchange", quote(100, 5, 5), weth());

        let output = step
            .get_valid_step_output(&step_input(vec![amount(weth(), 100, 100)]))
            .await
            .unwrap();

        assert_eq!(output.output_erc20_amounts, vec![amount(usdc(), 5, 5)]);
    }

    #[tokio::test]
    async fn test_swap_into_held_token_merges_balances() {
        let step = SwapStep::new("0x Exchange", quote(100, 5, 4), weth());
        let input = step_input(vec![amount(weth(), 100, 100), amount(usdc(), 20, 20)]);

        let output = step.get_valid_step_output(&input).await.unwrap();

        assert_eq!(output.output_erc20_amounts, vec![amount(usdc(), 25, 24)]);
    }

    #[tokio::test]
    async fn test_swap_exceeding_min_balance_fails() {
        let step = SwapStep::new("0x Exchange", quote(10000, 500, 495), weth());

        let err = step
            .get_valid_step_output(&step_input(vec![amount(weth(), 12000, 1995)]))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "0x Exchange Swap step failed. Specified amount 10000 exceeds balance 1995."
        );
    }

    #[tokio::test]
    async fn test_swap_with_inconsistent_quote_is_a_contract_violation() {
        let step = SwapStep::new("0x Exchange", quote(100, 5, 6), weth());

        let err = step
            .get_valid_step_output(&step_input(vec![amount(weth(), 100, 100)]))
            .await
            .unwrap_err();

        assert!(matches!(err, StepError::ContractViolation { .. }));
    }
}
