use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use tracing::debug;

use super::{Recipe, RecipeError};
use crate::{
    config::FeeConfig,
    models::{NetworkName, RecipeERC20Amount, RecipeERC20Info, StepInput},
    quote::{SwapQuoteParams, SwapQuoteProvider},
    step::{swap::SwapStep, token::ApproveERC20SpenderStep, Step},
    utils::{filters::find_first_input_erc20_amount, format_address},
};

/// Swaps one unshielded token for another through a quote provider, then re-shields.
pub struct SwapRecipe {
    name: String,
    description: String,
    fee_config: Arc<FeeConfig>,
    provider: Arc<dyn SwapQuoteProvider>,
    sell_token: RecipeERC20Info,
    buy_token: RecipeERC20Info,
    /// Amount to sell. Defaults to the worst case balance available after unshielding.
    sell_amount: Option<BigUint>,
    slippage_basis_points: u32,
}

impl SwapRecipe {
    pub fn new(
        fee_config: Arc<FeeConfig>,
        provider: Arc<dyn SwapQuoteProvider>,
        sell_token: RecipeERC20Info,
        buy_token: RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Self {
        let exchange_name = provider.exchange_name();
        Self {
            name: format!("{exchange_name} Swap"),
            description: format!("Swaps two ERC20 tokens using {exchange_name} DEX Aggregator."),
            fee_config,
            provider,
            sell_token,
            buy_token,
            sell_amount: None,
            slippage_basis_points,
        }
    }

    pub fn with_sell_amount(mut self, sell_amount: BigUint) -> Self {
        self.sell_amount = Some(sell_amount);
        self
    }
}

#[async_trait]
impl Recipe for SwapRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fee_config(&self) -> &Arc<FeeConfig> {
        &self.fee_config
    }

    fn supports_network(&self, network_name: NetworkName) -> bool {
        self.provider.supports_network(network_name)
    }

    async fn get_internal_steps(
        &self,
        first_internal_input: &StepInput,
    ) -> Result<Vec<Arc<dyn Step>>, RecipeError> {
        let sell_balance =
            find_first_input_erc20_amount(&first_internal_input.erc20_amounts, &self.sell_token)
                .ok_or_else(|| RecipeError::MissingInput {
                    kind: "Swap",
                    label: "sell",
                    token: format_address(&self.sell_token.token_address),
                })?;
        let sell_amount = self
            .sell_amount
            .clone()
            .unwrap_or_else(|| sell_balance.min_balance.clone());

        let params = SwapQuoteParams {
            network_name: first_internal_input.network_name,
            sell_erc20_amount: RecipeERC20Amount::new(self.sell_token.clone(), sell_amount),
            buy_erc20_info: self.buy_token.clone(),
            slippage_basis_points: self.slippage_basis_points,
        };
        let quote = self
            .provider
            .get_swap_quote(&params)
            .await
            .map_err(|source| RecipeError::Quote { recipe: self.name.clone(), source })?;
        debug!(
            sell = %quote.sell_token_value,
            buy = %quote.buy_erc20_amount.amount,
            min_buy = %quote.minimum_buy_amount,
            "Received swap quote"
        );

        let mut steps: Vec<Arc<dyn Step>> = Vec::with_capacity(2);
        if let Some(spender) = quote.spender {
            steps.push(Arc::new(ApproveERC20SpenderStep::new(
                spender,
                self.sell_token.clone(),
                None,
            )));
        }
        steps.push(Arc::new(SwapStep::new(
            &self.provider.exchange_name(),
            quote,
            self.sell_token.clone(),
        )));
        Ok(steps)
    }
}
