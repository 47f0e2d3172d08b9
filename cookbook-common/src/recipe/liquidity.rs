//! Liquidity pool recipes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{Recipe, RecipeError};
use crate::{
    config::FeeConfig,
    models::{NetworkName, RecipeERC20Amount, RecipeERC20Info, StepInput},
    quote::LiquidityQuoteProvider,
    step::{
        liquidity::{AddLiquidityStep, RemoveLiquidityStep},
        token::ApproveERC20SpenderStep,
        Step,
    },
    utils::{filters::find_first_input_erc20_amount, format_address},
};

/// Deposits the unshielded balance of token A, plus the matching amount of token B, into a pool.
pub struct AddLiquidityRecipe {
    name: String,
    description: String,
    fee_config: Arc<FeeConfig>,
    provider: Arc<dyn LiquidityQuoteProvider>,
    erc20_info_a: RecipeERC20Info,
    erc20_info_b: RecipeERC20Info,
    slippage_basis_points: u32,
}

impl AddLiquidityRecipe {
    pub fn new(
        fee_config: Arc<FeeConfig>,
        provider: Arc<dyn LiquidityQuoteProvider>,
        erc20_info_a: RecipeERC20Info,
        erc20_info_b: RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Self {
        let protocol_name = provider.protocol_name();
        Self {
            name: format!("{protocol_name} Add Liquidity"),
            description: format!("Adds liquidity to a {protocol_name} pool."),
            fee_config,
            provider,
            erc20_info_a,
            erc20_info_b,
            slippage_basis_points,
        }
    }
}

#[async_trait]
impl Recipe for AddLiquidityRecipe {
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
        let balance_a =
            find_first_input_erc20_amount(&first_internal_input.erc20_amounts, &self.erc20_info_a)
                .ok_or_else(|| missing_input("Add Liquidity", "token A", &self.erc20_info_a))?;
        let erc20_amount_a =
            RecipeERC20Amount::new(self.erc20_info_a.clone(), balance_a.min_balance.clone());

        let data = self
            .provider
            .get_add_liquidity_data(
                first_internal_input.network_name,
                &erc20_amount_a,
                &self.erc20_info_b,
                self.slippage_basis_points,
            )
            .await
            .map_err(|source| RecipeError::Quote { recipe: self.name.clone(), source })?;
        debug!(
            amount_a = %data.erc20_amount_a.amount,
            amount_b = %data.erc20_amount_b.amount,
            lp = %data.expected_lp_amount.amount,
            "Received add liquidity quote"
        );

        let router = data.router_contract;
        Ok(vec![
            Arc::new(ApproveERC20SpenderStep::new(
                router,
                self.erc20_info_a.clone(),
                Some(data.erc20_amount_a.amount.clone()),
            )),
            Arc::new(ApproveERC20SpenderStep::new(
                router,
                self.erc20_info_b.clone(),
                Some(data.erc20_amount_b.amount.clone()),
            )),
            Arc::new(AddLiquidityStep::new(&self.provider.protocol_name(), data)),
        ])
    }
}

/// Burns the unshielded LP token balance for the pool's token pair.
pub struct RemoveLiquidityRecipe {
    name: String,
    description: String,
    fee_config: Arc<FeeConfig>,
    provider: Arc<dyn LiquidityQuoteProvider>,
    lp_erc20_info: RecipeERC20Info,
    erc20_info_a: RecipeERC20Info,
    erc20_info_b: RecipeERC20Info,
    slippage_basis_points: u32,
}

impl RemoveLiquidityRecipe {
    pub fn new(
        fee_config: Arc<FeeConfig>,
        provider: Arc<dyn LiquidityQuoteProvider>,
        lp_erc20_info: RecipeERC20Info,
        erc20_info_a: RecipeERC20Info,
        erc20_info_b: RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Self {
        let protocol_name = provider.protocol_name();
        Self {
            name: format!("{protocol_name} Remove Liquidity"),
            description: format!("Removes liquidity from a {protocol_name} pool."),
            fee_config,
            provider,
            lp_erc20_info,
            erc20_info_a,
            erc20_info_b,
            slippage_basis_points,
        }
    }
}

#[async_trait]
impl Recipe for RemoveLiquidityRecipe {
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
        let lp_balance =
            find_first_input_erc20_amount(&first_internal_input.erc20_amounts, &self.lp_erc20_info)
                .ok_or_else(|| missing_input("Remove Liquidity", "LP", &self.lp_erc20_info))?;
        let lp_erc20_amount =
            RecipeERC20Amount::new(self.lp_erc20_info.clone(), lp_balance.min_balance.clone());

        let data = self
            .provider
            .get_remove_liquidity_data(
                first_internal_input.network_name,
                &lp_erc20_amount,
                &self.erc20_info_a,
                &self.erc20_info_b,
                self.slippage_basis_points,
            )
            .await
            .map_err(|source| RecipeError::Quote { recipe: self.name.clone(), source })?;
        debug!(
            lp = %data.lp_erc20_amount.amount,
            amount_a = %data.expected_amount_a.amount,
            amount_b = %data.expected_amount_b.amount,
            "Received remove liquidity quote"
        );

        Ok(vec![
            Arc::new(ApproveERC20SpenderStep::new(
                data.router_contract,
                self.lp_erc20_info.clone(),
                Some(data.lp_erc20_amount.amount.clone()),
            )),
            Arc::new(RemoveLiquidityStep::new(&self.provider.protocol_name(), data)),
        ])
    }
}

fn missing_input(kind: &'static str, label: &'static str, info: &RecipeERC20Info) -> RecipeError {
    RecipeError::MissingInput { kind, label, token: format_address(&info.token_address) }
}
