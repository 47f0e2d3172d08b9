//! Recipes: framed, validated sequences of steps.
//!
//! Every recipe runs as `Unshield -> internal steps -> Shield`. Implementations only decide the
//! internal steps; the framing, the balance threading and the assembly of the final
//! [`RecipeOutput`] are shared by the provided methods of [`Recipe`].
//!
//! Internal steps are planned from the Unshield step's output, so quotes are requested for the
//! balances that are actually available after the unshield fee.

pub mod errors;
pub mod liquidity;
pub mod steps;
pub mod swap;

use std::sync::Arc;

use alloy_primitives::Address;
use async_trait::async_trait;
use tracing::{debug, info, info_span, Instrument};

pub use errors::RecipeError;
pub use liquidity::{AddLiquidityRecipe, RemoveLiquidityRecipe};
pub use steps::StepRecipe;
pub use swap::SwapRecipe;

use crate::{
    config::FeeConfig,
    models::{
        NetworkName, RecipeInput, RecipeNFTInfo, RecipeOutput, StepInput, StepOutput,
        StepOutputERC20Amount,
    },
    step::{
        railgun::{ShieldStep, UnshieldStep},
        Step,
    },
    utils::{convert::convert_recipe_fees_to_erc20_amount_recipients, filters::contains_nft},
};

#[async_trait]
pub trait Recipe: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Fee configuration handed to the boundary steps.
    fn fee_config(&self) -> &Arc<FeeConfig>;

    fn supports_network(&self, _network_name: NetworkName) -> bool {
        true
    }

    /// Plans the caller facing steps from the balances left after unshielding.
    async fn get_internal_steps(
        &self,
        first_internal_input: &StepInput,
    ) -> Result<Vec<Arc<dyn Step>>, RecipeError>;

    /// `[Unshield, ...internal steps, Shield]`.
    ///
    /// The framing is fixed: implementations must not override this method,
    /// [`Recipe::get_step_outputs`] or [`Recipe::get_recipe_output`].
    async fn get_full_steps(
        &self,
        first_internal_input: &StepInput,
    ) -> Result<Vec<Arc<dyn Step>>, RecipeError> {
        let internal_steps = self
            .get_internal_steps(first_internal_input)
            .await?;
        Ok(frame_steps(self.fee_config(), internal_steps))
    }

    /// Runs the framed pipeline and returns every step output in order.
    async fn get_step_outputs(&self, input: &RecipeInput) -> Result<Vec<StepOutput>, RecipeError> {
        let first_input = create_first_step_input(input);
        let unshield_output = UnshieldStep::new(self.fee_config().clone())
            .get_valid_step_output(&first_input)
            .await?;
        let first_internal_input = first_input.next(&unshield_output);

        let internal_steps = self
            .get_internal_steps(&first_internal_input)
            .await?;
        let shield: Arc<dyn Step> = Arc::new(ShieldStep::new(self.fee_config().clone()));
        let mut step_outputs = Vec::with_capacity(internal_steps.len() + 2);
        step_outputs.push(unshield_output);
        let mut step_input = first_internal_input;
        for step in internal_steps.iter().chain(std::iter::once(&shield)) {
            debug!(recipe = self.name(), step = step.name(), "Running step");
            let output = step.get_valid_step_output(&step_input).await?;
            step_input = step_input.next(&output);
            step_outputs.push(output);
        }
        Ok(step_outputs)
    }

    /// Runs the recipe and assembles the transaction plan.
    async fn get_recipe_output(&self, input: &RecipeInput) -> Result<RecipeOutput, RecipeError> {
        if !self.supports_network(input.network_name) {
            return Err(RecipeError::UnsupportedNetwork {
                recipe: self.name().to_string(),
                network: input.network_name,
            });
        }
        let span = info_span!("recipe", recipe = self.name(), network = %input.network_name);
        async move {
            info!("Planning recipe");
            let step_outputs = self.get_step_outputs(input).await?;
            let final_output = step_outputs
                .last()
                .ok_or(RecipeError::NoStepOutputs)?;

            let populated_transactions: Vec<_> = step_outputs
                .iter()
                .flat_map(|output| output.populated_transactions.iter().cloned())
                .collect();
            let shield_erc20_addresses =
                shield_erc20_addresses(input, &final_output.output_erc20_amounts);
            let shield_nfts = shield_nfts(&input.unshield_nfts, &final_output.output_nfts);
            let fees: Vec<_> = step_outputs
                .iter()
                .flat_map(|output| output.fee_erc20_amount_recipients.iter().cloned())
                .collect();
            let fee_erc20_amount_recipients = convert_recipe_fees_to_erc20_amount_recipients(&fees);

            info!(
                steps = step_outputs.len(),
                transactions = populated_transactions.len(),
                "Recipe planned"
            );
            Ok::<_, RecipeError>(RecipeOutput {
                step_outputs,
                populated_transactions,
                shield_erc20_addresses,
                shield_nfts,
                fee_erc20_amount_recipients,
            })
        }
        .instrument(span)
        .await
    }
}

fn frame_steps(
    fee_config: &Arc<FeeConfig>,
    internal_steps: Vec<Arc<dyn Step>>,
) -> Vec<Arc<dyn Step>> {
    let mut steps: Vec<Arc<dyn Step>> = Vec::with_capacity(internal_steps.len() + 2);
    steps.push(Arc::new(UnshieldStep::new(fee_config.clone())));
    steps.extend(internal_steps);
    steps.push(Arc::new(ShieldStep::new(fee_config.clone())));
    steps
}

/// Unshield amounts are exact, so expected and minimum balances start out equal.
///
/// Entries listing the same token are merged into one balance, keeping the position of the
/// first entry.
pub fn create_first_step_input(input: &RecipeInput) -> StepInput {
    let mut erc20_amounts: Vec<StepOutputERC20Amount> = Vec::new();
    for unshield in &input.unshield_erc20_amounts {
        let existing = erc20_amounts.iter_mut().find(|held| {
            held.info.token_address == unshield.info.token_address &&
                held.info.is_base_token == unshield.info.is_base_token
        });
        match existing {
            Some(held) => {
                held.expected_balance += &unshield.amount;
                held.min_balance += &unshield.amount;
            }
            None => erc20_amounts.push(StepOutputERC20Amount::from(unshield)),
        }
    }
    StepInput::new(input.network_name, erc20_amounts, input.unshield_nfts.clone())
}

/// Tokens to re-shield: the unshielded tokens followed by the final outputs, without
/// duplicates or base tokens.
///
/// Tokens fully consumed mid-pipeline are not included.
fn shield_erc20_addresses(
    input: &RecipeInput,
    final_outputs: &[StepOutputERC20Amount],
) -> Vec<Address> {
    let mut addresses: Vec<Address> = Vec::new();
    let candidates = input
        .unshield_erc20_amounts
        .iter()
        .map(|amount| &amount.info)
        .chain(final_outputs.iter().map(|amount| &amount.info));
    for info in candidates {
        if !info.is_base_token && !addresses.contains(&info.token_address) {
            addresses.push(info.token_address);
        }
    }
    addresses
}

fn shield_nfts(
    unshield_nfts: &[RecipeNFTInfo],
    final_nfts: &[RecipeNFTInfo],
) -> Vec<RecipeNFTInfo> {
    let mut nfts: Vec<RecipeNFTInfo> = Vec::new();
    for nft in unshield_nfts.iter().chain(final_nfts) {
        if !contains_nft(&nfts, nft) {
            nfts.push(nft.clone());
        }
    }
    nfts
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use num_bigint::BigUint;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        models::{RecipeERC20Amount, RecipeERC20Info},
        step::test_fixtures::*,
    };

    fn recipe_input(amounts: Vec<RecipeERC20Amount>) -> RecipeInput {
        RecipeInput {
            network_name: NetworkName::Ethereum,
            unshield_erc20_amounts: amounts,
            unshield_nfts: vec![],
        }
    }

    #[test]
    fn test_first_step_input_has_exact_balances() {
        let input = recipe_input(vec![RecipeERC20Amount::new(weth(), 12000u64)]);

        let first = create_first_step_input(&input);

        assert_eq!(first.erc20_amounts, vec![amount(weth(), 12000, 12000)]);
    }

    #[test]
    fn test_first_step_input_merges_repeated_tokens() {
        let input = recipe_input(vec![
            RecipeERC20Amount::new(weth(), 12000u64),
            RecipeERC20Amount::new(usdc(), 500u64),
            RecipeERC20Amount::new(weth(), 3000u64),
        ]);

        let first = create_first_step_input(&input);

        assert_eq!(
            first.erc20_amounts,
            vec![amount(weth(), 15000, 15000), amount(usdc(), 500, 500)]
        );
    }

    #[test]
    fn test_shield_addresses_union_in_order_without_base_tokens() {
        let base =
            RecipeERC20Info::base_token(address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"));
        let input = recipe_input(vec![
            RecipeERC20Amount::new(weth(), 1u64),
            RecipeERC20Amount::new(base.clone(), 1u64),
        ]);
        let final_outputs =
            vec![amount(usdc(), 5, 5), amount(weth(), 1, 1), amount(base, 1, 1)];

        assert_eq!(
            shield_erc20_addresses(&input, &final_outputs),
            vec![weth().token_address, usdc().token_address]
        );
    }

    #[test]
    fn test_shield_nfts_are_deduplicated() {
        let nft = |id: u32| {
            RecipeNFTInfo::erc721(
                address!("bc4ca0eda7647a8ab7c2061c2e118a18a936f13d"),
                BigUint::from(id),
            )
        };

        assert_eq!(shield_nfts(&[nft(1), nft(2)], &[nft(2), nft(3)]), vec![nft(1), nft(2), nft(3)]);
    }
}
