use std::sync::Arc;

use async_trait::async_trait;

use super::deduct_fees;
use crate::{
    config::FeeConfig,
    models::{StepInput, UnvalidatedStepOutput},
    step::{Step, StepError},
};

const SHIELD_FEE_RECIPIENT: &str = "RAILGUN Shield Fee";

/// Moves every remaining balance back into the private pool, paying the shield fee.
#[derive(Debug, Clone)]
pub struct ShieldStep {
    fee_config: Arc<FeeConfig>,
}

impl ShieldStep {
    pub fn new(fee_config: Arc<FeeConfig>) -> Self {
        Self { fee_config }
    }
}

#[async_trait]
impl Step for ShieldStep {
    fn name(&self) -> &str {
        "Shield"
    }

    fn description(&self) -> &str {
        "Shield ERC20s and NFTs into private RAILGUN balance."
    }

    fn can_add_step(&self) -> bool {
        false
    }

    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError> {
        let basis_points = self.fee_config.shield_fee_basis_points()?;
        if input
            .erc20_amounts
            .iter()
            .any(|amount| amount.info.is_base_token)
        {
            return Err(StepError::BaseTokenUnsupported { action: "shield" });
        }

        // Actual min amount doesn't matter: any amount that arrives gets shielded.
        let (output_erc20_amounts, fee_erc20_amount_recipients) =
            deduct_fees(&input.erc20_amounts, basis_points, SHIELD_FEE_RECIPIENT, true)?;

        Ok(UnvalidatedStepOutput {
            output_erc20_amounts,
            fee_erc20_amount_recipients,
            output_nfts: input.nfts.clone(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use num_bigint::BigUint;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::ConfigError,
        models::{RecipeERC20AmountRecipient, RecipeERC20Info},
        step::test_fixtures::*,
    };

    fn step() -> ShieldStep {
        ShieldStep::new(Arc::new(FeeConfig::uniform(25, 25).unwrap()))
    }

    #[tokio::test]
    async fn test_shield_uses_expected_balance_for_fees() {
        let mut change = amount(weth(), 1970, 1970);
        change.approved_spender = Some(SPENDER);
        let input = step_input(vec![amount(usdc(), 500, 495), change]);

        let output = step().get_valid_step_output(&input).await.unwrap();

        let mut shielded_change = amount(weth(), 1966, 1966);
        shielded_change.approved_spender = Some(SPENDER);
        assert_eq!(output.output_erc20_amounts, vec![amount(usdc(), 499, 499), shielded_change]);
        assert_eq!(
            output.fee_erc20_amount_recipients,
            vec![
                RecipeERC20AmountRecipient::new(usdc(), BigUint::from(1u32), "RAILGUN Shield Fee"),
                RecipeERC20AmountRecipient::new(weth(), BigUint::from(4u32), "RAILGUN Shield Fee"),
            ]
        );
    }

    #[tokio::test]
    async fn test_shield_rejects_base_token() {
        let base = amount(RecipeERC20Info::base_token(Address::ZERO), 100, 100);

        let err = step()
            .get_valid_step_output(&step_input(vec![base]))
            .await
            .unwrap_err();

        assert_eq!(err, StepError::BaseTokenUnsupported { action: "shield" });
    }

    #[tokio::test]
    async fn test_shield_requires_configuration() {
        let step = ShieldStep::new(Arc::new(FeeConfig::unconfigured()));

        let err = step
            .get_valid_step_output(&step_input(vec![amount(weth(), 1, 1)]))
            .await
            .unwrap_err();

        assert_eq!(err, StepError::Config(ConfigError::MissingShieldFee));
        assert_eq!(err.to_string(), "No shield fee set - run initialization first.");
    }
}
