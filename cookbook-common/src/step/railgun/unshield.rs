use std::sync::Arc;

use async_trait::async_trait;

use super::deduct_fees;
use crate::{
    config::FeeConfig,
    models::{StepInput, UnvalidatedStepOutput},
    step::{Step, StepError},
};

const UNSHIELD_FEE_RECIPIENT: &str = "RAILGUN Unshield Fee";

/// Moves balances out of the private pool, paying the network's unshield fee.
#[derive(Debug, Clone)]
pub struct UnshieldStep {
    fee_config: Arc<FeeConfig>,
}

impl UnshieldStep {
    pub fn new(fee_config: Arc<FeeConfig>) -> Self {
        Self { fee_config }
    }
}

#[async_trait]
impl Step for UnshieldStep {
    fn name(&self) -> &str {
        "Unshield"
    }

    fn description(&self) -> &str {
        "Unshield ERC20s and NFTs from private RAILGUN balance."
    }

    fn can_add_step(&self) -> bool {
        false
    }

    async fn get_step_output(&self, input: &StepInput) -> Result<UnvalidatedStepOutput, StepError> {
        let basis_points = self
            .fee_config
            .unshield_fee_basis_points(input.network_name)?;
        if input
            .erc20_amounts
            .iter()
            .any(|amount| amount.info.is_base_token)
        {
            return Err(StepError::BaseTokenUnsupported { action: "unshield" });
        }

        let (output_erc20_amounts, fee_erc20_amount_recipients) =
            deduct_fees(&input.erc20_amounts, basis_points, UNSHIELD_FEE_RECIPIENT, false)?;

        Ok(UnvalidatedStepOutput {
            output_erc20_amounts,
            fee_erc20_amount_recipients,
            output_nfts: input.nfts.clone(),
            ..Default::default()
        })
    }
}
