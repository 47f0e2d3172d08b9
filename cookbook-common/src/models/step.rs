use serde::{Deserialize, Serialize};

use super::{
    erc20::{RecipeERC20AmountRecipient, StepOutputERC20Amount},
    nft::RecipeNFTInfo,
    transaction::PopulatedTransaction,
    NetworkName,
};

/// Balance state entering a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInput {
    pub network_name: NetworkName,
    pub erc20_amounts: Vec<StepOutputERC20Amount>,
    pub nfts: Vec<RecipeNFTInfo>,
}

impl StepInput {
    pub fn new(
        network_name: NetworkName,
        erc20_amounts: Vec<StepOutputERC20Amount>,
        nfts: Vec<RecipeNFTInfo>,
    ) -> Self {
        Self { network_name, erc20_amounts, nfts }
    }

    /// Input for the step that follows `output` on the same network.
    pub fn next(&self, output: &StepOutput) -> StepInput {
        StepInput {
            network_name: self.network_name,
            erc20_amounts: output.output_erc20_amounts.clone(),
            nfts: output.output_nfts.clone(),
        }
    }
}

/// Raw result of a step before the shared balance checks have run.
///
/// Input balances a step does not mention are carried through by the validator, so steps only
/// declare what they touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnvalidatedStepOutput {
    pub populated_transactions: Vec<PopulatedTransaction>,
    pub spent_erc20_amounts: Vec<RecipeERC20AmountRecipient>,
    pub output_erc20_amounts: Vec<StepOutputERC20Amount>,
    pub spent_nfts: Vec<RecipeNFTInfo>,
    pub output_nfts: Vec<RecipeNFTInfo>,
    pub fee_erc20_amount_recipients: Vec<RecipeERC20AmountRecipient>,
}

/// A validated step result, labelled with the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutput {
    pub name: String,
    pub description: String,
    pub populated_transactions: Vec<PopulatedTransaction>,
    pub spent_erc20_amounts: Vec<RecipeERC20AmountRecipient>,
    pub output_erc20_amounts: Vec<StepOutputERC20Amount>,
    pub spent_nfts: Vec<RecipeNFTInfo>,
    pub output_nfts: Vec<RecipeNFTInfo>,
    pub fee_erc20_amount_recipients: Vec<RecipeERC20AmountRecipient>,
}

impl StepOutput {
    pub(crate) fn from_validated(
        name: &str,
        description: &str,
        output: UnvalidatedStepOutput,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            populated_transactions: output.populated_transactions,
            spent_erc20_amounts: output.spent_erc20_amounts,
            output_erc20_amounts: output.output_erc20_amounts,
            spent_nfts: output.spent_nfts,
            output_nfts: output.output_nfts,
            fee_erc20_amount_recipients: output.fee_erc20_amount_recipients,
        }
    }
}
