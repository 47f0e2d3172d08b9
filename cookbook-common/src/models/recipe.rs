use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::{
    erc20::RecipeERC20Amount, nft::RecipeNFTInfo, step::StepOutput,
    transaction::PopulatedTransaction, NetworkName,
};

/// What the caller wants to take out of the private balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub network_name: NetworkName,
    pub unshield_erc20_amounts: Vec<RecipeERC20Amount>,
    #[serde(default)]
    pub unshield_nfts: Vec<RecipeNFTInfo>,
}

/// Fee recipient in the public schema: amounts are decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ERC20AmountRecipient {
    pub token_address: Address,
    pub amount_string: String,
    pub recipient_address: String,
}

/// The complete, validated plan for one recipe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeOutput {
    pub step_outputs: Vec<StepOutput>,
    /// All step transactions, flattened in step order.
    pub populated_transactions: Vec<PopulatedTransaction>,
    /// Tokens to re-shield after execution, deduplicated, base tokens excluded.
    pub shield_erc20_addresses: Vec<Address>,
    pub shield_nfts: Vec<RecipeNFTInfo>,
    pub fee_erc20_amount_recipients: Vec<ERC20AmountRecipient>,
}
