//! Non-fungible token records. NFTs pass through steps without balance math; a step only
//! declares whether it spends or produces one.

use alloy_primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::serde_primitives::biguint_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum NFTTokenType {
    #[serde(rename = "ERC721")]
    #[strum(serialize = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    #[strum(serialize = "ERC1155")]
    Erc1155,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeNFTInfo {
    pub nft_address: Address,
    pub nft_token_type: NFTTokenType,
    #[serde(with = "biguint_string")]
    pub token_sub_id: BigUint,
    /// Always 1 for ERC721.
    #[serde(with = "biguint_string")]
    pub amount: BigUint,
}

impl RecipeNFTInfo {
    pub fn erc721(nft_address: Address, token_sub_id: BigUint) -> Self {
        Self {
            nft_address,
            nft_token_type: NFTTokenType::Erc721,
            token_sub_id,
            amount: BigUint::from(1u32),
        }
    }

    pub fn erc1155(nft_address: Address, token_sub_id: BigUint, amount: BigUint) -> Self {
        Self { nft_address, nft_token_type: NFTTokenType::Erc1155, token_sub_id, amount }
    }

    /// Same collection and token id.
    pub fn matches(&self, other: &RecipeNFTInfo) -> bool {
        self.nft_address == other.nft_address && self.token_sub_id == other.token_sub_id
    }
}
