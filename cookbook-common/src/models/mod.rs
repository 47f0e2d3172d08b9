//! Ledger types passed between steps and recipes.
//!
//! All records are plain values. A step receives a [`step::StepInput`] snapshot and returns a
//! fresh [`step::UnvalidatedStepOutput`]; nothing is shared or mutated in place across steps.

pub mod erc20;
pub mod nft;
pub mod recipe;
pub mod step;
pub mod transaction;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub use erc20::{
    RecipeERC20Amount, RecipeERC20AmountRecipient, RecipeERC20Info, StepOutputERC20Amount,
};
pub use nft::{NFTTokenType, RecipeNFTInfo};
pub use recipe::{ERC20AmountRecipient, RecipeInput, RecipeOutput};
pub use step::{StepInput, StepOutput, UnvalidatedStepOutput};
pub use transaction::PopulatedTransaction;

/// Networks a recipe can be planned for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    Display,
    Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NetworkName {
    #[default]
    Ethereum,
    BnbChain,
    Polygon,
    Arbitrum,
    EthereumGoerli,
    PolygonMumbai,
    ArbitrumGoerli,
    Hardhat,
}
