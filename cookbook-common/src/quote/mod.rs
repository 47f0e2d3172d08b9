//! Quote provider collaborators.
//!
//! Swap aggregators and liquidity pools live outside this crate. Recipes only see them through
//! these traits: a request describing what should be sold and a response carrying the quoted
//! amount, the guaranteed minimum after slippage, the contract that needs an allowance and the
//! transaction to execute.

use alloy_primitives::Address;
use async_trait::async_trait;
use num_bigint::BigUint;
use thiserror::Error;

use crate::models::{NetworkName, PopulatedTransaction, RecipeERC20Amount, RecipeERC20Info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("No liquidity available: {0}")]
    NoLiquidity(String),
    #[error("Network {0} is not supported by this quote provider")]
    UnsupportedNetwork(NetworkName),
    #[error("Quote request failed: {0}")]
    RequestFailed(String),
}

/// Request for a swap quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuoteParams {
    pub network_name: NetworkName,
    pub sell_erc20_amount: RecipeERC20Amount,
    pub buy_erc20_info: RecipeERC20Info,
    pub slippage_basis_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuoteData {
    /// Amount of the sell token the quoted transaction pulls.
    pub sell_token_value: BigUint,
    /// Contract that must be approved to pull the sell token, if any.
    pub spender: Option<Address>,
    pub populated_transaction: PopulatedTransaction,
    /// Quoted amount of the buy token.
    pub buy_erc20_amount: RecipeERC20Amount,
    /// Guaranteed minimum of the buy token after slippage.
    pub minimum_buy_amount: BigUint,
    /// Sell token as the provider names it; may be a filler address for base tokens.
    pub sell_token_address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityData {
    pub erc20_amount_a: RecipeERC20Amount,
    pub erc20_amount_b: RecipeERC20Amount,
    pub expected_lp_amount: RecipeERC20Amount,
    pub min_lp_amount: BigUint,
    pub router_contract: Address,
    pub populated_transaction: PopulatedTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLiquidityData {
    pub lp_erc20_amount: RecipeERC20Amount,
    pub expected_amount_a: RecipeERC20Amount,
    pub min_amount_a: BigUint,
    pub expected_amount_b: RecipeERC20Amount,
    pub min_amount_b: BigUint,
    pub router_contract: Address,
    pub populated_transaction: PopulatedTransaction,
}

/// Source of swap quotes, e.g. a DEX aggregator API.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait SwapQuoteProvider: Send + Sync {
    /// Human readable exchange name, used in step names and spend recipients.
    fn exchange_name(&self) -> String;

    fn supports_network(&self, network_name: NetworkName) -> bool;

    async fn get_swap_quote(&self, params: &SwapQuoteParams) -> Result<SwapQuoteData, QuoteError>;
}

/// Source of liquidity quotes for a family of pools.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait LiquidityQuoteProvider: Send + Sync {
    fn protocol_name(&self) -> String;

    fn supports_network(&self, network_name: NetworkName) -> bool;

    /// Quote for depositing `erc20_amount_a` plus the matching amount of `erc20_info_b`.
    async fn get_add_liquidity_data(
        &self,
        network_name: NetworkName,
        erc20_amount_a: &RecipeERC20Amount,
        erc20_info_b: &RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Result<AddLiquidityData, QuoteError>;

    /// Quote for burning `lp_erc20_amount` into the two pool tokens.
    async fn get_remove_liquidity_data(
        &self,
        network_name: NetworkName,
        lp_erc20_amount: &RecipeERC20Amount,
        erc20_info_a: &RecipeERC20Info,
        erc20_info_b: &RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Result<RemoveLiquidityData, QuoteError>;
}
