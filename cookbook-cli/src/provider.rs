//! Quote provider serving quotes fixed in the plan file.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use cookbook_common::{
    models::{NetworkName, PopulatedTransaction, RecipeERC20Amount, RecipeERC20Info},
    quote::{
        AddLiquidityData, LiquidityQuoteProvider, QuoteError, RemoveLiquidityData,
        SwapQuoteData, SwapQuoteParams, SwapQuoteProvider,
    },
    serde_primitives::{biguint_string, biguint_string_option},
    utils::fee::min_amount_after_slippage,
};
use num_bigint::BigUint;
use serde::Deserialize;
use tracing::debug;

/// A transaction to a router or exchange proxy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticTransaction {
    pub to: Address,
    pub data: Bytes,
    #[serde(default, with = "biguint_string_option")]
    pub value: Option<BigUint>,
}

impl From<&StaticTransaction> for PopulatedTransaction {
    fn from(tx: &StaticTransaction) -> Self {
        PopulatedTransaction { to: tx.to, data: tx.data.clone(), value: tx.value.clone() }
    }
}

/// Minimum amounts default to the quoted amount minus the requested slippage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticSwapQuote {
    #[serde(with = "biguint_string")]
    pub buy_amount: BigUint,
    #[serde(default, with = "biguint_string_option")]
    pub min_buy_amount: Option<BigUint>,
    #[serde(default)]
    pub spender: Option<Address>,
    #[serde(flatten)]
    pub transaction: StaticTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticAddLiquidityQuote {
    #[serde(with = "biguint_string")]
    pub amount_b: BigUint,
    pub lp_token: RecipeERC20Info,
    #[serde(with = "biguint_string")]
    pub lp_amount: BigUint,
    #[serde(default, with = "biguint_string_option")]
    pub min_lp_amount: Option<BigUint>,
    pub router: Address,
    #[serde(flatten)]
    pub transaction: StaticTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticRemoveLiquidityQuote {
    #[serde(with = "biguint_string")]
    pub amount_a: BigUint,
    #[serde(default, with = "biguint_string_option")]
    pub min_amount_a: Option<BigUint>,
    #[serde(with = "biguint_string")]
    pub amount_b: BigUint,
    #[serde(default, with = "biguint_string_option")]
    pub min_amount_b: Option<BigUint>,
    pub router: Address,
    #[serde(flatten)]
    pub transaction: StaticTransaction,
}

/// Serves the quotes given in a plan, whatever amounts are requested.
#[derive(Debug, Clone)]
pub struct StaticQuoteProvider {
    name: String,
    swap: Option<StaticSwapQuote>,
    add_liquidity: Option<StaticAddLiquidityQuote>,
    remove_liquidity: Option<StaticRemoveLiquidityQuote>,
}

impl StaticQuoteProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), swap: None, add_liquidity: None, remove_liquidity: None }
    }

    pub fn with_swap_quote(mut self, quote: StaticSwapQuote) -> Self {
        self.swap = Some(quote);
        self
    }

    pub fn with_add_liquidity_quote(mut self, quote: StaticAddLiquidityQuote) -> Self {
        self.add_liquidity = Some(quote);
        self
    }

    pub fn with_remove_liquidity_quote(mut self, quote: StaticRemoveLiquidityQuote) -> Self {
        self.remove_liquidity = Some(quote);
        self
    }

    fn no_quote(&self, kind: &str) -> QuoteError {
        QuoteError::NoLiquidity(format!("{} has no {kind} quote", self.name))
    }
}

fn min_or_slippage(
    min: &Option<BigUint>,
    amount: &BigUint,
    slippage_basis_points: u32,
) -> Result<BigUint, QuoteError> {
    match min {
        Some(min) => Ok(min.clone()),
        None => min_amount_after_slippage(amount, slippage_basis_points)
            .map_err(|e| QuoteError::RequestFailed(e.to_string())),
    }
}

#[async_trait]
impl SwapQuoteProvider for StaticQuoteProvider {
    fn exchange_name(&self) -> String {
        self.name.clone()
    }

    fn supports_network(&self, _network_name: NetworkName) -> bool {
        true
    }

    async fn get_swap_quote(&self, params: &SwapQuoteParams) -> Result<SwapQuoteData, QuoteError> {
        let quote = self
            .swap
            .as_ref()
            .ok_or_else(|| self.no_quote("swap"))?;
        debug!(sell = %params.sell_erc20_amount.amount, "Serving static swap quote");
        Ok(SwapQuoteData {
            sell_token_value: params.sell_erc20_amount.amount.clone(),
            spender: quote.spender,
            populated_transaction: (&quote.transaction).into(),
            buy_erc20_amount: RecipeERC20Amount::new(
                params.buy_erc20_info.clone(),
                quote.buy_amount.clone(),
            ),
            minimum_buy_amount: min_or_slippage(
                &quote.min_buy_amount,
                &quote.buy_amount,
                params.slippage_basis_points,
            )?,
            sell_token_address: params.sell_erc20_amount.info.token_address,
        })
    }
}

#[async_trait]
impl LiquidityQuoteProvider for StaticQuoteProvider {
    fn protocol_name(&self) -> String {
        self.name.clone()
    }

    fn supports_network(&self, _network_name: NetworkName) -> bool {
        true
    }

    async fn get_add_liquidity_data(
        &self,
        _network_name: NetworkName,
        erc20_amount_a: &RecipeERC20Amount,
        erc20_info_b: &RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Result<AddLiquidityData, QuoteError> {
        let quote = self
            .add_liquidity
            .as_ref()
            .ok_or_else(|| self.no_quote("add liquidity"))?;
        Ok(AddLiquidityData {
            erc20_amount_a: erc20_amount_a.clone(),
            erc20_amount_b: RecipeERC20Amount::new(erc20_info_b.clone(), quote.amount_b.clone()),
            expected_lp_amount: RecipeERC20Amount::new(
                quote.lp_token.clone(),
                quote.lp_amount.clone(),
            ),
            min_lp_amount: min_or_slippage(
                &quote.min_lp_amount,
                &quote.lp_amount,
                slippage_basis_points,
            )?,
            router_contract: quote.router,
            populated_transaction: (&quote.transaction).into(),
        })
    }

    async fn get_remove_liquidity_data(
        &self,
        _network_name: NetworkName,
        lp_erc20_amount: &RecipeERC20Amount,
        erc20_info_a: &RecipeERC20Info,
        erc20_info_b: &RecipeERC20Info,
        slippage_basis_points: u32,
    ) -> Result<RemoveLiquidityData, QuoteError> {
        let quote = self
            .remove_liquidity
            .as_ref()
            .ok_or_else(|| self.no_quote("remove liquidity"))?;
        Ok(RemoveLiquidityData {
            lp_erc20_amount: lp_erc20_amount.clone(),
            expected_amount_a: RecipeERC20Amount::new(
                erc20_info_a.clone(),
                quote.amount_a.clone(),
            ),
            min_amount_a: min_or_slippage(
                &quote.min_amount_a,
                &quote.amount_a,
                slippage_basis_points,
            )?,
            expected_amount_b: RecipeERC20Amount::new(
                erc20_info_b.clone(),
                quote.amount_b.clone(),
            ),
            min_amount_b: min_or_slippage(
                &quote.min_amount_b,
                &quote.amount_b,
                slippage_basis_points,
            )?,
            router_contract: quote.router,
            populated_transaction: (&quote.transaction).into(),
        })
    }
}
