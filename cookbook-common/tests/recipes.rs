use std::sync::Arc;

use alloy_primitives::{address, Address, Bytes};
use async_trait::async_trait;
use cookbook_common::{
    models::{
        NetworkName, PopulatedTransaction, RecipeERC20Amount, RecipeERC20Info, RecipeInput,
        RecipeNFTInfo,
    },
    quote::{QuoteError, SwapQuoteData, SwapQuoteParams, SwapQuoteProvider},
    recipe::{SwapRecipe, StepRecipe},
    step::token::ApproveERC20SpenderStep,
    FeeConfig, Recipe, RecipeError, StepError,
};
use num_bigint::BigUint;
use pretty_assertions::assert_eq;

const SPENDER: Address = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
const EXCHANGE_PROXY: Address = address!("def1c0ded9bec7f1a1670819833240f027b25eff");

fn sell_token() -> RecipeERC20Info {
    RecipeERC20Info::new(address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"))
}

fn buy_token() -> RecipeERC20Info {
    RecipeERC20Info::new(address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"))
}

/// Always quotes 500 of the buy token, at least 495, for whatever is sold.
struct StubSwapQuoteProvider;

#[async_trait]
impl SwapQuoteProvider for StubSwapQuoteProvider {
    fn exchange_name(&self) -> String {
        "0x Exchange".to_string()
    }

    fn supports_network(&self, _network_name: NetworkName) -> bool {
        true
    }

    async fn get_swap_quote(&self, params: &SwapQuoteParams) -> Result<SwapQuoteData, QuoteError> {
        Ok(SwapQuoteData {
            sell_token_value: params.sell_erc20_amount.amount.clone(),
            spender: Some(SPENDER),
            populated_transaction: PopulatedTransaction::new(
                EXCHANGE_PROXY,
                Bytes::from_static(&[0x41, 0x55, 0x65, 0xb0]),
            )
            .with_value(BigUint::from(0u32)),
            buy_erc20_amount: RecipeERC20Amount::new(params.buy_erc20_info.clone(), 500u64),
            minimum_buy_amount: BigUint::from(495u32),
            sell_token_address: params.sell_erc20_amount.info.token_address,
        })
    }
}

fn fee_config() -> Arc<FeeConfig> {
    Arc::new(FeeConfig::uniform(25, 25).unwrap())
}

fn swap_recipe() -> SwapRecipe {
    SwapRecipe::new(fee_config(), Arc::new(StubSwapQuoteProvider), sell_token(), buy_token(), 100)
        .with_sell_amount(BigUint::from(10000u32))
}

fn unshield(info: RecipeERC20Info, amount: u64) -> RecipeInput {
    RecipeInput {
        network_name: NetworkName::Ethereum,
        unshield_erc20_amounts: vec![RecipeERC20Amount::new(info, amount)],
        unshield_nfts: vec![],
    }
}

#[tokio::test]
async fn test_swap_recipe_scenario() {
    let output = swap_recipe()
        .get_recipe_output(&unshield(sell_token(), 12000))
        .await
        .unwrap();

    let names: Vec<_> = output
        .step_outputs
        .iter()
        .map(|step| step.name.as_str())
        .collect();
    assert_eq!(names, vec!["Unshield", "Approve ERC20 Spender", "0x Exchange Swap", "Shield"]);

    let unshielded = &output.step_outputs[0].output_erc20_amounts;
    assert_eq!(unshielded[0].expected_balance, BigUint::from(11970u32));

    assert_eq!(output.populated_transactions.len(), 2);
    let approval = &output.populated_transactions[0];
    assert_eq!(approval.to, sell_token().token_address);
    assert_eq!(
        hex::encode(&approval.data),
        "095ea7b3000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045\
         0000000000000000000000000000000000000000000000000000000000002ec2"
    );
    assert_eq!(output.populated_transactions[1].to, EXCHANGE_PROXY);

    let shielded: Vec<_> = output.step_outputs[3]
        .output_erc20_amounts
        .iter()
        .map(|amount| (amount.info.token_address, amount.expected_balance.clone()))
        .collect();
    assert_eq!(
        shielded,
        vec![
            (buy_token().token_address, BigUint::from(499u32)),
            (sell_token().token_address, BigUint::from(1966u32)),
        ]
    );

    assert_eq!(
        output.shield_erc20_addresses,
        vec![sell_token().token_address, buy_token().token_address]
    );
    let fees: Vec<_> = output
        .fee_erc20_amount_recipients
        .iter()
        .map(|fee| (fee.token_address, fee.amount_string.as_str(), fee.recipient_address.as_str()))
        .collect();
    assert_eq!(
        fees,
        vec![
            (sell_token().token_address, "30", "RAILGUN Unshield Fee"),
            (buy_token().token_address, "1", "RAILGUN Shield Fee"),
            (sell_token().token_address, "4", "RAILGUN Shield Fee"),
        ]
    );
}

#[tokio::test]
async fn test_repeated_unshield_entries_are_merged() {
    let input = RecipeInput {
        network_name: NetworkName::Ethereum,
        unshield_erc20_amounts: vec![
            RecipeERC20Amount::new(sell_token(), 12000u64),
            RecipeERC20Amount::new(sell_token(), 12000u64),
        ],
        unshield_nfts: vec![],
    };

    let output = swap_recipe()
        .get_recipe_output(&input)
        .await
        .unwrap();

    let unshielded = &output.step_outputs[0].output_erc20_amounts;
    assert_eq!(unshielded.len(), 1);
    assert_eq!(unshielded[0].expected_balance, BigUint::from(23940u32));
    let shielded: Vec<_> = output.step_outputs[3]
        .output_erc20_amounts
        .iter()
        .map(|amount| (amount.info.token_address, amount.expected_balance.clone()))
        .collect();
    // 23940 - 10000 sold = 13940 change, less a 34 shield fee
    assert_eq!(
        shielded,
        vec![
            (buy_token().token_address, BigUint::from(499u32)),
            (sell_token().token_address, BigUint::from(13906u32)),
        ]
    );
    let fees: Vec<_> = output
        .fee_erc20_amount_recipients
        .iter()
        .map(|fee| fee.amount_string.as_str())
        .collect();
    assert_eq!(fees, vec!["60", "1", "34"]);
    assert_eq!(
        output.shield_erc20_addresses,
        vec![sell_token().token_address, buy_token().token_address]
    );
}

#[tokio::test]
async fn test_swap_recipe_insufficient_balance() {
    let err = swap_recipe()
        .get_recipe_output(&unshield(sell_token(), 2000))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RecipeError::Step(StepError::AmountExceedsBalance {
            step: "0x Exchange Swap".to_string(),
            amount: BigUint::from(10000u32),
            balance: BigUint::from(1995u32),
        })
    );
    assert_eq!(
        err.to_string(),
        "0x Exchange Swap step failed. Specified amount 10000 exceeds balance 1995."
    );
}

#[tokio::test]
async fn test_swap_recipe_without_sell_token() {
    let err = swap_recipe()
        .get_recipe_output(&unshield(buy_token(), 2000))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Swap Recipe inputs must contain sell ERC20 Amount: \
         0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
    );
}

#[tokio::test]
async fn test_recipe_output_is_deterministic() {
    let input = unshield(sell_token(), 12000);

    let first = swap_recipe()
        .get_recipe_output(&input)
        .await
        .unwrap();
    let second = swap_recipe()
        .get_recipe_output(&input)
        .await
        .unwrap();

    assert_eq!(serde_json::to_vec(&first).unwrap(), serde_json::to_vec(&second).unwrap());
}

#[tokio::test]
async fn test_sell_token_reconciles_at_every_step() {
    let output = swap_recipe()
        .get_recipe_output(&unshield(sell_token(), 12000))
        .await
        .unwrap();

    let sell = sell_token();
    let mut step_input = BigUint::from(12000u32);
    for step in &output.step_outputs {
        let spent: BigUint = step
            .spent_erc20_amounts
            .iter()
            .filter(|amount| amount.info.matches(&sell))
            .map(|amount| &amount.amount)
            .sum();
        let fees: BigUint = step
            .fee_erc20_amount_recipients
            .iter()
            .filter(|fee| fee.info.matches(&sell))
            .map(|fee| &fee.amount)
            .sum();
        let out: BigUint = step
            .output_erc20_amounts
            .iter()
            .filter(|amount| amount.info.matches(&sell))
            .map(|amount| &amount.expected_balance)
            .sum();

        assert_eq!(&spent + &fees + &out, step_input, "{} does not reconcile", step.name);
        step_input = out;
    }
}

#[tokio::test]
async fn test_nfts_pass_through_and_are_reshielded() {
    let nft = RecipeNFTInfo::erc721(
        address!("bc4ca0eda7647a8ab7c2061c2e118a18a936f13d"),
        BigUint::from(42u32),
    );
    let mut recipe = StepRecipe::new("Approve", "Approve a spender", fee_config());
    recipe
        .add_step(Arc::new(ApproveERC20SpenderStep::new(SPENDER, sell_token(), None)))
        .unwrap();
    let mut input = unshield(sell_token(), 12000);
    input.unshield_nfts = vec![nft.clone()];

    let output = recipe.get_recipe_output(&input).await.unwrap();

    assert!(output
        .step_outputs
        .iter()
        .all(|step| step.output_nfts == vec![nft.clone()]));
    assert_eq!(output.shield_nfts, vec![nft]);
}

#[tokio::test]
async fn test_base_token_cannot_be_unshielded() {
    let recipe = StepRecipe::new("Empty", "Nothing", fee_config());
    let base = RecipeERC20Info::base_token(address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"));

    let err = recipe
        .get_recipe_output(&unshield(base, 1))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Cannot unshield base token.");
}
