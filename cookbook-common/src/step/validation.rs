//! Balance checks shared by every step.
//!
//! Per token the validator tallies what entered the step and what the step declared as spent,
//! paid in fees and output. The rules:
//!
//! 1. Every output keeps `min_balance <= expected_balance`.
//! 2. A step never spends or pays fees beyond the expected balance it received.
//! 3. For each token the step touched, `output == input - spent - fees`. Exchange steps (those
//!    that spend something) may output more than that remainder only for tokens they did not
//!    spend, since they receive tokens from the outside. A spent token's change is exact and
//!    no balance may vanish.
//! 4. Input tokens the step did not touch are carried through unchanged.
//! 5. NFTs cannot be both spent and output; spent NFTs must come from the input; untouched
//!    input NFTs are carried through.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use tracing::debug;

use crate::{
    models::{erc20::TokenKey, StepInput, UnvalidatedStepOutput},
    step::StepError,
    utils::{filters::contains_nft, format_address},
};

#[derive(Default)]
struct TokenFlow {
    input: BigUint,
    spent: BigUint,
    fees: BigUint,
    output: BigUint,
    touched: bool,
}

/// Validates `output` against `input` and fills in carried-through balances.
pub fn validate_step_output(
    step_name: &str,
    input: &StepInput,
    mut output: UnvalidatedStepOutput,
) -> Result<UnvalidatedStepOutput, StepError> {
    let violation = |reason: String| StepError::ContractViolation {
        step: step_name.to_string(),
        reason,
    };

    for amount in &output.output_erc20_amounts {
        if !amount.is_within_bounds() {
            return Err(violation(format!(
                "output {} has min balance {} above expected balance {}",
                format_address(&amount.info.token_address),
                amount.min_balance,
                amount.expected_balance
            )));
        }
    }

    let mut flows: BTreeMap<TokenKey, TokenFlow> = BTreeMap::new();
    for amount in &input.erc20_amounts {
        flows
            .entry(amount.info.key())
            .or_default()
            .input += &amount.expected_balance;
    }
    for spent in &output.spent_erc20_amounts {
        let flow = flows.entry(spent.info.key()).or_default();
        flow.spent += &spent.amount;
        flow.touched = true;
    }
    for fee in &output.fee_erc20_amount_recipients {
        let flow = flows.entry(fee.info.key()).or_default();
        flow.fees += &fee.amount;
        flow.touched = true;
    }
    for amount in &output.output_erc20_amounts {
        let flow = flows.entry(amount.info.key()).or_default();
        flow.output += &amount.expected_balance;
        flow.touched = true;
    }

    let is_exchange = !output.spent_erc20_amounts.is_empty();
    for ((token_address, _), flow) in flows.iter().filter(|(_, flow)| flow.touched) {
        let token = format_address(token_address);
        let consumed = &flow.spent + &flow.fees;
        if consumed > flow.input {
            return Err(violation(format!(
                "declares {consumed} of {token} spent or paid as fees but only {} entered the step",
                flow.input
            )));
        }
        let remainder = &flow.input - &consumed;
        if is_exchange && flow.output < remainder {
            return Err(violation(format!(
                "drops {} of {token}: {remainder} remains after spends and fees but only {} is output",
                &remainder - &flow.output,
                flow.output
            )));
        }
        if is_exchange && flow.spent > BigUint::ZERO && flow.output > remainder {
            return Err(violation(format!(
                "inflates {token}: spends {} but outputs {}, more than the {remainder} left over",
                flow.spent, flow.output
            )));
        }
        if !is_exchange && flow.output != remainder {
            return Err(violation(format!(
                "output {} of {token} does not reconcile with input {}, spent {} and fees {}",
                flow.output, flow.input, flow.spent, flow.fees
            )));
        }
    }

    let carried: Vec<_> = input
        .erc20_amounts
        .iter()
        .filter(|amount| {
            !flows
                .get(&amount.info.key())
                .is_some_and(|flow| flow.touched)
        })
        .cloned()
        .collect();
    if !carried.is_empty() {
        debug!(step = step_name, count = carried.len(), "Carrying untouched ERC20 balances");
    }
    output.output_erc20_amounts.extend(carried);

    for nft in &output.spent_nfts {
        if contains_nft(&output.output_nfts, nft) {
            return Err(violation(format!(
                "NFT {} #{} is both spent and output",
                format_address(&nft.nft_address),
                nft.token_sub_id
            )));
        }
        if !contains_nft(&input.nfts, nft) {
            return Err(violation(format!(
                "spends NFT {} #{} which is not part of its input",
                format_address(&nft.nft_address),
                nft.token_sub_id
            )));
        }
    }
    let carried_nfts: Vec<_> = input
        .nfts
        .iter()
        .filter(|nft| {
            !contains_nft(&output.spent_nfts, nft) && !contains_nft(&output.output_nfts, nft)
        })
        .cloned()
        .collect();
    output.output_nfts.extend(carried_nfts);

    Ok(output)
}
