//! Plan files: what to unshield, which recipe to run and the quotes to run it with.

use std::{fs, path::Path};

use alloy_primitives::Address;
use cookbook_common::{
    models::{RecipeERC20Info, RecipeInput},
    serde_primitives::biguint_string_option,
    ConfigError, FeeConfig,
};
use num_bigint::BigUint;
use serde::Deserialize;
use thiserror::Error;

use crate::provider::{StaticAddLiquidityQuote, StaticRemoveLiquidityQuote, StaticSwapQuote};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to read plan {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse plan {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    pub input: RecipeInput,
    pub recipe: RecipeSpec,
    #[serde(default)]
    pub fee_config: Option<FeeSettings>,
}

impl Plan {
    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path)
            .map_err(|source| PlanError::Read { path: display.clone(), source })?;
        serde_json::from_str(&raw).map_err(|source| PlanError::Parse { path: display, source })
    }
}

/// Flat fee settings, with the same unshield fee on every network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeeSettings {
    pub shield_fee_basis_points: u32,
    pub unshield_fee_basis_points: u32,
}

impl FeeSettings {
    pub fn into_fee_config(self) -> Result<FeeConfig, ConfigError> {
        FeeConfig::uniform(self.shield_fee_basis_points, self.unshield_fee_basis_points)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeSpec {
    Swap {
        exchange_name: String,
        sell_token: RecipeERC20Info,
        buy_token: RecipeERC20Info,
        /// Defaults to the whole balance available after unshielding.
        #[serde(default, with = "biguint_string_option")]
        sell_amount: Option<BigUint>,
        slippage_basis_points: u32,
        quote: StaticSwapQuote,
    },
    AddLiquidity {
        protocol_name: String,
        token_a: RecipeERC20Info,
        token_b: RecipeERC20Info,
        slippage_basis_points: u32,
        quote: StaticAddLiquidityQuote,
    },
    RemoveLiquidity {
        protocol_name: String,
        lp_token: RecipeERC20Info,
        token_a: RecipeERC20Info,
        token_b: RecipeERC20Info,
        slippage_basis_points: u32,
        quote: StaticRemoveLiquidityQuote,
    },
    /// Explicit approvals between unshield and shield.
    Steps {
        name: String,
        #[serde(default)]
        description: String,
        approvals: Vec<ApprovalSpec>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalSpec {
    pub spender: Address,
    pub token: RecipeERC20Info,
    #[serde(default, with = "biguint_string_option")]
    pub amount: Option<BigUint>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_steps_plan() {
        let plan: Plan = serde_json::from_str(
            r#"{
                "input": {
                    "network_name": "polygon",
                    "unshield_erc20_amounts": [
                        {"token_address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "amount": "5"}
                    ]
                },
                "recipe": {
                    "kind": "steps",
                    "name": "Approvals",
                    "approvals": [{
                        "spender": "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
                        "token": {"token_address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"},
                        "amount": "3"
                    }]
                },
                "fee_config": {"shield_fee_basis_points": 25, "unshield_fee_basis_points": 30}
            }"#,
        )
        .unwrap();

        let RecipeSpec::Steps { name, approvals, .. } = plan.recipe else {
            panic!("expected a steps recipe");
        };
        assert_eq!(name, "Approvals");
        assert_eq!(approvals[0].amount, Some(BigUint::from(3u32)));
        assert_eq!(
            plan.fee_config,
            Some(FeeSettings { shield_fee_basis_points: 25, unshield_fee_basis_points: 30 })
        );
        assert_eq!(plan.input.unshield_erc20_amounts[0].amount, BigUint::from(5u32));
    }

    #[test]
    fn test_unknown_recipe_kind_is_rejected() {
        let result = serde_json::from_str::<RecipeSpec>(r#"{"kind": "bridge"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_fee_settings_are_validated() {
        let settings =
            FeeSettings { shield_fee_basis_points: 10_001, unshield_fee_basis_points: 0 };

        assert_eq!(settings.into_fee_config(), Err(ConfigError::InvalidBasisPoints(10_001)));
    }
}
