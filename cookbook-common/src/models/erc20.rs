//! Fungible token records.

use alloy_primitives::Address;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::serde_primitives::biguint_string;

/// Key identifying a fungible token inside a balance snapshot.
pub type TokenKey = (Address, bool);

/// Identifies a fungible token: either an ERC20 contract or the chain's base token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeERC20Info {
    pub token_address: Address,
    /// Native token (e.g. ETH). Base tokens cannot be shielded or unshielded directly.
    #[serde(default)]
    pub is_base_token: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl RecipeERC20Info {
    pub fn new(token_address: Address) -> Self {
        Self { token_address, is_base_token: false, decimals: None }
    }

    pub fn base_token(token_address: Address) -> Self {
        Self { token_address, is_base_token: true, decimals: None }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Two infos refer to the same token when address and base token flag agree. Decimals are
    /// informational and ignored.
    pub fn matches(&self, other: &RecipeERC20Info) -> bool {
        self.token_address == other.token_address && self.is_base_token == other.is_base_token
    }

    pub fn key(&self) -> TokenKey {
        (self.token_address, self.is_base_token)
    }
}

/// A plain token amount, as supplied by the caller or an external quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeERC20Amount {
    #[serde(flatten)]
    pub info: RecipeERC20Info,
    #[serde(with = "biguint_string")]
    pub amount: BigUint,
}

impl RecipeERC20Amount {
    pub fn new(info: RecipeERC20Info, amount: impl Into<BigUint>) -> Self {
        Self { info, amount: amount.into() }
    }
}

/// A balance flowing between steps.
///
/// `expected_balance` is the best estimate, `min_balance` the worst case after slippage. The
/// invariant `min_balance <= expected_balance` is checked on every step output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutputERC20Amount {
    #[serde(flatten)]
    pub info: RecipeERC20Info,
    #[serde(with = "biguint_string")]
    pub expected_balance: BigUint,
    #[serde(with = "biguint_string")]
    pub min_balance: BigUint,
    /// Contract currently allowed to pull this balance, if any.
    #[serde(default)]
    pub approved_spender: Option<Address>,
}

impl StepOutputERC20Amount {
    /// A balance without uncertainty: expected and minimum are the same amount.
    pub fn exact(info: RecipeERC20Info, amount: BigUint) -> Self {
        Self { info, min_balance: amount.clone(), expected_balance: amount, approved_spender: None }
    }

    pub fn is_within_bounds(&self) -> bool {
        self.min_balance <= self.expected_balance
    }
}

impl From<&RecipeERC20Amount> for StepOutputERC20Amount {
    fn from(value: &RecipeERC20Amount) -> Self {
        StepOutputERC20Amount::exact(value.info.clone(), value.amount.clone())
    }
}

/// An amount leaving the private balance towards a recipient, used for both spent amounts and
/// fees. The recipient is a label, not necessarily an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeERC20AmountRecipient {
    #[serde(flatten)]
    pub info: RecipeERC20Info,
    #[serde(with = "biguint_string")]
    pub amount: BigUint,
    pub recipient: String,
}

impl RecipeERC20AmountRecipient {
    pub fn new(info: RecipeERC20Info, amount: BigUint, recipient: impl Into<String>) -> Self {
        Self { info, amount, recipient: recipient.into() }
    }
}
