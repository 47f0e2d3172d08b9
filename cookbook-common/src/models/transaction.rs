use alloy_primitives::{Address, Bytes};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::serde_primitives::biguint_string_option;

/// An unsigned transaction payload. Signing, gas estimation and broadcasting are left to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedTransaction {
    pub to: Address,
    pub data: Bytes,
    #[serde(with = "biguint_string_option", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<BigUint>,
}

impl PopulatedTransaction {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self { to, data: data.into(), value: None }
    }

    pub fn with_value(mut self, value: BigUint) -> Self {
        self.value = Some(value);
        self
    }
}
