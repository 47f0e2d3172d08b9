//! Error types for step execution.

use num_bigint::BigUint;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors a step can fail with. Any of them aborts the whole recipe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The step wants to spend more than the worst case balance available to it.
    #[error("{step} step failed. Specified amount {amount} exceeds balance {balance}.")]
    AmountExceedsBalance { step: String, amount: BigUint, balance: BigUint },

    /// A token the step operates on is not part of its input balances.
    #[error("{step} step failed. Inputs must contain ERC20 Amount: {token}")]
    MissingInputToken { step: String, token: String },

    /// Base tokens have to be wrapped before they can be shielded or unshielded.
    #[error("Cannot {action} base token.")]
    BaseTokenUnsupported { action: &'static str },

    /// The step produced an output that breaks the balance invariants. This is a bug in the
    /// step, not a user error.
    #[error("{step} step violated its output contract: {reason}")]
    ContractViolation { step: String, reason: String },

    #[error("{step} step failed. Could not encode transaction: {reason}")]
    Encoding { step: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
