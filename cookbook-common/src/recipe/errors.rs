//! Error types for recipe planning and execution.

use thiserror::Error;

use crate::{models::NetworkName, quote::QuoteError, step::StepError};

/// Errors a recipe can fail with. The first failure aborts the whole plan; no partial output is
/// ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// Boundary steps are injected by the recipe and cannot be added by callers.
    #[error("Cannot add Recipe Step: {0}")]
    CannotAddStep(String),

    /// The framed pipeline produced nothing. Unreachable unless the framing itself is broken.
    #[error("No step outputs were generated.")]
    NoStepOutputs,

    #[error("{recipe} does not support network {network}")]
    UnsupportedNetwork { recipe: String, network: NetworkName },

    /// A token the recipe needs is missing from the unshielded balances.
    #[error("{kind} Recipe inputs must contain {label} ERC20 Amount: {token}")]
    MissingInput { kind: &'static str, label: &'static str, token: String },

    #[error("{recipe} failed to fetch a quote: {source}")]
    Quote {
        recipe: String,
        #[source]
        source: QuoteError,
    },

    #[error(transparent)]
    Step(#[from] StepError),
}
