//! Step and recipe engine for private DeFi transaction plans.
//!
//! A [`recipe::Recipe`] frames a caller's intent (swap, add or remove liquidity, or an explicit
//! list of steps) between a fixed unshield step and a fixed shield step. Balances are threaded
//! through every [`step::Step`], each step output is validated against the shared balance
//! invariants, and the final [`models::recipe::RecipeOutput`] carries the ordered transaction
//! plan together with the reconciled fee accounting.
//!
//! Nothing here signs or broadcasts transactions; the output is an unsigned plan.

pub mod config;
pub mod erc20;
pub mod models;
pub mod quote;
pub mod recipe;
pub mod serde_primitives;
pub mod step;
pub mod utils;

pub use config::{ConfigError, FeeConfig};
pub use recipe::{Recipe, RecipeError};
pub use step::{Step, StepError};
