//! Liquidity pool deposits and withdrawals.

mod add;
mod remove;

pub use add::AddLiquidityStep;
pub use remove::RemoveLiquidityStep;

/// Spend recipient label for a pool of `protocol_name`.
fn pool_recipient(protocol_name: &str) -> String {
    format!("{protocol_name} Liquidity Pool")
}
