pub mod convert;
pub mod fee;
pub mod filters;

use alloy_primitives::Address;

/// Lowercase `0x`-prefixed rendering used in user facing messages.
pub fn format_address(address: &Address) -> String {
    address.to_string().to_lowercase()
}
