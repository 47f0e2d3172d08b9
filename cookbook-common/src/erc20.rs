//! ERC20 calldata encoding.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use num_bigint::BigUint;

// ERC20 interface definition, limited to what recipes emit.
// Copied from EIP-20: https://eips.ethereum.org/EIPS/eip-20
sol! {
    function approve(address _spender, uint256 _value) public returns (bool success);
}

/// Converts an amount to `U256`, or `None` if it does not fit in 256 bits.
pub fn biguint_to_u256(value: &BigUint) -> Option<U256> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    Some(U256::from_be_slice(&bytes))
}

/// Encode approve(address,uint256) call. Fails if `value` exceeds `uint256`.
pub fn encode_approve(spender: Address, value: &BigUint) -> Option<Bytes> {
    let value = biguint_to_u256(value)?;
    Some(
        approveCall { _spender: spender, _value: value }
            .abi_encode()
            .into(),
    )
}
