use crate::models::{RecipeERC20Info, RecipeNFTInfo, StepOutputERC20Amount};

/// First balance in `amounts` for the given token.
pub fn find_first_input_erc20_amount<'a>(
    amounts: &'a [StepOutputERC20Amount],
    info: &RecipeERC20Info,
) -> Option<&'a StepOutputERC20Amount> {
    amounts
        .iter()
        .find(|amount| amount.info.matches(info))
}

pub fn contains_nft(nfts: &[RecipeNFTInfo], nft: &RecipeNFTInfo) -> bool {
    nfts.iter().any(|candidate| candidate.matches(nft))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use num_bigint::BigUint;

    use super::*;

    #[test]
    fn test_find_first_input_erc20_amount() {
        let weth = RecipeERC20Info::new(address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"));
        let usdc = RecipeERC20Info::new(address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"));
        let amounts = vec![
            StepOutputERC20Amount::exact(usdc.clone(), BigUint::from(1u32)),
            StepOutputERC20Amount::exact(weth.clone(), BigUint::from(2u32)),
            StepOutputERC20Amount::exact(weth.clone(), BigUint::from(3u32)),
        ];

        let found = find_first_input_erc20_amount(&amounts, &weth).unwrap();

        assert_eq!(found.expected_balance, BigUint::from(2u32));
        assert!(find_first_input_erc20_amount(
            &amounts,
            &RecipeERC20Info::base_token(weth.token_address)
        )
        .is_none());
    }
}
