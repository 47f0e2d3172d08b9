use crate::models::{ERC20AmountRecipient, RecipeERC20AmountRecipient};

/// Converts internal fee records into the public fee schema.
pub fn convert_recipe_fees_to_erc20_amount_recipients(
    fees: &[RecipeERC20AmountRecipient],
) -> Vec<ERC20AmountRecipient> {
    fees.iter()
        .map(|fee| ERC20AmountRecipient {
            token_address: fee.info.token_address,
            amount_string: fee.amount.to_str_radix(10),
            recipient_address: fee.recipient.clone(),
        })
        .collect()
}
