use cosmwasm_std::{Coin, Uint128};
use cw_utils::NativeBalance;

/// Quantity of `denom` held in `coins`, zero if the denomination is absent.
pub fn amount_of(coins: &[Coin], denom: &str) -> Uint128 {
    coins
        .iter()
        .filter(|c| c.denom == denom)
        .fold(Uint128::zero(), |acc, c| acc + c.amount)
}

/// Returns true when `bid` holds at least as much as `price` in every
/// denomination of `price`. An exact match covers the price.
pub fn covers(bid: &[Coin], price: &[Coin]) -> bool {
    price
        .iter()
        .all(|required| amount_of(bid, &required.denom) >= required.amount)
}

/// Non-empty and every coin strictly positive.
pub fn is_all_positive(coins: &[Coin]) -> bool {
    !coins.is_empty() && coins.iter().all(|c| !c.amount.is_zero())
}

/// Returns true when a denomination appears more than once.
pub fn has_repeated_denoms(coins: &[Coin]) -> bool {
    let mut merged = NativeBalance(coins.to_vec());
    merged.normalize();
    merged.0.len() != coins.iter().filter(|c| !c.amount.is_zero()).count()
}

pub fn coins_to_string(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
