// src/quoting/swap/test.rs

use crate::error::QuoteError;
use crate::quoting::{MarketAddress, QuoteOperations, Side};

use super::SwapMarket;

const E18: u128 = 1_000_000_000_000_000_000;

// Le pool de référence : 10 ETH de quote contre 1 000 000 TOKEN de base, 30 bps.
fn reference_pool() -> SwapMarket {
    SwapMarket {
        address: MarketAddress::default(),
        reserve_base: 1_000_000 * E18,
        reserve_quote: 10 * E18,
        fee_bps: 30,
    }
}

#[test]
fn test_buy_orients_quote_in_base_out() {
    let pool = reference_pool();
    let tokens_out = pool.get_quote(Side::Buy, E18).unwrap();
    assert_eq!(tokens_out, 90_661_089_388_014_913_158_134);
}

#[test]
fn test_sell_orients_base_in_quote_out() {
    let pool = reference_pool();
    let wei_out = pool.get_quote(Side::Sell, 1_000 * E18).unwrap();
    assert_eq!(wei_out, 9_960_069_810_399_032);
}

#[test]
fn test_required_input_matches_swap_math() {
    let pool = reference_pool();
    let required = pool.get_required_input(Side::Buy, 50_000 * E18).unwrap();
    assert_eq!(required, 527_899_487_937_496_701);
}

#[test]
fn test_spot_price_is_quote_per_base() {
    let pool = reference_pool();
    // 10 ETH / 1 000 000 TOKEN = 1e-5 ETH par token, à l'échelle 1e18.
    assert_eq!(pool.spot_price().unwrap(), 10_000_000_000_000);
}

#[test]
fn test_empty_pool_has_no_price() {
    let mut pool = reference_pool();
    pool.reserve_base = 0;
    assert_eq!(pool.spot_price(), Err(QuoteError::InsufficientLiquidity));
    assert_eq!(
        pool.get_quote(Side::Buy, E18),
        Err(QuoteError::InsufficientLiquidity)
    );
}

#[test]
fn test_price_impact_reference_value() {
    let pool = reference_pool();
    assert_eq!(pool.price_impact_bps(Side::Buy, E18).unwrap(), 2096);
}

#[test]
fn test_price_impact_of_nothing_is_nothing() {
    let pool = reference_pool();
    assert_eq!(pool.price_impact_bps(Side::Buy, 0).unwrap(), 0);
}

#[test]
fn test_price_impact_does_not_mutate_reserves() {
    let pool = reference_pool();
    let before = (pool.reserve_base, pool.reserve_quote);
    pool.price_impact_bps(Side::Sell, 123 * E18).unwrap();
    assert_eq!((pool.reserve_base, pool.reserve_quote), before);
}
