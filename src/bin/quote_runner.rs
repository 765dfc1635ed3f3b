// src/bin/quote_runner.rs

use anyhow::Result;
use quoter::{
    config::Config,
    middleware,
    monitoring::logging,
    quoting::{
        Market, MarketAddress, QuoteOperations, Side, curve::CurveSale, swap::SwapMarket,
    },
};

const E18: u128 = 1_000_000_000_000_000_000;

// --- BANC D'ESSAI ---

fn test_swap_pool(config: &Config) -> Result<()> {
    println!("\n--- Test Pool de Swap (10 ETH / 1 000 000 TOKEN) ---");
    let pool = SwapMarket {
        address: MarketAddress::default(),
        reserve_base: 1_000_000 * E18,
        reserve_quote: 10 * E18,
        fee_bps: 30,
    };
    println!("-> Frais: {:.4}%.", pool.fee_as_percent());
    let market = Market::SwapPool(pool);

    println!("[1/2] Cotation exact-in pour 1 ETH...");
    let quote = middleware::quote_exact_in(&market, Side::Buy, E18, config)?;
    println!(
        "     -> Sortie attendue   : {} unités",
        quote.amount_out
    );
    println!(
        "     -> Minimum protégé   : {} unités ({} bps de tolérance)",
        quote.bounded_amount, config.slippage_tolerance_bps
    );
    println!(
        "     -> Impact prix       : {} bps",
        quote.price_impact_bps.unwrap_or(0)
    );

    println!("[2/2] Cotation exact-out pour 50 000 TOKEN...");
    let quote = middleware::quote_exact_out(&market, Side::Buy, 50_000 * E18, config)?;
    println!("     -> Entrée requise    : {} wei", quote.amount_in);
    println!("     -> Maximum protégé   : {} wei", quote.bounded_amount);
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn test_curve_sale(config: &Config) -> Result<()> {
    println!("\n--- Test Vente à Courbe (cap 1G ticks, objectif 10 ETH) ---");
    let sale = CurveSale {
        address: MarketAddress::default(),
        net_sold: 500_000 * E18,
        sale_cap: 1_000_000_000 * E18,
        quad_cap: 800_000_000 * E18,
        divisor: 5_000_000_000_000_000_000_000_000,
        eth_escrow: 2 * E18,
        eth_target: 10 * E18,
    };
    println!(
        "-> Levée: {} bps de l'objectif. Prix marginal: {} wei/tick.",
        sale.progress_bps(),
        sale.spot_price()?
    );
    let market = Market::CurveSale(sale);

    println!("[1/1] Achat rapide pour 1 ETH (tolérance {} bps)...", config.quick_buy_slippage_bps);
    let context = middleware::QuoteContext::exact_in(
        &market,
        Side::Buy,
        E18,
        config.quick_buy_slippage_bps,
    );
    let quote = middleware::run_pipeline(context)?;
    println!("     -> Tokens attendus   : {} unités", quote.amount_out);
    println!("     -> Minimum protégé   : {} unités", quote.bounded_amount);
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn main() -> Result<()> {
    logging::setup_logging();
    let config = Config::load()?;

    test_swap_pool(&config)?;
    test_curve_sale(&config)?;

    println!("\n✅ Toutes les cotations de démonstration ont réussi.");
    Ok(())
}
