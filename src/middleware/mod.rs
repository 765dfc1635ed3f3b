// src/middleware/mod.rs

// La chaîne de cotation : chaque maillon remplit sa partie du contexte et
// laisse le reste intact. C'est le flux complet d'une saisie utilisateur :
// cotation brute -> borne de slippage -> quantification -> impact prix.
pub mod impact_estimator;
pub mod protection_calculator;
pub mod quantizer;
pub mod quote_calculator;

use anyhow::{Context as _, Result, bail};

use crate::config::Config;
use crate::quoting::{Market, Quote, Side};

/// Sens de la cotation : l'utilisateur fixe soit l'entrée, soit la sortie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    ExactIn,
    ExactOut,
}

/// Contexte mutable traversant la chaîne de middlewares.
pub struct QuoteContext<'a> {
    pub market: &'a Market,
    pub side: Side,
    pub kind: QuoteKind,
    /// Montant saisi : entrée pour ExactIn, sortie désirée pour ExactOut.
    pub amount: u128,
    pub slippage_tolerance_bps: u64,
    /// Granularité de sortie imposée par le contrat, si le marché en a une.
    pub quantization_unit: Option<u128>,

    // --- Champs remplis par les middlewares ---
    pub counter_amount: Option<u128>,
    pub bounded_amount: Option<u128>,
    pub price_impact_bps: Option<u64>,
}

impl<'a> QuoteContext<'a> {
    pub fn exact_in(
        market: &'a Market,
        side: Side,
        amount_in: u128,
        slippage_tolerance_bps: u64,
    ) -> Self {
        QuoteContext {
            market,
            side,
            kind: QuoteKind::ExactIn,
            amount: amount_in,
            slippage_tolerance_bps,
            quantization_unit: None,
            counter_amount: None,
            bounded_amount: None,
            price_impact_bps: None,
        }
    }

    pub fn exact_out(
        market: &'a Market,
        side: Side,
        amount_out: u128,
        slippage_tolerance_bps: u64,
    ) -> Self {
        QuoteContext {
            kind: QuoteKind::ExactOut,
            ..QuoteContext::exact_in(market, side, amount_out, slippage_tolerance_bps)
        }
    }

    pub fn with_quantization_unit(mut self, unit: Option<u128>) -> Self {
        self.quantization_unit = unit;
        self
    }

    /// Assemble la cotation finale une fois la chaîne déroulée.
    fn into_quote(self) -> Result<Quote> {
        let counter = self
            .counter_amount
            .context("incomplete quote: missing counter amount")?;
        let bounded = self
            .bounded_amount
            .context("incomplete quote: missing protected bound")?;
        let (amount_in, amount_out) = match self.kind {
            QuoteKind::ExactIn => (self.amount, counter),
            QuoteKind::ExactOut => (counter, self.amount),
        };
        Ok(Quote {
            amount_in,
            amount_out,
            bounded_amount: bounded,
            price_impact_bps: self.price_impact_bps,
        })
    }
}

/// Un maillon de la chaîne. Retourner `false` interrompt proprement la chaîne
/// sans produire de cotation.
pub trait Middleware {
    fn name(&self) -> &'static str;
    fn process(&self, context: &mut QuoteContext<'_>) -> Result<bool>;
}

/// La chaîne standard, dans l'ordre du flux de contrôle du moteur.
pub fn standard_pipeline() -> Vec<Box<dyn Middleware>> {
    vec![
        Box::new(quote_calculator::QuoteCalculator),
        Box::new(protection_calculator::ProtectionCalculator),
        Box::new(quantizer::Quantizer),
        Box::new(impact_estimator::ImpactEstimator),
    ]
}

/// Déroule la chaîne standard sur le contexte et assemble la cotation.
pub fn run_pipeline(mut context: QuoteContext<'_>) -> Result<Quote> {
    for middleware in standard_pipeline() {
        let span = tracing::info_span!("middleware", stage = middleware.name());
        let _guard = span.enter();
        if !middleware.process(&mut context)? {
            bail!("quote pipeline interrupted by {}", middleware.name());
        }
    }
    context.into_quote()
}

/// Point d'entrée usuel : cotation exact-in avec les défauts configurés.
pub fn quote_exact_in(
    market: &Market,
    side: Side,
    amount_in: u128,
    config: &Config,
) -> Result<Quote> {
    let context = QuoteContext::exact_in(market, side, amount_in, config.slippage_tolerance_bps)
        .with_quantization_unit(config.quantization_unit.map(u128::from));
    run_pipeline(context)
}

/// Point d'entrée exact-out : la borne produite est un maximum d'entrée.
pub fn quote_exact_out(
    market: &Market,
    side: Side,
    amount_out: u128,
    config: &Config,
) -> Result<Quote> {
    let context = QuoteContext::exact_out(market, side, amount_out, config.slippage_tolerance_bps)
        .with_quantization_unit(config.quantization_unit.map(u128::from));
    run_pipeline(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoting::swap::SwapMarket;
    use crate::quoting::{MarketAddress, Side};

    const E18: u128 = 1_000_000_000_000_000_000;

    fn reference_market() -> Market {
        Market::SwapPool(SwapMarket {
            address: MarketAddress::default(),
            reserve_base: 1_000_000 * E18,
            reserve_quote: 10 * E18,
            fee_bps: 30,
        })
    }

    #[test]
    fn test_exact_in_pipeline_end_to_end() {
        let market = reference_market();
        let quote = quote_exact_in(&market, Side::Buy, E18, &Config::default()).unwrap();

        assert_eq!(quote.amount_in, E18);
        assert_eq!(quote.amount_out, 90_661_089_388_014_913_158_134);
        // Borne : min-out à 300 bps, plancher.
        assert_eq!(quote.bounded_amount, 87_941_256_706_374_465_763_389);
        assert_eq!(quote.price_impact_bps, Some(2096));
    }

    #[test]
    fn test_exact_out_pipeline_bounds_the_input_upward() {
        let market = reference_market();
        let quote =
            quote_exact_out(&market, Side::Buy, 50_000 * E18, &Config::default()).unwrap();

        assert_eq!(quote.amount_out, 50_000 * E18);
        assert_eq!(quote.amount_in, 527_899_487_937_496_701);
        // Borne : max-in à 300 bps, PLAFOND.
        assert_eq!(quote.bounded_amount, 543_736_472_575_621_603);
    }

    #[test]
    fn test_quantization_snaps_the_bound() {
        let market = reference_market();
        let config = Config {
            quantization_unit: Some(1_000_000_000),
            ..Config::default()
        };
        let quote = quote_exact_in(&market, Side::Buy, E18, &config).unwrap();
        assert_eq!(quote.bounded_amount % 1_000_000_000, 0);
        assert!(quote.bounded_amount <= 87_941_256_706_374_465_763_389);
    }

    #[test]
    fn test_typed_errors_surface_through_the_pipeline() {
        let market = Market::SwapPool(SwapMarket {
            address: MarketAddress::default(),
            reserve_base: 0,
            reserve_quote: 0,
            fee_bps: 30,
        });
        let error = quote_exact_in(&market, Side::Buy, E18, &Config::default()).unwrap_err();
        assert!(
            error
                .downcast_ref::<crate::error::QuoteError>()
                .is_some_and(|e| *e == crate::error::QuoteError::InsufficientLiquidity)
        );
    }
}
