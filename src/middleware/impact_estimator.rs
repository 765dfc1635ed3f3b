// src/middleware/impact_estimator.rs

use anyhow::{Context as _, Result};
use tracing::{instrument, warn};

use super::{Middleware, QuoteContext, QuoteKind};
use crate::quoting::Market;

/// Dernière étape : l'impact prix projeté, purement informatif.
///
/// Les ventes à courbe n'ont pas de réserves à simuler : on publie la cotation
/// sans impact plutôt que d'échouer.
pub struct ImpactEstimator;

impl Middleware for ImpactEstimator {
    fn name(&self) -> &'static str {
        "ImpactEstimator"
    }

    #[instrument(name = "impact_estimator_process", skip_all)]
    fn process(&self, context: &mut QuoteContext<'_>) -> Result<bool> {
        let Market::SwapPool(pool) = context.market else {
            return Ok(true);
        };

        let amount_in = match context.kind {
            QuoteKind::ExactIn => context.amount,
            QuoteKind::ExactOut => context
                .counter_amount
                .context("QuoteCalculator must run before ImpactEstimator")?,
        };

        match pool.price_impact_bps(context.side, amount_in) {
            Ok(impact) => context.price_impact_bps = Some(impact),
            Err(e) => {
                // L'impact est un confort d'affichage, pas une borne : on ne
                // bloque pas la cotation pour lui.
                warn!(error = %e, "Impact prix indisponible, cotation publiée sans lui.");
            }
        }
        Ok(true)
    }
}
