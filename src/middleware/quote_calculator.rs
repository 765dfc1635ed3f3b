// src/middleware/quote_calculator.rs

use anyhow::Result;
use tracing::{instrument, warn};

use super::{Middleware, QuoteContext, QuoteKind};
use crate::quoting::QuoteOperations;

/// Première étape : le montant contrepartie brut, sans aucune protection.
pub struct QuoteCalculator;

impl Middleware for QuoteCalculator {
    fn name(&self) -> &'static str {
        "QuoteCalculator"
    }

    #[instrument(name = "quote_calculator_process", skip_all, fields(amount = context.amount))]
    fn process(&self, context: &mut QuoteContext<'_>) -> Result<bool> {
        let raw = match context.kind {
            QuoteKind::ExactIn => context.market.get_quote(context.side, context.amount),
            QuoteKind::ExactOut => context.market.get_required_input(context.side, context.amount),
        };

        let counter_amount = match raw {
            Ok(amount) => amount,
            Err(e) => {
                warn!(error = %e, "Échec du calcul de la cotation brute.");
                return Err(e.into());
            }
        };

        context.counter_amount = Some(counter_amount);
        Ok(true)
    }
}
