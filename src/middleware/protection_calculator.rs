// src/middleware/protection_calculator.rs

use anyhow::{Context as _, Result};
use tracing::{instrument, warn};

use super::{Middleware, QuoteContext, QuoteKind};
use crate::protections;

/// Deuxième étape : la borne protégée contre le slippage.
///
/// ExactIn -> minimum de sortie (plancher) ; ExactOut -> maximum d'entrée
/// (plafond). Les deux sens n'arrondissent pas pareil, et c'est voulu.
pub struct ProtectionCalculator;

impl Middleware for ProtectionCalculator {
    fn name(&self) -> &'static str {
        "ProtectionCalculator"
    }

    #[instrument(name = "protection_calculator_process", skip_all, fields(tolerance_bps = context.slippage_tolerance_bps))]
    fn process(&self, context: &mut QuoteContext<'_>) -> Result<bool> {
        let counter_amount = context
            .counter_amount
            .context("QuoteCalculator must run before ProtectionCalculator")?;

        let bounded = match context.kind {
            QuoteKind::ExactIn => {
                protections::min_amount_out(counter_amount, context.slippage_tolerance_bps)
            }
            QuoteKind::ExactOut => {
                protections::max_amount_in(counter_amount, context.slippage_tolerance_bps)
            }
        };

        let bounded = match bounded {
            Ok(amount) => amount,
            Err(e) => {
                warn!(error = %e, "Échec du calcul des protections. Cotation abandonnée.");
                return Err(e.into());
            }
        };

        context.bounded_amount = Some(bounded);
        Ok(true)
    }
}
