// src/middleware/quantizer.rs

use anyhow::{Context as _, Result};

use super::{Middleware, QuoteContext, QuoteKind};
use crate::protections;

/// Troisième étape : ancrage de la borne de sortie sur la granularité imposée
/// par le contrat.
///
/// Ne s'applique qu'en exact-in : en exact-out, la sortie est fixée par
/// l'utilisateur et la quantifier changerait silencieusement sa demande.
pub struct Quantizer;

impl Middleware for Quantizer {
    fn name(&self) -> &'static str {
        "Quantizer"
    }

    fn process(&self, context: &mut QuoteContext<'_>) -> Result<bool> {
        let Some(unit) = context.quantization_unit else {
            return Ok(true);
        };
        if context.kind != QuoteKind::ExactIn {
            return Ok(true);
        }

        let bounded = context
            .bounded_amount
            .context("ProtectionCalculator must run before Quantizer")?;
        context.bounded_amount = Some(protections::quantize_down(bounded, unit));
        Ok(true)
    }
}
