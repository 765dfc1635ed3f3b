// src/protections.rs

use crate::error::QuoteError;
use crate::math::fixed_point::{self, BPS_DENOMINATOR};

/// Les deux bornes protégées d'un échange.
///
/// ATTENTION : elles n'arrondissent pas dans le même sens. Plancher pour le
/// minimum de sortie, plafond pour le maximum d'entrée. Inverser l'un des
/// deux fait soit perdre de l'argent à l'utilisateur, soit échouer des
/// transactions légitimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapProtections {
    pub min_amount_out: u128,
    pub max_amount_in: u128,
}

/// Borne basse de sortie : amount_out · (10000 − tolérance) / 10000, plancher.
///
/// Une tolérance >= 10000 borne simplement à zéro : le moteur fait de
/// l'arithmétique, pas de la politique de tolérance.
pub fn min_amount_out(amount_out: u128, tolerance_bps: u64) -> Result<u128, QuoteError> {
    let multiplier = BPS_DENOMINATOR.saturating_sub(tolerance_bps as u128);
    fixed_point::mul_div_floor(amount_out, multiplier, BPS_DENOMINATOR)
}

/// Borne haute d'entrée : amount_in · (10000 + tolérance) / 10000, PLAFOND.
///
/// Sous-coter cette borne ferait échouer on-chain une transaction légitime au
/// moindre mouvement de prix.
pub fn max_amount_in(amount_in: u128, tolerance_bps: u64) -> Result<u128, QuoteError> {
    let multiplier = BPS_DENOMINATOR
        .checked_add(tolerance_bps as u128)
        .ok_or(QuoteError::Overflow)?;
    fixed_point::mul_div_ceil(amount_in, multiplier, BPS_DENOMINATOR)
}

/// Ancre une valeur sur un multiple de `unit_scale`, en deux étapes explicites :
/// plancher d'abord, puis relèvement à une unité entière si le plancher a fait
/// tomber une valeur positive à zéro (un ordre à sortie nulle serait rejeté
/// par le contrat.
///
/// Calcule les deux bornes d'un même échange coté : le minimum de sortie et le
/// maximum d'entrée, chacun avec son sens d'arrondi.
pub fn calculate_swap_protections(
    quoted_amount_in: u128,
    quoted_amount_out: u128,
    tolerance_bps: u64,
) -> Result<SwapProtections, QuoteError> {
    Ok(SwapProtections {
        min_amount_out: min_amount_out(quoted_amount_out, tolerance_bps)?,
        max_amount_in: max_amount_in(quoted_amount_in, tolerance_bps)?,
    })
}

/// `unit_scale <= 1` signifie « pas de granularité imposée » : identité.
pub fn quantize_down(value: u128, unit_scale: u128) -> u128 {
    if unit_scale <= 1 {
        return value;
    }
    let floored = (value / unit_scale) * unit_scale;
    if value > 0 && floored == 0 {
        unit_scale
    } else {
        floored
    }
}
