// src/math/swap_math.rs

use crate::error::QuoteError;
use crate::math::fixed_point::{self, BPS_DENOMINATOR, U256};

/// Calcule le montant de sortie pour un montant d'entrée exact (produit constant).
///
/// Les frais sont prélevés sur l'ENTRÉE, avant la formule x*y=k. Cet ordre est
/// celui du contrat on-chain : l'inverser produit un prix plausible mais faux.
pub fn get_amount_out(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u64,
) -> Result<u128, QuoteError> {
    if fee_bps as u128 >= BPS_DENOMINATOR {
        return Err(QuoteError::InvalidFee(fee_bps));
    }
    if amount_in == 0 {
        return Err(QuoteError::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(QuoteError::InsufficientLiquidity);
    }

    // --- 1. Frais sur l'entrée (plancher) ---
    let effective_in =
        fixed_point::mul_div_floor(amount_in, BPS_DENOMINATOR - fee_bps as u128, BPS_DENOMINATOR)?;

    // --- 2. Formule x*y=k sur le montant NET ---
    let numerator = U256::from(effective_in) * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) + U256::from(effective_in);
    fixed_point::try_to_u128(numerator / denominator)
}

/// Calcule le montant d'entrée requis pour un montant de sortie exact.
///
/// Le `+ 1` final est obligatoire : la division tronque, et sous-coter l'entrée
/// d'une seule unité ferait échouer la transaction on-chain pour entrée
/// insuffisante.
pub fn get_amount_in(
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u64,
) -> Result<u128, QuoteError> {
    if fee_bps as u128 >= BPS_DENOMINATOR {
        return Err(QuoteError::InvalidFee(fee_bps));
    }
    if amount_out == 0 {
        return Err(QuoteError::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(QuoteError::InsufficientLiquidity);
    }
    // Le pool ne peut pas fournir autant : erreur logique, pas un cas d'arrondi.
    if amount_out >= reserve_out {
        return Err(QuoteError::InsufficientLiquidity);
    }

    let numerator = U256::from(reserve_in)
        .checked_mul(U256::from(amount_out))
        .and_then(|v| v.checked_mul(U256::from(BPS_DENOMINATOR)))
        .ok_or(QuoteError::Overflow)?;
    let denominator =
        U256::from(reserve_out - amount_out) * U256::from(BPS_DENOMINATOR - fee_bps as u128);

    let quotient = fixed_point::try_to_u128(numerator / denominator)?;
    quotient.checked_add(1).ok_or(QuoteError::Overflow)
}

/// Estime l'impact prix d'un échange hypothétique, en points de base.
///
/// Simulation en lecture seule : on dérive des réserves post-échange sans
/// jamais toucher l'état de l'appelant.
///
///   p  = reserve_in / reserve_out
///   p' = (reserve_in + amount_in) / (reserve_out - amount_out)
///   impact = |p' - p| / p * 10000
///          = |(rIn+in)·rOut - rIn·(rOut-out)| * 10000 / (rIn·(rOut-out))
pub fn price_impact_bps(
    amount_in: u128,
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
) -> Result<u64, QuoteError> {
    if amount_in == 0 || amount_out == 0 || reserve_in == 0 || reserve_out == 0 {
        // Dégénère en « aucun impact », pas en erreur.
        return Ok(0);
    }
    if amount_out >= reserve_out {
        return Err(QuoteError::InsufficientLiquidity);
    }

    let post_reserve_in = U256::from(reserve_in) + U256::from(amount_in);
    let post_reserve_out = U256::from(reserve_out) - U256::from(amount_out);

    let projected = post_reserve_in
        .checked_mul(U256::from(reserve_out))
        .ok_or(QuoteError::Overflow)?;
    let current = U256::from(reserve_in)
        .checked_mul(post_reserve_out)
        .ok_or(QuoteError::Overflow)?;

    let delta = if projected >= current {
        projected - current
    } else {
        current - projected
    };
    let numerator = delta
        .checked_mul(U256::from(BPS_DENOMINATOR))
        .ok_or(QuoteError::Overflow)?;

    let impact = fixed_point::try_to_u128(numerator / current)?;
    Ok(u64::try_from(impact).unwrap_or(u64::MAX))
}
