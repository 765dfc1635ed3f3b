// src/math/curve_math.rs

use crate::error::QuoteError;
use crate::math::fixed_point::{self, PRICE_PRECISION, U256};

/// Granularité d'un tick : 1e18 plus petites unités, soit un token entier.
/// La courbe n'est définie QUE sur des ticks ; tout montant brut est d'abord
/// divisé (troncature) par cette échelle.
pub const UNIT_SCALE: u128 = 1_000_000_000_000_000_000;

/// Convertit un montant brut en ticks entiers (division tronquée).
pub fn ticks(amount: u128) -> u128 {
    amount / UNIT_SCALE
}

/// Coût cumulé, en wei, des `m` premiers ticks de la courbe.
///
/// Phase quadratique jusqu'à `quad_cap_ticks` (inclus), puis linéaire au prix
/// gelé p(K). Les deux premiers ticks sont gratuits : c'est la règle
/// « starter » du contrat, à reproduire telle quelle, pas à optimiser.
pub fn cumulative_cost(
    m: u128,
    quad_cap_ticks: u128,
    divisor: u128,
) -> Result<u128, QuoteError> {
    if divisor == 0 {
        return Err(QuoteError::InvalidCurveParameters("divisor is zero"));
    }
    if m < 2 {
        return Ok(0);
    }
    if m <= quad_cap_ticks {
        return quadratic_cost(m, divisor);
    }

    // --- Phase linéaire : coût quadratique gelé à K, puis p(K) par tick ---
    let base = quadratic_cost(quad_cap_ticks, divisor)?;
    let pinned = marginal_price(quad_cap_ticks, quad_cap_ticks, divisor)?;
    let extra = U256::from(pinned)
        .checked_mul(U256::from(m - quad_cap_ticks))
        .ok_or(QuoteError::Overflow)?;
    let total = U256::from(base).checked_add(extra).ok_or(QuoteError::Overflow)?;
    fixed_point::try_to_u128(total)
}

/// Prix marginal au tick `m`, en wei par tick : m²·1e18/(6·divisor) en phase
/// quadratique, gelé à p(K) une fois la transition passée.
///
/// C'est la dérivée du coût, PAS cost(m)/m : les affichages « prix actuel »
/// passent par ici, les affichages « total levé » par `cumulative_cost`.
pub fn marginal_price(
    m: u128,
    quad_cap_ticks: u128,
    divisor: u128,
) -> Result<u128, QuoteError> {
    if divisor == 0 {
        return Err(QuoteError::InvalidCurveParameters("divisor is zero"));
    }
    let effective = U256::from(m.min(quad_cap_ticks));
    let numerator = effective
        .checked_mul(effective)
        .and_then(|v| v.checked_mul(U256::from(PRICE_PRECISION)))
        .ok_or(QuoteError::Overflow)?;
    let denominator = U256::from(6u8)
        .checked_mul(U256::from(divisor))
        .ok_or(QuoteError::Overflow)?;
    fixed_point::try_to_u128(numerator / denominator)
}

/// Somme des carrés Σk², k=1..m-1, via l'identité m·(m-1)·(2m-1)/6, mise à
/// l'échelle 1e18 puis divisée par 6·divisor.
///
/// L'ordre des opérations est contractuel : les trois facteurs sont multipliés
/// AVANT la division par 6 (le produit est toujours divisible par 6, la
/// division est donc exacte), et l'échelle est appliquée avant la division
/// finale. Une seule troncature, en dernier.
fn quadratic_cost(m: u128, divisor: u128) -> Result<u128, QuoteError> {
    let m = U256::from(m);
    let one = U256::from(1u8);

    let product = m
        .checked_mul(m - one)
        .and_then(|v| v.checked_mul(U256::from(2u8) * m - one))
        .ok_or(QuoteError::Overflow)?;
    let sum_of_squares = product / U256::from(6u8);

    let numerator = sum_of_squares
        .checked_mul(U256::from(PRICE_PRECISION))
        .ok_or(QuoteError::Overflow)?;
    let denominator = U256::from(6u8)
        .checked_mul(U256::from(divisor))
        .ok_or(QuoteError::Overflow)?;
    fixed_point::try_to_u128(numerator / denominator)
}

/// Plus grand nombre de ticks achetables avec `budget` wei en partant de
/// `net_sold_ticks`, borné par `sale_cap_ticks`.
///
/// Inversion exacte par dichotomie sur `cumulative_cost` : pas de racine de
/// cubique en forme fermée, donc pas d'approximation à réconcilier avec le
/// contrat.
pub fn ticks_affordable(
    net_sold_ticks: u128,
    sale_cap_ticks: u128,
    quad_cap_ticks: u128,
    divisor: u128,
    budget: u128,
) -> Result<u128, QuoteError> {
    let base = cumulative_cost(net_sold_ticks, quad_cap_ticks, divisor)?;

    let mut lo: u128 = 0;
    let mut hi = sale_cap_ticks.saturating_sub(net_sold_ticks);
    while lo < hi {
        // Biais haut : mid ∈ (lo, hi], la boucle progresse toujours.
        let mid = lo + (hi - lo).div_ceil(2);
        let cost = cumulative_cost(net_sold_ticks + mid, quad_cap_ticks, divisor)?;
        if cost.saturating_sub(base) <= budget {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(lo)
}
