// src/math/fixed_point.rs

use crate::error::QuoteError;
use uint::construct_uint;

construct_uint! {
    /// Entier non signé de 256 bits pour les produits intermédiaires.
    pub struct U256(4);
}

/// Dénominateur des points de base : 10000 = 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Échelle de prix : 1e18, la convention « plus petite unité » à 18 décimales.
pub const PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Reconvertit un U256 vers u128 en signalant le dépassement au lieu de paniquer.
pub fn try_to_u128(value: U256) -> Result<u128, QuoteError> {
    if value.bits() > 128 {
        return Err(QuoteError::Overflow);
    }
    Ok(value.as_u128())
}

/// floor(a * b / denominator), produit calculé sur 256 bits.
/// La multiplication se fait TOUJOURS avant la division : une seule troncature,
/// en dernier, comme le contrat.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128, QuoteError> {
    if denominator == 0 {
        // Un dénominateur nul ne peut venir que d'entrées déjà invalides.
        return Err(QuoteError::Overflow);
    }
    let product = U256::from(a) * U256::from(b);
    try_to_u128(product / U256::from(denominator))
}

/// ceil(a * b / denominator) : l'arrondi vers le haut des bornes max-in.
pub fn mul_div_ceil(a: u128, b: u128, denominator: u128) -> Result<u128, QuoteError> {
    if denominator == 0 {
        return Err(QuoteError::Overflow);
    }
    let product = U256::from(a) * U256::from(b);
    let (quotient, remainder) = product.div_mod(U256::from(denominator));
    let rounded = if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::from(1u8)
    };
    try_to_u128(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_floor_truncates() {
        // 7 * 3 / 2 = 10.5 -> 10
        assert_eq!(mul_div_floor(7, 3, 2).unwrap(), 10);
        assert_eq!(mul_div_floor(0, u128::MAX, 5).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_ceil_rounds_up() {
        assert_eq!(mul_div_ceil(7, 3, 2).unwrap(), 11);
        // Division exacte : pas de +1
        assert_eq!(mul_div_ceil(8, 3, 2).unwrap(), 12);
    }

    #[test]
    fn test_full_width_intermediate_product() {
        // u128::MAX * u128::MAX tient sur 256 bits ; le quotient retombe sur 128.
        assert_eq!(
            mul_div_floor(u128::MAX, u128::MAX, u128::MAX).unwrap(),
            u128::MAX
        );
    }

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        assert_eq!(
            mul_div_floor(u128::MAX, u128::MAX, 1),
            Err(QuoteError::Overflow)
        );
        assert_eq!(mul_div_floor(1, 1, 0), Err(QuoteError::Overflow));
    }
}
