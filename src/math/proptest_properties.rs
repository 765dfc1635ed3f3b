// src/math/proptest_properties.rs

// Propriétés arithmétiques vérifiées par génération aléatoire : l'asymétrie
// plancher/plafond doit favoriser le protocole, jamais l'utilisateur.

use proptest::prelude::*;

use crate::math::swap_math;
use crate::protections;

const E24: u128 = 1_000_000_000_000_000_000_000_000;

proptest! {
    /// Coter exact-out sur le résultat d'un exact-in ne demande jamais moins
    /// que l'entrée d'origine : pas d'aller-retour perdant pour le protocole.
    #[test]
    fn round_trip_never_requires_less_input(
        amount_in in 1u128..E24,
        reserve_in in 1u128..E24,
        reserve_out in 1u128..E24,
        fee_bps in 0u64..10_000,
    ) {
        let amount_out = swap_math::get_amount_out(amount_in, reserve_in, reserve_out, fee_bps)
            .expect("valid inputs must quote");
        prop_assume!(amount_out > 0);
        let back = swap_math::get_amount_in(amount_out, reserve_in, reserve_out, fee_bps)
            .expect("amount_out < reserve_out by construction");
        prop_assert!(back >= amount_in);
    }

    /// La sortie cotée reste toujours strictement sous la réserve de sortie.
    #[test]
    fn output_never_drains_the_pool(
        amount_in in 1u128..E24,
        reserve_in in 1u128..E24,
        reserve_out in 1u128..E24,
        fee_bps in 0u64..10_000,
    ) {
        let amount_out = swap_math::get_amount_out(amount_in, reserve_in, reserve_out, fee_bps)
            .expect("valid inputs must quote");
        prop_assert!(amount_out < reserve_out);
    }

    /// Tolérance nulle = identité, et les deux bornes sont monotones en la
    /// tolérance (décroissante pour min-out, croissante pour max-in).
    #[test]
    fn slippage_bounds_are_monotone(
        amount in 1u128..E24,
        tolerance in 0u64..10_000,
    ) {
        prop_assert_eq!(protections::min_amount_out(amount, 0).unwrap(), amount);
        prop_assert_eq!(protections::max_amount_in(amount, 0).unwrap(), amount);

        let min_out = protections::min_amount_out(amount, tolerance).unwrap();
        let max_in = protections::max_amount_in(amount, tolerance).unwrap();
        prop_assert!(min_out <= amount);
        prop_assert!(max_in >= amount);

        let looser_min = protections::min_amount_out(amount, tolerance + 1).unwrap();
        let looser_max = protections::max_amount_in(amount, tolerance + 1).unwrap();
        prop_assert!(looser_min <= min_out);
        prop_assert!(looser_max >= max_in);
    }

    /// La quantification produit un multiple de l'unité, ne dépasse jamais la
    /// valeur, et relève toute valeur positive sous l'unité à exactement une
    /// unité.
    #[test]
    fn quantization_laws(
        value in 0u128..E24,
        unit in 2u128..1_000_000_000_000_000_000u128,
    ) {
        let snapped = protections::quantize_down(value, unit);
        prop_assert_eq!(snapped % unit, 0);
        if value >= unit {
            prop_assert!(snapped <= value);
        }
        if value > 0 && value < unit {
            prop_assert_eq!(snapped, unit);
        }
    }
}
