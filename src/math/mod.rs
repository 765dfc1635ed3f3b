// src/math/mod.rs

// Le coeur arithmétique du moteur : tout est entier, toute division tronque
// vers zéro, et les produits intermédiaires passent par U256. Aucun flottant
// n'alimente jamais une borne de transaction.
pub mod curve_math;
pub mod fixed_point;
pub mod swap_math;

#[cfg(test)]
mod proptest_properties;

pub use fixed_point::{BPS_DENOMINATOR, PRICE_PRECISION, U256};
