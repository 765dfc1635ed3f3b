// src/quoting/swap/pool.rs

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::math::fixed_point::{self, PRICE_PRECISION};
use crate::math::swap_math;
use crate::quoting::{MarketAddress, QuoteOperations, Side};

/// État d'un pool à produit constant, réserves en plus petite unité.
///
/// Un pool dont une réserve est nulle n'a pas de prix défini : il est rejeté
/// (`InsufficientLiquidity`), jamais coté à zéro par défaut. L'état est fourni
/// par un lecteur externe et n'est jamais modifié ici.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapMarket {
    pub address: MarketAddress,
    pub reserve_base: u128,
    pub reserve_quote: u128,
    pub fee_bps: u64,
}

impl SwapMarket {
    /// Retourne les frais de pool sous forme de pourcentage lisible.
    pub fn fee_as_percent(&self) -> f64 {
        (self.fee_bps as f64 / 10_000.0) * 100.0
    }

    /// Oriente les réserves selon le sens : (réserve d'entrée, réserve de sortie).
    fn oriented_reserves(&self, side: Side) -> (u128, u128) {
        match side {
            Side::Buy => (self.reserve_quote, self.reserve_base),
            Side::Sell => (self.reserve_base, self.reserve_quote),
        }
    }

    /// Impact prix projeté d'un échange exact-in, en points de base.
    /// Simulation en lecture seule sur des réserves hypothétiques ; un montant
    /// nul dégénère en « aucun impact ».
    pub fn price_impact_bps(&self, side: Side, amount_in: u128) -> Result<u64, QuoteError> {
        if amount_in == 0 {
            return Ok(0);
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(side);
        let amount_out = swap_math::get_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)?;
        swap_math::price_impact_bps(amount_in, amount_out, reserve_in, reserve_out)
    }
}

impl QuoteOperations for SwapMarket {
    fn address(&self) -> MarketAddress {
        self.address
    }

    fn get_quote(&self, side: Side, amount_in: u128) -> Result<u128, QuoteError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side);
        swap_math::get_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)
    }

    fn get_required_input(&self, side: Side, amount_out: u128) -> Result<u128, QuoteError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side);
        swap_math::get_amount_in(amount_out, reserve_in, reserve_out, self.fee_bps)
    }

    fn spot_price(&self) -> Result<u128, QuoteError> {
        if self.reserve_base == 0 || self.reserve_quote == 0 {
            return Err(QuoteError::InsufficientLiquidity);
        }
        fixed_point::mul_div_floor(self.reserve_quote, PRICE_PRECISION, self.reserve_base)
    }
}
