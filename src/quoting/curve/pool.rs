// src/quoting/curve/pool.rs

use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::math::curve_math::{self, UNIT_SCALE};
use crate::math::fixed_point::{self, BPS_DENOMINATOR};
use crate::quoting::{MarketAddress, QuoteOperations, Side};

/// État d'une vente à courbe d'émission en deux phases (quadratique puis
/// linéaire).
///
/// Tous les montants sont en plus petite unité ; la courbe, elle, n'est
/// définie que sur des ticks entiers de `UNIT_SCALE` unités. L'état vient
/// d'un lecteur externe, supposé frais et cohérent au moment de l'appel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSale {
    pub address: MarketAddress,
    /// Tokens nets déjà vendus par la courbe.
    pub net_sold: u128,
    /// Plafond total de la vente.
    pub sale_cap: u128,
    /// Point de bascule quadratique -> linéaire. `quad_cap <= sale_cap`.
    pub quad_cap: u128,
    /// Raideur de la courbe. Strictement positif.
    pub divisor: u128,
    /// ETH déjà séquestré par la vente.
    pub eth_escrow: u128,
    /// Objectif de levée.
    pub eth_target: u128,
}

impl CurveSale {
    /// Vérifie les invariants structurels de la vente, avant toute arithmétique.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.divisor == 0 {
            return Err(QuoteError::InvalidCurveParameters("divisor is zero"));
        }
        if self.quad_cap > self.sale_cap {
            return Err(QuoteError::InvalidCurveParameters("quad_cap exceeds sale_cap"));
        }
        if self.net_sold > self.sale_cap {
            return Err(QuoteError::InvalidCurveParameters("net_sold exceeds sale_cap"));
        }
        Ok(())
    }

    fn net_sold_ticks(&self) -> u128 {
        curve_math::ticks(self.net_sold)
    }

    fn sale_cap_ticks(&self) -> u128 {
        curve_math::ticks(self.sale_cap)
    }

    fn quad_cap_ticks(&self) -> u128 {
        curve_math::ticks(self.quad_cap)
    }

    fn cost_at(&self, ticks: u128) -> Result<u128, QuoteError> {
        curve_math::cumulative_cost(ticks, self.quad_cap_ticks(), self.divisor)
    }

    /// ETH rendu pour `ticks_back` ticks revendus depuis l'état courant.
    /// L'appelant garantit `ticks_back <= net_sold_ticks`.
    fn refund_for(&self, ticks_back: u128) -> Result<u128, QuoteError> {
        let sold = self.net_sold_ticks();
        let kept = self.cost_at(sold - ticks_back)?;
        Ok(self.cost_at(sold)?.saturating_sub(kept))
    }

    /// Coût cumulé des ticks déjà vendus : la valeur « total levé » des
    /// affichages. Ce n'est PAS le prix courant fois les ticks vendus.
    pub fn cumulative_cost(&self) -> Result<u128, QuoteError> {
        self.validate()?;
        self.cost_at(self.net_sold_ticks())
    }

    /// Avancement de la levée vers son objectif, en points de base, borné à
    /// 10000. Valeur d'affichage uniquement.
    pub fn progress_bps(&self) -> u64 {
        if self.eth_target == 0 {
            return 0;
        }
        let bps = fixed_point::mul_div_floor(self.eth_escrow, BPS_DENOMINATOR, self.eth_target)
            .unwrap_or(0);
        bps.min(BPS_DENOMINATOR) as u64
    }

    /// La vente est close quand le cap de tokens ou l'objectif d'ETH est atteint.
    pub fn is_complete(&self) -> bool {
        self.net_sold >= self.sale_cap
            || (self.eth_target > 0 && self.eth_escrow >= self.eth_target)
    }
}

impl QuoteOperations for CurveSale {
    fn address(&self) -> MarketAddress {
        self.address
    }

    fn get_quote(&self, side: Side, amount_in: u128) -> Result<u128, QuoteError> {
        self.validate()?;
        if amount_in == 0 {
            return Err(QuoteError::ZeroAmount);
        }
        match side {
            Side::Buy => {
                // Combien de ticks le budget couvre-t-il ? Inversion exacte
                // par dichotomie sur le coût cumulé, pas de racine de cubique.
                let sold = self.net_sold_ticks();
                let cap = self.sale_cap_ticks();
                if sold >= cap {
                    return Err(QuoteError::InsufficientLiquidity);
                }
                let bought = curve_math::ticks_affordable(
                    sold,
                    cap,
                    self.quad_cap_ticks(),
                    self.divisor,
                    amount_in,
                )?;
                bought.checked_mul(UNIT_SCALE).ok_or(QuoteError::Overflow)
            }
            Side::Sell => {
                // Remboursement du delta de coût cumulé. Les fractions de tick
                // ne valent rien : division tronquée assumée.
                let ticks_back = curve_math::ticks(amount_in);
                if ticks_back == 0 {
                    return Ok(0);
                }
                if ticks_back > self.net_sold_ticks() {
                    return Err(QuoteError::InsufficientLiquidity);
                }
                self.refund_for(ticks_back)
            }
        }
    }

    fn get_required_input(&self, side: Side, amount_out: u128) -> Result<u128, QuoteError> {
        self.validate()?;
        if amount_out == 0 {
            return Err(QuoteError::ZeroAmount);
        }
        match side {
            Side::Buy => {
                // Entrée requise pour recevoir AU MOINS `amount_out` tokens :
                // les ticks s'arrondissent vers le HAUT.
                let ticks_needed = amount_out.div_ceil(UNIT_SCALE);
                let sold = self.net_sold_ticks();
                let target = sold.checked_add(ticks_needed).ok_or(QuoteError::Overflow)?;
                if target > self.sale_cap_ticks() {
                    return Err(QuoteError::InsufficientLiquidity);
                }
                Ok(self.cost_at(target)?.saturating_sub(self.cost_at(sold)?))
            }
            Side::Sell => {
                // Plus petit nombre de ticks à rendre pour recevoir au moins
                // `amount_out` wei : dichotomie sur le remboursement, monotone.
                let sold = self.net_sold_ticks();
                if sold == 0 || self.refund_for(sold)? < amount_out {
                    return Err(QuoteError::InsufficientLiquidity);
                }
                let mut lo: u128 = 0;
                let mut hi = sold;
                while lo < hi {
                    let mid = lo + (hi - lo) / 2;
                    if self.refund_for(mid)? >= amount_out {
                        hi = mid;
                    } else {
                        lo = mid + 1;
                    }
                }
                lo.checked_mul(UNIT_SCALE).ok_or(QuoteError::Overflow)
            }
        }
    }

    fn spot_price(&self) -> Result<u128, QuoteError> {
        self.validate()?;
        curve_math::marginal_price(self.net_sold_ticks(), self.quad_cap_ticks(), self.divisor)
    }
}
