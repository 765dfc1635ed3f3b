// src/error.rs

use thiserror::Error;

/// Taxonomie des échecs du coeur de cotation.
///
/// Chaque variante est une condition locale, récupérable et déterministe :
/// une pure fonction des entrées, jamais un état transitoire. Le moteur ne
/// réessaie donc jamais. C'est à l'appelant de présenter ces cas comme des
/// messages de validation, pas comme des crashs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Une réserve est nulle, ou la sortie exacte demandée atteint/dépasse
    /// ce que le marché peut fournir.
    #[error("insufficient liquidity for the requested amount")]
    InsufficientLiquidity,

    /// Frais >= 10000 bps : le multiplicateur effectif serait nul ou négatif.
    #[error("invalid fee: {0} bps (must be < 10000)")]
    InvalidFee(u64),

    /// Paramètres de courbe incohérents (divisor nul, caps inversés, ...).
    #[error("invalid curve parameters: {0}")]
    InvalidCurveParameters(&'static str),

    /// Cotation demandée pour un montant nul.
    #[error("amount must be strictly positive")]
    ZeroAmount,

    /// Le résultat ne tient pas sur 128 bits après reconversion.
    #[error("arithmetic overflow during quote computation")]
    Overflow,
}
