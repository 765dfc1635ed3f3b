// src/quoting/quote_operations.rs

use crate::error::QuoteError;

use super::{MarketAddress, Side};

/// Le contrat commun à tous les marchés cotables.
///
/// C'est la surface que les couches d'affichage et de construction de
/// transaction consomment : deux sens de cotation, un prix instantané, et
/// rien d'autre. Pas d'I/O, pas d'état partagé : chaque appel est une pure
/// fonction de l'état fourni.
pub trait QuoteOperations {
    fn address(&self) -> MarketAddress;

    /// Montant de sortie attendu pour un montant d'entrée exact.
    fn get_quote(&self, side: Side, amount_in: u128) -> Result<u128, QuoteError>;

    /// Montant d'entrée requis pour un montant de sortie exact.
    fn get_required_input(&self, side: Side, amount_out: u128) -> Result<u128, QuoteError>;

    /// Prix instantané du marché, à l'échelle `PRICE_PRECISION` (1e18).
    /// Valeur d'affichage : elle n'alimente jamais une borne de transaction.
    fn spot_price(&self) -> Result<u128, QuoteError>;
}
