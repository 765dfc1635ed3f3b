// src/quoting/mod.rs

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::QuoteError;

// --- 1. Déclarer les modules de marché ---
pub mod curve;
pub mod quote_operations;
pub mod swap;

// --- 2. Importer le trait ---
pub use quote_operations::QuoteOperations;

/// Identifiant opaque d'un marché : 32 octets, affichés en hexadécimal.
/// Le moteur ne lui donne aucun sens on-chain : c'est une clé de lecture pour
/// les collaborateurs externes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MarketAddress(pub [u8; 32]);

impl fmt::Display for MarketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for MarketAddress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s.trim_start_matches("0x"))?;
        let bytes: [u8; 32] = raw
            .as_slice()
            .try_into()
            .map_err(|_| anyhow!("a market address is exactly 32 bytes"))?;
        Ok(MarketAddress(bytes))
    }
}

impl Serialize for MarketAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MarketAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sens de l'échange : `Buy` fournit la devise de cotation (ETH) et reçoit le
/// token de base, `Sell` fait l'inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// Résultat d'une cotation.
///
/// Valeur pure, sans identité ni cycle de vie : recalculée à chaque saisie,
/// jamais mise en cache par le moteur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount_in: u128,
    pub amount_out: u128,
    /// Borne protégée contre le slippage : minimum acceptable en sortie
    /// (exact-in) ou maximum acceptable en entrée (exact-out).
    pub bounded_amount: u128,
    pub price_impact_bps: Option<u64>,
}

// --- 3. Définir l'enum unifié des marchés cotables ---
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Market {
    SwapPool(swap::SwapMarket),
    CurveSale(curve::CurveSale),
}

// --- 4. Implémenter le trait pour l'enum ---
impl QuoteOperations for Market {
    fn address(&self) -> MarketAddress {
        match self {
            Market::SwapPool(m) => m.address(),
            Market::CurveSale(m) => m.address(),
        }
    }

    fn get_quote(&self, side: Side, amount_in: u128) -> Result<u128, QuoteError> {
        match self {
            Market::SwapPool(m) => m.get_quote(side, amount_in),
            Market::CurveSale(m) => m.get_quote(side, amount_in),
        }
    }

    fn get_required_input(&self, side: Side, amount_out: u128) -> Result<u128, QuoteError> {
        match self {
            Market::SwapPool(m) => m.get_required_input(side, amount_out),
            Market::CurveSale(m) => m.get_required_input(side, amount_out),
        }
    }

    fn spot_price(&self) -> Result<u128, QuoteError> {
        match self {
            Market::SwapPool(m) => m.spot_price(),
            Market::CurveSale(m) => m.spot_price(),
        }
    }
}

/// Les lecteurs d'état on-chain sont des collaborateurs EXTERNES : le moteur
/// suppose des états frais et cohérents au moment de l'appel et ne vérifie
/// jamais leur péremption. Aucune implémentation ici.
pub trait MarketReader {
    fn swap_pool(&self, address: &MarketAddress) -> anyhow::Result<swap::SwapMarket>;
    fn curve_sale(&self, address: &MarketAddress) -> anyhow::Result<curve::CurveSale>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_address_hex_round_trip() {
        let address = MarketAddress([7u8; 32]);
        let rendered = address.to_string();
        assert_eq!(rendered.len(), 64);
        assert_eq!(rendered.parse::<MarketAddress>().unwrap(), address);
        // Le préfixe 0x des adresses EVM est accepté.
        assert_eq!(
            format!("0x{rendered}").parse::<MarketAddress>().unwrap(),
            address
        );
    }

    #[test]
    fn test_market_address_rejects_bad_lengths() {
        assert!("deadbeef".parse::<MarketAddress>().is_err());
        assert!("zz".parse::<MarketAddress>().is_err());
    }
}
