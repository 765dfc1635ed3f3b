// src/config.rs

use anyhow::Result;
use serde::Deserialize;

fn default_slippage_tolerance_bps() -> u64 {
    300 // 3%, la tolérance observée sur les pools de swap
}

fn default_quick_buy_slippage_bps() -> u64 {
    1000 // 10%, l'achat rapide sur courbe accepte plus de mouvement
}

/// Réglages du moteur, chargés depuis l'environnement.
/// Le moteur ne fait pas de politique : ces valeurs ne sont que des défauts
/// que l'appelant peut remplacer cotation par cotation.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_slippage_tolerance_bps")]
    pub slippage_tolerance_bps: u64,

    #[serde(default = "default_quick_buy_slippage_bps")]
    pub quick_buy_slippage_bps: u64,

    /// Granularité de sortie imposée par le contrat, en plus petite unité.
    /// Absente = pas de quantification.
    #[serde(default)]
    pub quantization_unit: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            slippage_tolerance_bps: default_slippage_tolerance_bps(),
            quick_buy_slippage_bps: default_quick_buy_slippage_bps(),
            quantization_unit: None,
        }
    }
}
