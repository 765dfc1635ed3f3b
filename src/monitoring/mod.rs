// src/monitoring/mod.rs

// L'observabilité du moteur se réduit au logging structuré : une librairie
// pure n'expose ni serveur de métriques ni sonde de santé.
pub mod logging;
