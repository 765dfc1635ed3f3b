// src/monitoring/logging.rs

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initialise le logging structuré du moteur.
///
/// Le filtre lit la variable RUST_LOG et retombe sur "info" si elle est
/// absente. La sortie est compacte par défaut ; QUOTER_LOG_JSON=1 bascule en
/// JSON pour les environnements qui collectent les logs.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);

    if std::env::var("QUOTER_LOG_JSON").is_ok() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
