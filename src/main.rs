//! Point d'entrée de webpane.
//!
//! Aucun argument : l'URL et la taille de la fenêtre viennent de
//! `config.toml` (voir [`webpane::config`]) ou des valeurs par défaut.
//!
//! Codes de sortie : `0` à la fermeture de la fenêtre, non nul si la fenêtre
//! ou le moteur n'ont pas pu être initialisés.

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::process::ExitCode;

use tracing::{error, info};
use webpane::config::Config;

fn main() -> ExitCode {
    // ── 1. Logging / Tracing ───────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    #[cfg(debug_assertions)]
    tracing::warn!(
        "Running in DEBUG mode — pages will load very slowly. Use `cargo run --release` for normal speed."
    );

    // ── 2. Configuration ───────────────────────────────────────────────
    let config = Config::load();
    let settings = config.launch_settings();

    // ── 3. Fenêtre, surface, boucle d'événements ───────────────────────
    match webpane::launch(settings, config.engine) {
        Ok(()) => {
            info!("Fenêtre fermée");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Échec du démarrage");
            eprintln!("webpane: {e}");
            e.into()
        }
    }
}
