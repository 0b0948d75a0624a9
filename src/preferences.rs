//! Servo engine preferences built from the `[engine]` config section.
//!
//! - Thread pools sized to available CPU cores (clamped)
//! - HTTP cache size and user agent from the config
//! - Permission-prompting APIs (geolocation, Bluetooth, notifications) off:
//!   this host has no UI to answer the prompts

use tracing::info;

use crate::config::EngineConfig;

/// Builds Servo `Preferences` for this machine and config.
#[allow(clippy::field_reassign_with_default)]
pub fn build_servo_preferences(engine: &EngineConfig) -> servo::Preferences {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get() as i64)
        .unwrap_or(4);

    let mut prefs = servo::Preferences::default();

    // ── Performance Tuning ────────────────────────────────────────────────
    prefs.layout_threads = layout_threads(engine.layout_threads, cpus);
    prefs.threadpools_async_runtime_workers_max = (cpus * 2).min(16);
    prefs.threadpools_image_cache_workers_max = cpus.min(8);
    prefs.threadpools_webrender_workers_max = (cpus / 2).clamp(2, 8);
    prefs.threadpools_resource_workers_max = cpus.min(8);
    prefs.network_http_cache_size = engine.cache_size;
    prefs.gfx_precache_shaders = engine.precache_shaders;

    // ── Prompts ───────────────────────────────────────────────────────────
    prefs.dom_geolocation_enabled = false;
    prefs.dom_bluetooth_enabled = false;
    prefs.dom_notification_enabled = false;

    if !engine.user_agent.is_empty() {
        prefs.user_agent = engine.user_agent.clone();
    }

    info!(
        cpus,
        layout_threads = prefs.layout_threads,
        cache_size = prefs.network_http_cache_size,
        custom_user_agent = !engine.user_agent.is_empty(),
        "Servo preferences configured"
    );

    prefs
}

/// `configured` > 0 wins; otherwise one thread per core, at most 8.
fn layout_threads(configured: i64, cpus: i64) -> i64 {
    if configured > 0 {
        configured
    } else {
        cpus.clamp(1, 8)
    }
}
