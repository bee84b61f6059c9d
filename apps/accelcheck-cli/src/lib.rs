//! Report flows behind the `test-cuda` and `verify-cuda` binaries.
//!
//! Both flows are written against [`RuntimeProbe`](accelcheck_core::traits::RuntimeProbe)
//! and an `io::Write`, so they run the same way against candle or a fake runtime.

pub mod diagnose;
pub mod verify;

use accelcheck_core::config::{Config, Settings};
use tracing_subscriber::EnvFilter;

/// Settings from `config.toml` / `APP_*`, or the defaults when loading fails.
pub fn load_settings() -> Settings {
    settings_or_default(Config::load().and_then(|c| c.settings()))
}

pub fn settings_or_default(loaded: anyhow::Result<Settings>) -> Settings {
    match loaded {
        Ok(settings) => settings,
        Err(e) => { eprintln!("⚠️  Error loading config, using defaults: {}", e); Settings::default() }
    }
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `log.filter`.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
