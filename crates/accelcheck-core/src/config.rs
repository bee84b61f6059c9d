use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device: DeviceSettings,
    pub smoke: SmokeSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Ordinal of the accelerator to probe.
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeSettings {
    /// Side length of the square matrix multiplied by the smoke test.
    pub matrix_size: usize,
}

impl Default for SmokeSettings {
    fn default() -> Self { Self { matrix_size: 1000 } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self { Self { filter: "warn".to_string() } }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    /// Merge defaults, `config.toml`, `config.<env>.toml` and `APP_*` variables
    /// from the current directory.
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_with_env(Path::new("."), &env_name, "APP_")
    }

    /// File layers rooted at `base`, then variables starting with `prefix`.
    /// `__` separates nesting levels: `APP_SMOKE__MATRIX_SIZE` sets `smoke.matrix_size`.
    pub fn load_with_env(base: &Path, env_name: &str, prefix: &str) -> anyhow::Result<Self> {
        let figment = Self::file_layers(base, env_name).merge(Env::prefixed(prefix).split("__"));
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// File layers only, rooted at `base`.
    pub fn load_from(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let config = Self { figment: Self::file_layers(base, env_name) };
        config.validate()?;
        Ok(config)
    }

    fn file_layers(base: &Path, env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment.extract().map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        if settings.smoke.matrix_size == 0 {
            return Err(Error::InvalidConfig("smoke.matrix_size must be greater than 0".to_string()).into());
        }
        Ok(())
    }
}
