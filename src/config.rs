use serde::Deserialize;
use std::path::PathBuf;

use crate::power_repo::DEFAULT_POWER_SUPPLY_ROOT;
use crate::render::Locale;

/// Config file read when `CONFIG_FILE` is not set. Optional: defaults apply if it is absent.
pub const DEFAULT_CONFIG_FILE: &str = "battmon.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub monitoring: MonitoringConfig,
    pub source: SourceConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Delay between the end of one render and the next sample.
    pub update_interval_ms: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub power_supply_root: String,
    /// Supply directory name (e.g. "battery", "BAT0"). Auto-detected when omitted.
    pub power_supply_name: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            power_supply_root: DEFAULT_POWER_SUPPLY_ROOT.into(),
            power_supply_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub locale: Locale,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load from `CONFIG_FILE`, else `battmon.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&PathBuf::from(path)),
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_path(&path)
                } else {
                    tracing::debug!("No {} found; using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.monitoring.update_interval_ms > 0,
            "monitoring.update_interval_ms must be > 0, got {}",
            self.monitoring.update_interval_ms
        );
        anyhow::ensure!(
            !self.source.power_supply_root.is_empty(),
            "source.power_supply_root must be non-empty"
        );
        if let Some(name) = &self.source.power_supply_name {
            anyhow::ensure!(
                !name.is_empty() && !name.contains('/'),
                "source.power_supply_name must be a plain directory name, got {:?}",
                name
            );
        }
        Ok(())
    }

    pub fn update_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.monitoring.update_interval_ms)
    }
}
