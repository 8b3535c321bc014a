use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domains::{DomainClassifier, HostMatch};
use crate::url_model::{GpMode, Normalizer};

/// Marker attribute names written onto scanned links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Set to "true" on links whose href was rewritten.
    pub cleaned: String,
    /// Set to "true" on links pointing at a URL shortener.
    pub shortened: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            cleaned: "data-unaffiliated".to_string(),
            shortened: "data-shortened".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/unaffiliate/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnaffiliateConfig {
    /// How hosts are compared with domain entries: "substring" (default) or "suffix".
    #[serde(default)]
    pub host_match: HostMatch,
    /// `/gp/` handling: "positional" (default) or "strict".
    #[serde(default)]
    pub gp_mode: GpMode,
    /// Extra storefront domains on top of the built-in list.
    #[serde(default)]
    pub extra_marketplace_domains: Vec<String>,
    /// Extra shortener domains on top of the built-in list.
    #[serde(default)]
    pub extra_shortener_domains: Vec<String>,
    /// Period of `scan --watch` in milliseconds.
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,
    #[serde(default)]
    pub markers: MarkerConfig,
}

fn default_scan_interval_ms() -> u64 {
    1000
}

impl Default for UnaffiliateConfig {
    fn default() -> Self {
        Self {
            host_match: HostMatch::default(),
            gp_mode: GpMode::default(),
            extra_marketplace_domains: Vec::new(),
            extra_shortener_domains: Vec::new(),
            scan_interval_ms: default_scan_interval_ms(),
            markers: MarkerConfig::default(),
        }
    }
}

impl UnaffiliateConfig {
    pub fn classifier(&self) -> DomainClassifier {
        DomainClassifier::new(
            self.host_match,
            &self.extra_marketplace_domains,
            &self.extra_shortener_domains,
        )
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.gp_mode)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("unaffiliate")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UnaffiliateConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<UnaffiliateConfig> {
    if !path.exists() {
        let default_cfg = UnaffiliateConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: UnaffiliateConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
