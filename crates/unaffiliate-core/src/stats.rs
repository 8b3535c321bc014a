//! Cleaned-link counters and their JSON file under the XDG state dir.
//!
//! Every update is written straight back to disk. A failed write is logged
//! and otherwise ignored, so counts are eventually right rather than exact.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lifetime and current-page totals. Field names match the stored keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    #[serde(rename = "totalCleaned", default)]
    pub total: u64,
    #[serde(rename = "lastPageCleaned", default)]
    pub page: u64,
}

impl Counters {
    pub fn increment(&mut self, amount: u64) {
        self.total = self.total.saturating_add(amount);
        self.page = self.page.saturating_add(amount);
    }

    pub fn reset_page(&mut self) {
        self.page = 0;
    }
}

/// Counters plus the file they are persisted to (none for in-memory stores).
#[derive(Debug, Default)]
pub struct StatsStore {
    counters: Counters,
    path: Option<PathBuf>,
}

impl StatsStore {
    /// Default path: `~/.local/state/unaffiliate/stats.json`.
    pub fn default_path() -> Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("unaffiliate")?;
        Ok(xdg_dirs.place_state_file("stats.json")?)
    }

    pub fn open_default() -> Result<Self> {
        Self::open_at(&Self::default_path()?)
    }

    /// Load counters from `path`; a missing file starts from zero.
    pub fn open_at(path: &Path) -> Result<Self> {
        let counters = Self::load_from_path(path)?.unwrap_or_default();
        tracing::debug!(path = %path.display(), ?counters, "opened stats store");
        Ok(Self {
            counters,
            path: Some(path.to_path_buf()),
        })
    }

    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn increment(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.counters.increment(amount);
        self.persist();
    }

    pub fn reset_page_counter(&mut self) {
        self.counters.reset_page();
        self.persist();
    }

    /// Write the counters to the store's path, if it has one.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.counters).context("serialize stats")?;
        std::fs::write(path, json).with_context(|| format!("write stats: {}", path.display()))?;
        Ok(())
    }

    /// Read counters from `path`. Returns None when the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Option<Counters>> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read stats: {}", path.display())),
        };
        let counters: Counters = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse stats: {}", path.display()))?;
        Ok(Some(counters))
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("stats not saved: {:#}", e);
        }
    }
}
