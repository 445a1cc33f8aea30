use crate::collection::DefineGuard;
use crate::core::{Result, StoreError};
use crate::storage::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Store configuration
///
/// Built with the setters below, read from a JSON file, or parsed from a
/// `vocabdb://` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Snapshot file the catalog is loaded from and saved to.
    /// `None` keeps everything in memory.
    pub data_path: Option<PathBuf>,

    /// Snapshot encoding
    pub format: SnapshotFormat,

    /// Name-uniqueness strategy for every named collection
    pub define_guard: DefineGuard,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            format: SnapshotFormat::Json,
            define_guard: DefineGuard::UniqueIndex,
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Set the snapshot format
    pub fn format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the define guard
    pub fn define_guard(mut self, guard: DefineGuard) -> Self {
        self.define_guard = guard;
        self
    }

    /// Set the default log filter
    pub fn log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }

    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            StoreError::Io(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Parse from connection string
    ///
    /// Format: "vocabdb://<path>?format=<json|msgpack>&guard=<guard>&log=<filter>"
    /// where `<guard>` is `unique-index` or `check-then-insert` and `<path>` is
    /// `memory` (or empty) for a store without a snapshot file.
    ///
    /// # Examples
    ///
    /// ```
    /// use vocabdb::StoreConfig;
    ///
    /// let url = "vocabdb:///var/lib/vocab.json?guard=check-then-insert";
    /// let config = StoreConfig::from_url(url).unwrap();
    /// assert_eq!(config.data_path.unwrap().to_str(), Some("/var/lib/vocab.json"));
    /// ```
    pub fn from_url(url: &str) -> std::result::Result<Self, String> {
        let Some(rest) = url.strip_prefix("vocabdb://") else {
            return Err("URL must start with 'vocabdb://'".to_string());
        };

        let (location, query) = match rest.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (rest, None),
        };

        let mut config = Self::new();
        if !location.is_empty() && location != "memory" {
            config.data_path = Some(PathBuf::from(location));
        }

        for pair in query.into_iter().flat_map(|q| q.split('&')).filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(format!("Invalid query parameter '{}'", pair));
            };
            match key {
                "format" => config.format = value.parse()?,
                "guard" => config.define_guard = value.parse()?,
                "log" => config.log_level = value.to_string(),
                other => return Err(format!("Unknown parameter '{}'", other)),
            }
        }

        Ok(config)
    }
}
