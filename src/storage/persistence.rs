//! Snapshot files for catalog dump/restore

use crate::core::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Json,
    #[serde(rename = "msgpack")]
    MessagePack,
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "msgpack" | "messagepack" => Ok(Self::MessagePack),
            other => Err(format!("Unknown snapshot format '{}'", other)),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::MessagePack => write!(f, "msgpack"),
        }
    }
}

pub fn encode<T: Serialize>(value: &T, format: SnapshotFormat) -> Result<Vec<u8>> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(value)?),
        SnapshotFormat::MessagePack => rmp_serde::to_vec_named(value)
            .map_err(|e| StoreError::Serialization(format!("Failed to encode snapshot: {}", e))),
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8], format: SnapshotFormat) -> Result<T> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::from_slice(bytes)?),
        SnapshotFormat::MessagePack => rmp_serde::from_slice(bytes)
            .map_err(|e| StoreError::Serialization(format!("Failed to decode snapshot: {}", e))),
    }
}

/// Write `value` to `path` atomically: encode into a temp file in the same
/// directory, then rename over the target.
pub fn save_snapshot<T: Serialize>(path: &Path, value: &T, format: SnapshotFormat) -> Result<()> {
    let bytes = encode(value, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| StoreError::Io(format!("Failed to create snapshot directory: {}", e)))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| StoreError::Io(format!("Failed to persist snapshot: {}", e.error)))?;

    info!(path = %path.display(), %format, bytes = bytes.len(), "snapshot saved");
    Ok(())
}

pub fn load_snapshot<T: DeserializeOwned>(path: &Path, format: SnapshotFormat) -> Result<T> {
    let bytes = fs::read(path)
        .map_err(|e| StoreError::Io(format!("Failed to read snapshot {}: {}", path.display(), e)))?;
    let value = decode(&bytes, format)?;
    info!(path = %path.display(), %format, "snapshot loaded");
    Ok(value)
}
