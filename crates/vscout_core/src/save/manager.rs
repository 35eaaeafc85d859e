use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::error::SaveError;
use super::format::MatchSnapshot;
use crate::models::MatchConfig;

/// Named snapshot storage.
pub trait SnapshotRepository {
    /// Saved entries, most recent first.
    fn list(&self) -> Result<Vec<SnapshotInfo>, SaveError>;
    fn load(&self, key: &str) -> Result<MatchSnapshot, SaveError>;
    fn save(&mut self, key: &str, snapshot: &MatchSnapshot) -> Result<(), SaveError>;
    fn delete(&mut self, key: &str) -> Result<(), SaveError>;
}

/// Listing entry for a save picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub key: String,
    pub label: String,
    /// `None` when the entry could not be read.
    pub saved_at: Option<i64>,
}

impl SnapshotInfo {
    pub fn format_timestamp(&self) -> String {
        self.saved_at
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Just the fields a listing needs; avoids validating whole matches.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotHeader {
    config: HeaderConfig,
    saved_at_epoch_millis: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HeaderConfig {
    #[serde(default)]
    match_label: String,
}

fn sort_newest_first(infos: &mut [SnapshotInfo]) {
    infos.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| a.key.cmp(&b.key)));
}

fn info_from_text(key: &str, text: Option<&str>) -> SnapshotInfo {
    match text.and_then(|t| serde_json::from_str::<SnapshotHeader>(t).ok()) {
        Some(header) => SnapshotInfo {
            key: key.to_string(),
            label: if header.config.match_label.is_empty() {
                key.to_string()
            } else {
                header.config.match_label
            },
            saved_at: Some(header.saved_at_epoch_millis),
        },
        None => SnapshotInfo { key: key.to_string(), label: key.to_string(), saved_at: None },
    }
}

/// Keys become file names, so they must stay inside the save directory.
pub fn validate_key(key: &str) -> Result<(), SaveError> {
    let bad = key.trim().is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.chars().any(char::is_control);
    if bad {
        return Err(SaveError::InvalidKey { key: key.to_string() });
    }
    Ok(())
}

/// Default save name: `<label>_<MMDDHHMM>`, or `match_<MMDDHHMM>` without a label.
pub fn suggested_key(config: &MatchConfig, now: NaiveDateTime) -> String {
    let label: String = config
        .match_label
        .trim()
        .trim_start_matches('.')
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    let label = if label.is_empty() { "match".to_string() } else { label };
    format!("{}_{}", label, now.format("%m%d%H%M"))
}

// ========================
// Directory-backed store
// ========================

/// One pretty-printed JSON file per save.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    dir: PathBuf,
}

impl DirectoryRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn write_atomic(path: &Path, data: &[u8]) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            file.flush()?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }
}

impl SnapshotRepository for DirectoryRepository {
    fn list(&self) -> Result<Vec<SnapshotInfo>, SaveError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut infos = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(&path).ok();
            if text.is_none() {
                log::warn!("Unreadable save file {:?}", path);
            }
            infos.push(info_from_text(key, text.as_deref()));
        }

        sort_newest_first(&mut infos);
        Ok(infos)
    }

    fn load(&self, key: &str) -> Result<MatchSnapshot, SaveError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SaveError::NotFound { key: key.to_string() })
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = MatchSnapshot::from_json(&text)?;
        log::debug!("Loaded {} bytes from {:?}", text.len(), path);
        Ok(snapshot)
    }

    fn save(&mut self, key: &str, snapshot: &MatchSnapshot) -> Result<(), SaveError> {
        validate_key(key)?;
        let text = snapshot.to_json_pretty()?;
        Self::write_atomic(&self.path_for(key), text.as_bytes())?;
        log::info!("Match saved as '{}'", key);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted save '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SaveError::NotFound { key: key.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ========================
// In-memory store
// ========================

/// Map-backed store with an optional byte quota, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse writes that would push the stored total past `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { entries: BTreeMap::new(), quota_bytes: Some(quota_bytes) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store raw text under `key`, bypassing validation.
    pub fn insert_raw(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries.iter().filter(|(k, _)| k.as_str() != key).map(|(_, v)| v.len()).sum()
    }
}

impl SnapshotRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<SnapshotInfo>, SaveError> {
        let mut infos: Vec<SnapshotInfo> =
            self.entries.iter().map(|(k, v)| info_from_text(k, Some(v.as_str()))).collect();
        sort_newest_first(&mut infos);
        Ok(infos)
    }

    fn load(&self, key: &str) -> Result<MatchSnapshot, SaveError> {
        validate_key(key)?;
        let text =
            self.entries.get(key).ok_or_else(|| SaveError::NotFound { key: key.to_string() })?;
        MatchSnapshot::from_json(text)
    }

    fn save(&mut self, key: &str, snapshot: &MatchSnapshot) -> Result<(), SaveError> {
        validate_key(key)?;
        let text = snapshot.to_json_pretty()?;

        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_excluding(key) + text.len();
            if needed > quota {
                return Err(SaveError::StorageUnavailable(format!(
                    "quota exceeded: {} of {} bytes",
                    needed, quota
                )));
            }
        }

        self.entries.insert(key.to_string(), text);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        validate_key(key)?;
        self.entries
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| SaveError::NotFound { key: key.to_string() })
    }
}
