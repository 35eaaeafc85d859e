//! Runtime configuration
//!
//! Loaded from JSON. Every section defaults, so `{}` is a valid file. The
//! path can come from `VSCOUT_CONFIG_PATH`; unset or blank means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};
use thiserror::Error;

use crate::models::{ActionType, ResultType};

pub const CONFIG_PATH_ENV: &str = "VSCOUT_CONFIG_PATH";

/// Largest UTC offset accepted for export timestamps, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    IoError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Display labels for export rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSet {
    pub serve: String,
    pub receive: String,
    pub set: String,
    pub attack: String,
    pub block: String,
    pub dig: String,
    pub substitution: String,
    pub point: String,
    pub error: String,
    pub normal: String,
    /// Fifteen column titles, in export order.
    pub header: Vec<String>,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::english()
    }
}

impl LabelSet {
    pub const COLUMN_COUNT: usize = 15;

    pub fn english() -> Self {
        Self {
            serve: "Serve".into(),
            receive: "Receive".into(),
            set: "Set".into(),
            attack: "Attack".into(),
            block: "Block".into(),
            dig: "Dig".into(),
            substitution: "Sub".into(),
            point: "Point".into(),
            error: "Error".into(),
            normal: "Normal".into(),
            header: [
                "Time", "Set", "Home Score", "Away Score", "Serving", "Team", "Position", "Number",
                "Action", "Quality", "Result", "Start X", "Start Y", "End X", "End Y",
            ]
            .map(String::from)
            .to_vec(),
        }
    }

    /// Labels used by the courtside app in Taiwan.
    pub fn traditional_chinese() -> Self {
        Self {
            serve: "發球".into(),
            receive: "接發".into(),
            set: "舉球".into(),
            attack: "攻擊".into(),
            block: "攔網".into(),
            dig: "防守".into(),
            substitution: "換人".into(),
            point: "得分".into(),
            error: "失誤".into(),
            normal: "一般".into(),
            header: [
                "時間", "局數", "我方得分", "對方得分", "發球方", "隊伍", "位置", "背號", "動作",
                "品質", "結果", "起點X", "起點Y", "終點X", "終點Y",
            ]
            .map(String::from)
            .to_vec(),
        }
    }

    pub fn action(&self, action: ActionType) -> &str {
        match action {
            ActionType::Serve => &self.serve,
            ActionType::Receive => &self.receive,
            ActionType::Set => &self.set,
            ActionType::Attack => &self.attack,
            ActionType::Block => &self.block,
            ActionType::Dig => &self.dig,
            ActionType::Substitution => &self.substitution,
        }
    }

    pub fn result(&self, result: ResultType) -> &str {
        match result {
            ResultType::Point => &self.point,
            ResultType::Error => &self.error,
            ResultType::Normal => &self.normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Offset applied to event timestamps in the time column.
    pub utc_offset_minutes: i32,
    /// Prefix output with a UTF-8 byte order mark (spreadsheet apps need it).
    pub include_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { utc_offset_minutes: 0, include_bom: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Cap on undo entries; `None` keeps everything.
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub save_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { save_dir: PathBuf::from("saves") }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub labels: LabelSet,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl ScoutConfig {
    /// English labels, UTC timestamps (default)
    pub fn english() -> Self {
        Self::default()
    }

    /// Traditional Chinese labels on Taipei time
    pub fn taipei() -> Self {
        let mut cfg = Self::default();
        cfg.labels = LabelSet::traditional_chinese();
        cfg.export.utc_offset_minutes = 8 * 60;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ScoutConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&content)
    }

    /// Config from the file named by `VSCOUT_CONFIG_PATH`, or defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let config = Self::load(path)?;
        log::info!("Loaded config from {CONFIG_PATH_ENV}='{path}'");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let offset = self.export.utc_offset_minutes;
        if offset.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::ValidationError(format!(
                "export.utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, offset
            )));
        }
        if self.history.max_entries == Some(0) {
            return Err(ConfigError::ValidationError(
                "history.max_entries must be at least 1".to_string(),
            ));
        }
        if self.storage.save_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("storage.save_dir is empty".to_string()));
        }
        if self.labels.header.len() != LabelSet::COLUMN_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "labels.header needs {} columns, got {}",
                LabelSet::COLUMN_COUNT,
                self.labels.header.len()
            )));
        }
        Ok(())
    }
}
