use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Save not found: {key}")]
    NotFound { key: String },

    #[error("Invalid save key: {key:?}")]
    InvalidKey { key: String },

    #[error("Export failed: {0}")]
    Export(String),
}

impl SaveError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::StorageUnavailable(_) => true, // Free space and retry
            SaveError::NotFound { .. } => true,
            SaveError::InvalidKey { .. } => true,
            SaveError::MalformedSnapshot(_) => false,
            SaveError::Export(_) => false,
        }
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::MalformedSnapshot(e.to_string())
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::StorageUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(SaveError::StorageUnavailable("quota".into()).is_recoverable());
        assert!(SaveError::NotFound { key: "a".into() }.is_recoverable());
        assert!(!SaveError::MalformedSnapshot("bad".into()).is_recoverable());
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: SaveError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, SaveError::MalformedSnapshot(_)));
    }
}
