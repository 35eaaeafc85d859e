// Save/Load for scouting sessions
// Pretty JSON snapshots with versioning and load-time validation

pub mod error;
pub mod format;
pub mod manager;

pub use error::SaveError;
pub use format::MatchSnapshot;
pub use manager::{
    suggested_key, validate_key, DirectoryRepository, MemoryRepository, SnapshotInfo,
    SnapshotRepository,
};

pub const SNAPSHOT_VERSION: u32 = 1;
