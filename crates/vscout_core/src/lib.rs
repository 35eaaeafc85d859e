//! # vscout_core - Volleyball Match Scouting Engine
//!
//! Records a volleyball match touch by touch and derives everything else from
//! the event log: running score, serve possession, side-out rotation, set
//! results and per-player statistics.
//!
//! ## Features
//! - Pure reducer over match state (no I/O in the engine)
//! - Linear undo/redo over whole-state snapshots
//! - Box scores, player ranking and shot charts
//! - Versioned JSON snapshots and CSV export

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod save;
pub mod state;

pub use analysis::{PlayerRanking, ShotCategory, StatFilter, StatSummary};
pub use config::ScoutConfig;
pub use engine::{LineupEdit, MatchEngine, RallyInput, Transition};
pub use error::{MatchError, Result};
pub use export::{export_csv, ExportOptions};
pub use models::{
    ActionQuality, ActionType, Coordinate, Lineup, MatchConfig, MatchState, Position, RallyEvent,
    ResultType, TeamSide,
};
pub use save::{DirectoryRepository, MatchSnapshot, MemoryRepository, SaveError, SnapshotRepository};
pub use state::{MatchHistory, MatchSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
