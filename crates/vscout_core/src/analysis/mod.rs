//! Read-only analysis over recorded events
//!
//! Nothing here mutates match state; every function takes an event iterator so
//! callers can pass the current set, one archived set or the whole match.

pub mod ranking;
pub mod shot_chart;
pub mod stats;

pub use ranking::{rank_players, Highlight, PlayerRanking};
pub use shot_chart::{classify, shot_paths, ShotCategory, ShotPath};
pub use stats::{aggregate, compare_teams, roster_numbers, StatFilter, StatSummary, TeamComparison};
