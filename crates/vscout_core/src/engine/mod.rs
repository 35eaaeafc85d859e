//! Match state engine
//!
//! Pure reducer over [`MatchState`]: each call takes the current state by
//! reference and returns a new one. Rejected calls return an error and the
//! caller's state is untouched.
//!
//! - `rally`: score, serve possession and side-out rotation
//! - `lineup_edit`: manual rotation, lineup replacement, substitutions
//! - `set_flow`: closing a set and opening the next

pub mod lineup_edit;
pub mod rally;
pub mod set_flow;

pub use lineup_edit::LineupEdit;
pub use rally::RallyInput;
pub use set_flow::start_new_set;

use crate::models::{MatchConfig, MatchState, RallyEvent};

/// Result of one engine step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: MatchState,
    /// The event appended to the log, if the step produced one.
    pub event: Option<RallyEvent>,
}

/// Applies rallies and lineup edits for one match.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: MatchConfig,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Lineup, MatchConfig, MatchState, TeamSide};

    pub fn config() -> MatchConfig {
        MatchConfig::new("Falcons", "Rivals")
    }

    pub fn state(serving: TeamSide) -> MatchState {
        MatchState::new(
            Lineup::new(["1", "2", "3", "4", "5", "6"]).unwrap(),
            Lineup::new(["11", "12", "13", "14", "15", "16"]).unwrap(),
            serving,
        )
    }
}
