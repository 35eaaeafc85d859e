use serde::{Deserialize, Serialize};

use super::error::SaveError;
use super::SNAPSHOT_VERSION;
use crate::models::{MatchConfig, MatchState, TeamSide};

/// Everything needed to resume a match: labels plus the live state.
///
/// Undo history is not persisted; a loaded snapshot starts a fresh history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    /// Snapshot format version
    pub format_version: u32,

    pub config: MatchConfig,

    pub state: MatchState,

    /// Save timestamp (unix milliseconds)
    pub saved_at_epoch_millis: i64,
}

impl MatchSnapshot {
    pub fn capture(config: &MatchConfig, state: &MatchState, saved_at: i64) -> Self {
        Self {
            format_version: SNAPSHOT_VERSION,
            config: config.clone(),
            state: state.clone(),
            saved_at_epoch_millis: saved_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, SaveError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate. Shape errors and rule violations both come back as
    /// `MalformedSnapshot`.
    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        let snapshot: MatchSnapshot = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.format_version != SNAPSHOT_VERSION {
            return Err(malformed(format!(
                "format version {} (expected {})",
                self.format_version, SNAPSHOT_VERSION
            )));
        }

        let state = &self.state;
        if state.set_number == 0 {
            return Err(malformed("set number must start at 1"));
        }
        let set_wins = u64::from(state.home_set_wins) + u64::from(state.away_set_wins);
        if set_wins > u64::from(state.set_number - 1) {
            return Err(malformed(format!(
                "{} set wins recorded before set {}",
                set_wins, state.set_number
            )));
        }

        if state.completed_sets.len() as u32 != state.set_number - 1 {
            return Err(malformed(format!(
                "{} archived sets before set {}",
                state.completed_sets.len(),
                state.set_number
            )));
        }
        for (i, set) in state.completed_sets.iter().enumerate() {
            let expected = i as u32 + 1;
            if set.set_number != expected {
                return Err(malformed(format!(
                    "archived set {} out of order (expected {})",
                    set.set_number, expected
                )));
            }
            if set.events.iter().any(|e| e.set_number != expected) {
                return Err(malformed(format!("event in archived set {} has wrong set number", expected)));
            }
        }

        if let Some(e) = state.events.iter().find(|e| e.set_number != state.set_number) {
            return Err(malformed(format!(
                "event {} belongs to set {} but current set is {}",
                e.id, e.set_number, state.set_number
            )));
        }

        let mut last_id: Option<u64> = None;
        for event in state.all_events() {
            if last_id.is_some_and(|prev| event.id <= prev) {
                return Err(malformed(format!("event id {} is not increasing", event.id)));
            }
            if event.id == u64::MAX {
                return Err(malformed("event id space exhausted"));
            }
            last_id = Some(event.id);
            if event.start.iter().chain(event.end.iter()).any(|c| !c.is_valid()) {
                return Err(malformed(format!("event {} has a coordinate off the court map", event.id)));
            }
        }

        // Every point in the current set comes from exactly one event.
        for side in TeamSide::ALL {
            let earned = state
                .events
                .iter()
                .filter(|e| e.result.point_winner(e.side) == Some(side))
                .count() as u64;
            if earned != u64::from(state.score(side)) {
                return Err(malformed(format!(
                    "{} score {} does not match {} points in the event log",
                    side,
                    state.score(side),
                    earned
                )));
            }
        }

        if let Some(last) = state.events.last() {
            if last.home_score != state.home_score
                || last.away_score != state.away_score
                || last.serving_side != state.serving_side
            {
                return Err(malformed(format!(
                    "last event {} disagrees with the live score or server",
                    last.id
                )));
            }
        }

        Ok(())
    }
}

fn malformed(msg: impl Into<String>) -> SaveError {
    SaveError::MalformedSnapshot(msg.into())
}
