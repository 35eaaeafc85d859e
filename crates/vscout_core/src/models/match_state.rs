use serde::{Deserialize, Serialize};

use super::events::{RallyEvent, TeamSide};
use super::lineup::Lineup;

/// Team labels and match name, fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub home_name: String,
    pub away_name: String,
    #[serde(default)]
    pub match_label: String,
}

impl MatchConfig {
    pub fn new(home_name: impl Into<String>, away_name: impl Into<String>) -> Self {
        Self { home_name: home_name.into(), away_name: away_name.into(), match_label: String::new() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.match_label = label.into();
        self
    }

    pub fn side_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_name,
            TeamSide::Away => &self.away_name,
        }
    }
}

/// A finished set, kept for export and statistics. Never replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecord {
    pub set_number: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub events: Vec<RallyEvent>,
}

/// Everything derived from the event log at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub set_number: u32,
    pub home_set_wins: u32,
    pub away_set_wins: u32,
    pub home_lineup: Lineup,
    pub away_lineup: Lineup,
    pub home_score: u32,
    pub away_score: u32,
    pub serving_side: TeamSide,
    /// Current set only, in record order.
    pub events: Vec<RallyEvent>,
    #[serde(default)]
    pub completed_sets: Vec<SetRecord>,
}

impl MatchState {
    /// Fresh match at 0-0 in set 1.
    pub fn new(home_lineup: Lineup, away_lineup: Lineup, serving_side: TeamSide) -> Self {
        Self {
            set_number: 1,
            home_set_wins: 0,
            away_set_wins: 0,
            home_lineup,
            away_lineup,
            home_score: 0,
            away_score: 0,
            serving_side,
            events: Vec::new(),
            completed_sets: Vec::new(),
        }
    }

    pub fn lineup(&self, side: TeamSide) -> &Lineup {
        match side {
            TeamSide::Home => &self.home_lineup,
            TeamSide::Away => &self.away_lineup,
        }
    }

    pub(crate) fn lineup_mut(&mut self, side: TeamSide) -> &mut Lineup {
        match side {
            TeamSide::Home => &mut self.home_lineup,
            TeamSide::Away => &mut self.away_lineup,
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub(crate) fn score_mut(&mut self, side: TeamSide) -> &mut u32 {
        match side {
            TeamSide::Home => &mut self.home_score,
            TeamSide::Away => &mut self.away_score,
        }
    }

    pub fn set_wins(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_set_wins,
            TeamSide::Away => self.away_set_wins,
        }
    }

    /// Archived sets first, then the current set.
    pub fn all_events(&self) -> impl Iterator<Item = &RallyEvent> {
        self.completed_sets.iter().flat_map(|s| s.events.iter()).chain(self.events.iter())
    }

    pub fn event_count(&self) -> usize {
        self.completed_sets.iter().map(|s| s.events.len()).sum::<usize>() + self.events.len()
    }

    /// Ids increase in record order, so the next one follows the newest event.
    pub fn next_event_id(&self) -> u64 {
        self.events
            .last()
            .or_else(|| self.completed_sets.iter().rev().find_map(|s| s.events.last()))
            .map_or(1, |e| e.id.saturating_add(1))
    }
}
