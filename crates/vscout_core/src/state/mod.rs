//! Live scouting session
//!
//! `MatchSession` owns the engine and the undo history for one match. Every
//! recorded action goes through the engine first and is pushed to history only
//! when accepted. The session can be converted to a `MatchSnapshot` for
//! persistence and restored from one; a restored session starts with a single
//! history entry.

pub mod history;

pub use history::MatchHistory;

use crate::analysis::{self, PlayerRanking, StatFilter, StatSummary, TeamComparison};
use crate::config::HistoryConfig;
use crate::engine::{self, LineupEdit, MatchEngine, RallyInput, Transition};
use crate::error::MatchError;
use crate::export::{self, ExportOptions};
use crate::models::{MatchConfig, MatchState, RallyEvent, TeamSide};
use crate::save::{MatchSnapshot, SaveError, SnapshotRepository};

#[derive(Debug, Clone)]
pub struct MatchSession {
    engine: MatchEngine,
    history: MatchHistory,
}

impl MatchSession {
    pub fn new(config: MatchConfig, initial: MatchState) -> Self {
        Self { engine: MatchEngine::new(config), history: MatchHistory::new(initial) }
    }

    pub fn with_history_config(
        config: MatchConfig,
        initial: MatchState,
        history: &HistoryConfig,
    ) -> Self {
        let history = match history.max_entries {
            Some(limit) => MatchHistory::with_limit(initial, limit),
            None => MatchHistory::new(initial),
        };
        Self { engine: MatchEngine::new(config), history }
    }

    pub fn config(&self) -> &MatchConfig {
        self.engine.config()
    }

    pub fn current(&self) -> &MatchState {
        self.history.current()
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ========================
    // Transitions
    // ========================

    pub fn record_rally(&mut self, input: &RallyInput) -> Result<Option<RallyEvent>, MatchError> {
        let result = self.engine.apply_rally(self.current(), input);
        self.commit(result, "rally")
    }

    pub fn edit_lineup(
        &mut self,
        side: TeamSide,
        edit: &LineupEdit,
    ) -> Result<Option<RallyEvent>, MatchError> {
        let result = self.engine.apply_lineup_edit(self.current(), side, edit);
        self.commit(result, "lineup edit")
    }

    pub fn start_new_set(&mut self) -> &MatchState {
        let next = engine::start_new_set(self.current());
        log::info!(
            "Set {} closed {}-{}; sets {}-{}",
            self.current().set_number,
            self.current().home_score,
            self.current().away_score,
            next.home_set_wins,
            next.away_set_wins
        );
        self.history.apply(next);
        self.current()
    }

    pub fn undo(&mut self) -> Result<&MatchState, MatchError> {
        match self.history.undo() {
            Ok(state) => {
                log::debug!("Undo -> {}-{}", state.home_score, state.away_score);
                Ok(state)
            }
            Err(e) => {
                log::warn!("Undo rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn redo(&mut self) -> Result<&MatchState, MatchError> {
        match self.history.redo() {
            Ok(state) => {
                log::debug!("Redo -> {}-{}", state.home_score, state.away_score);
                Ok(state)
            }
            Err(e) => {
                log::warn!("Redo rejected: {}", e);
                Err(e)
            }
        }
    }

    fn commit(
        &mut self,
        result: Result<Transition, MatchError>,
        what: &str,
    ) -> Result<Option<RallyEvent>, MatchError> {
        match result {
            Ok(Transition { state, event }) => {
                log::debug!(
                    "{} applied: {}-{}, {} serving",
                    what,
                    state.home_score,
                    state.away_score,
                    state.serving_side
                );
                self.history.apply(state);
                Ok(event)
            }
            Err(e) => {
                log::warn!("{} rejected: {}", what, e);
                Err(e)
            }
        }
    }

    // ========================
    // Persistence
    // ========================

    pub fn snapshot(&self, saved_at: i64) -> MatchSnapshot {
        MatchSnapshot::capture(self.config(), self.current(), saved_at)
    }

    pub fn from_snapshot(snapshot: MatchSnapshot) -> Result<Self, SaveError> {
        snapshot.validate()?;
        Ok(Self::new(snapshot.config, snapshot.state))
    }

    /// Write the current state under `key`. A failure leaves the session as is.
    pub fn save_to<R: SnapshotRepository + ?Sized>(
        &self,
        repo: &mut R,
        key: &str,
    ) -> Result<(), SaveError> {
        let snapshot = self.snapshot(chrono::Utc::now().timestamp_millis());
        repo.save(key, &snapshot).inspect_err(|e| log::warn!("Save '{}' failed: {}", key, e))
    }

    /// Replace this session with the saved one. On failure nothing changes.
    pub fn load_from<R: SnapshotRepository + ?Sized>(
        &mut self,
        repo: &R,
        key: &str,
    ) -> Result<(), SaveError> {
        let snapshot = repo.load(key).inspect_err(|e| log::warn!("Load '{}' failed: {}", key, e))?;

        self.engine = MatchEngine::new(snapshot.config);
        self.history.reset(snapshot.state);
        log::info!(
            "Loaded '{}': set {}, {}-{}",
            key,
            self.current().set_number,
            self.current().home_score,
            self.current().away_score
        );
        Ok(())
    }

    // ========================
    // Analysis
    // ========================

    /// Totals across every set played so far.
    pub fn stats(&self, filter: &StatFilter) -> StatSummary {
        analysis::aggregate(self.current().all_events(), filter)
    }

    pub fn compare_teams(&self) -> TeamComparison {
        analysis::compare_teams(self.current().all_events())
    }

    pub fn ranking(&self, side: TeamSide) -> Vec<PlayerRanking> {
        analysis::rank_players(self.current().all_events(), side)
    }

    pub fn export_csv(&self, options: &ExportOptions) -> Result<Vec<u8>, SaveError> {
        export::export_csv(self.config(), self.current().all_events(), options)
    }
}
