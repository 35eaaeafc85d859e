use crate::error::MatchError;
use crate::models::MatchState;

/// Linear undo/redo over whole-state snapshots.
///
/// `entries[cursor]` is the live state. Applying a new state discards every
/// entry after the cursor.
#[derive(Debug, Clone)]
pub struct MatchHistory {
    entries: Vec<MatchState>,
    cursor: usize,
    max_entries: Option<usize>,
}

impl MatchHistory {
    pub fn new(initial: MatchState) -> Self {
        Self { entries: vec![initial], cursor: 0, max_entries: None }
    }

    /// Keep at most `max_entries` states, dropping the oldest first.
    /// A limit of 0 is treated as 1.
    pub fn with_limit(initial: MatchState, max_entries: usize) -> Self {
        Self { entries: vec![initial], cursor: 0, max_entries: Some(max_entries.max(1)) }
    }

    pub fn current(&self) -> &MatchState {
        &self.entries[self.cursor]
    }

    pub fn apply(&mut self, state: MatchState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.max_entries {
            if self.entries.len() > limit {
                let overflow = self.entries.len() - limit;
                self.entries.drain(..overflow);
                self.cursor -= overflow;
            }
        }
    }

    pub fn undo(&mut self) -> Result<&MatchState, MatchError> {
        if !self.can_undo() {
            return Err(MatchError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    pub fn redo(&mut self) -> Result<&MatchState, MatchError> {
        if !self.can_redo() {
            return Err(MatchError::NothingToRedo);
        }
        self.cursor += 1;
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drop all history and start over from `state` (used after loading).
    pub fn reset(&mut self, state: MatchState) {
        self.entries.clear();
        self.entries.push(state);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{config, state};
    use crate::engine::{MatchEngine, RallyInput};
    use crate::models::{ActionQuality, ActionType, Position, ResultType, TeamSide};
    use proptest::prelude::*;

    fn point(s: &MatchState, side: TeamSide) -> MatchState {
        let input = RallyInput::new(
            side,
            Position::Two,
            ActionType::Attack,
            ActionQuality::Perfect,
            ResultType::Point,
        )
        .at(0);
        MatchEngine::new(config()).apply_rally(s, &input).unwrap().state
    }

    #[test]
    fn test_empty_history_rejects_undo_and_redo() {
        let mut h = MatchHistory::new(state(TeamSide::Home));
        assert_eq!(h.undo().unwrap_err(), MatchError::NothingToUndo);
        assert_eq!(h.redo().unwrap_err(), MatchError::NothingToRedo);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_apply_after_undo_drops_redo_tail() {
        let s0 = state(TeamSide::Home);
        let mut h = MatchHistory::new(s0.clone());
        let s1 = point(&s0, TeamSide::Home);
        let s2 = point(&s1, TeamSide::Away);
        h.apply(s1.clone());
        h.apply(s2);

        assert_eq!(h.undo().unwrap(), &s1);
        let s2b = point(&s1, TeamSide::Home);
        h.apply(s2b.clone());

        assert!(!h.can_redo());
        assert_eq!(h.redo().unwrap_err(), MatchError::NothingToRedo);
        assert_eq!(h.current(), &s2b);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let s0 = state(TeamSide::Home);
        let mut h = MatchHistory::with_limit(s0.clone(), 3);
        let mut s = s0;
        for _ in 0..5 {
            s = point(&s, TeamSide::Home);
            h.apply(s.clone());
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), 2);
        assert_eq!(h.current().home_score, 5);
        h.undo().unwrap();
        h.undo().unwrap();
        assert_eq!(h.current().home_score, 3);
        assert!(!h.can_undo());
    }

    #[test]
    fn test_reset_leaves_single_entry() {
        let s0 = state(TeamSide::Home);
        let mut h = MatchHistory::new(s0.clone());
        h.apply(point(&s0, TeamSide::Away));
        h.reset(s0.clone());
        assert_eq!(h.len(), 1);
        assert_eq!(h.current(), &s0);
        assert!(!h.can_undo());
    }

    proptest! {
        #[test]
        fn prop_undo_redo_roundtrip(sides in prop::collection::vec(any::<bool>(), 1..30), k in 0usize..30) {
            let s0 = state(TeamSide::Home);
            let mut h = MatchHistory::new(s0.clone());
            let mut s = s0;
            for home in &sides {
                let side = if *home { TeamSide::Home } else { TeamSide::Away };
                s = point(&s, side);
                h.apply(s.clone());
            }
            let latest = h.current().clone();
            let n = k.min(sides.len());

            for _ in 0..n {
                h.undo().unwrap();
            }
            for _ in 0..n {
                h.redo().unwrap();
            }
            prop_assert_eq!(h.current(), &latest);
            prop_assert!(!h.can_redo());
        }
    }
}
