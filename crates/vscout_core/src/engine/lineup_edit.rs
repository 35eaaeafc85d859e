use crate::error::MatchError;
use crate::models::{
    ActionQuality, ActionType, Lineup, MatchState, Position, RallyEvent, ResultType, TeamSide,
};

use super::{MatchEngine, Transition};

/// Operator changes to one side's lineup outside of rally play.
#[derive(Debug, Clone, PartialEq)]
pub enum LineupEdit {
    /// Manual rotation button; no event.
    Rotate,
    /// Re-entered lineup, typically between sets; no event.
    Replace(Lineup),
    /// Swap the player at `position` for `incoming`; logged as a substitution.
    Substitute { position: Position, incoming: String, recorded_at: i64 },
}

impl LineupEdit {
    /// Substitution stamped with the current wall clock.
    pub fn substitute(position: Position, incoming: impl Into<String>) -> Self {
        LineupEdit::Substitute {
            position,
            incoming: incoming.into(),
            recorded_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl MatchEngine {
    pub fn apply_lineup_edit(
        &self,
        state: &MatchState,
        side: TeamSide,
        edit: &LineupEdit,
    ) -> Result<Transition, MatchError> {
        let mut next = state.clone();

        match edit {
            LineupEdit::Rotate => {
                let rotated = next.lineup(side).rotate();
                *next.lineup_mut(side) = rotated;
                Ok(Transition { state: next, event: None })
            }
            LineupEdit::Replace(lineup) => {
                *next.lineup_mut(side) = lineup.clone();
                Ok(Transition { state: next, event: None })
            }
            LineupEdit::Substitute { position, incoming, recorded_at } => {
                let incoming = incoming.trim();
                if incoming.is_empty() {
                    return Err(MatchError::EmptyNumber);
                }

                let lineup = state.lineup(side);
                if lineup.contains(incoming) {
                    return Err(MatchError::DuplicateNumber { number: incoming.to_string(), side });
                }

                let outgoing = lineup.get(*position).to_string();
                *next.lineup_mut(side) = lineup.with_player(*position, incoming.to_string());

                let event = RallyEvent {
                    id: state.next_event_id(),
                    recorded_at: *recorded_at,
                    set_number: next.set_number,
                    home_score: next.home_score,
                    away_score: next.away_score,
                    side,
                    position: *position,
                    player_number: outgoing.clone(),
                    action: ActionType::Substitution,
                    quality: ActionQuality::Normal,
                    result: ResultType::Normal,
                    start: None,
                    end: None,
                    serving_side: next.serving_side,
                    note: format!("Sub ({}): #{} -> #{}", side, outgoing, incoming),
                };
                next.events.push(event.clone());

                Ok(Transition { state: next, event: Some(event) })
            }
        }
    }
}
