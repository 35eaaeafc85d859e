use crate::error::MatchError;
use crate::models::{
    ActionQuality, ActionType, Coordinate, MatchState, Position, RallyEvent, ResultType, TeamSide,
};

use super::{MatchEngine, Transition};

/// One touch as entered by the operator, before the engine resolves it.
#[derive(Debug, Clone, PartialEq)]
pub struct RallyInput {
    pub side: TeamSide,
    pub position: Position,
    pub action: ActionType,
    pub quality: ActionQuality,
    pub result: ResultType,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
    /// Unix milliseconds.
    pub recorded_at: i64,
}

impl RallyInput {
    /// Input stamped with the current wall clock and no shot path.
    pub fn new(
        side: TeamSide,
        position: Position,
        action: ActionType,
        quality: ActionQuality,
        result: ResultType,
    ) -> Self {
        Self {
            side,
            position,
            action,
            quality,
            result,
            start: None,
            end: None,
            recorded_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn at(mut self, recorded_at: i64) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    pub fn with_path(mut self, start: Coordinate, end: Coordinate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

impl MatchEngine {
    /// Record one touch.
    ///
    /// A terminal result credits exactly one side with one point. When the
    /// point goes to the receiving side it takes the serve and rotates once.
    pub fn apply_rally(
        &self,
        state: &MatchState,
        input: &RallyInput,
    ) -> Result<Transition, MatchError> {
        if input.action == ActionType::Substitution {
            return Err(MatchError::UnsupportedAction(input.action));
        }

        let player_number = state.lineup(input.side).get(input.position).to_string();
        let mut next = state.clone();

        if let Some(winner) = input.result.point_winner(input.side) {
            *next.score_mut(winner) += 1;

            if winner != next.serving_side {
                next.serving_side = winner;
                let rotated = next.lineup(winner).rotate();
                *next.lineup_mut(winner) = rotated;
            }
        }

        let event = RallyEvent {
            id: state.next_event_id(),
            recorded_at: input.recorded_at,
            set_number: next.set_number,
            home_score: next.home_score,
            away_score: next.away_score,
            side: input.side,
            position: input.position,
            player_number,
            action: input.action,
            quality: input.quality,
            result: input.result,
            start: input.start,
            end: input.end,
            serving_side: next.serving_side,
            note: self.config.side_name(input.side).to_string(),
        };
        next.events.push(event.clone());

        Ok(Transition { state: next, event: Some(event) })
    }
}
