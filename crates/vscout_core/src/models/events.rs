use serde::{Deserialize, Serialize};
use std::fmt;

use super::court::Coordinate;
use super::lineup::Position;

/// Which bench a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub const ALL: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "Home"),
            TeamSide::Away => write!(f, "Away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Serve,
    Receive,
    Set,
    Attack,
    Block,
    Dig,
    Substitution,
}

impl ActionType {
    pub const ALL: [ActionType; 7] = [
        ActionType::Serve,
        ActionType::Receive,
        ActionType::Set,
        ActionType::Attack,
        ActionType::Block,
        ActionType::Dig,
        ActionType::Substitution,
    ];

    /// Actions that draw a directional path on the shot chart.
    pub fn is_directional(self) -> bool {
        matches!(self, ActionType::Attack | ActionType::Serve)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionType::Serve => "Serve",
            ActionType::Receive => "Receive",
            ActionType::Set => "Set",
            ActionType::Attack => "Attack",
            ActionType::Block => "Block",
            ActionType::Dig => "Dig",
            ActionType::Substitution => "Substitution",
        };
        f.write_str(name)
    }
}

/// Descriptive grade of a touch, best first. Never affects score or serve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionQuality {
    Perfect,
    Good,
    #[default]
    Normal,
    Poor,
}

impl ActionQuality {
    /// Conventional scouting shorthand used in exports.
    pub fn symbol(self) -> &'static str {
        match self {
            ActionQuality::Perfect => "#",
            ActionQuality::Good => "+",
            ActionQuality::Normal => "!",
            ActionQuality::Poor => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Point,
    Error,
    /// Play continues; no score or serve change.
    Normal,
}

impl ResultType {
    pub fn ends_rally(self) -> bool {
        !matches!(self, ResultType::Normal)
    }

    /// Side credited with the point when `actor` produced this result.
    pub fn point_winner(self, actor: TeamSide) -> Option<TeamSide> {
        match self {
            ResultType::Point => Some(actor),
            ResultType::Error => Some(actor.opponent()),
            ResultType::Normal => None,
        }
    }
}

/// One recorded action. Appended to the set log and never mutated afterwards.
///
/// Score and serving fields describe the state *after* this event was applied;
/// position and jersey describe the actor *before* any rotation it triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RallyEvent {
    pub id: u64,
    /// Unix milliseconds.
    pub recorded_at: i64,
    pub set_number: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub side: TeamSide,
    pub position: Position,
    pub player_number: String,
    pub action: ActionType,
    pub quality: ActionQuality,
    pub result: ResultType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinate>,
    pub serving_side: TeamSide,
    /// Acting side's label for rallies, a free-form line for substitutions.
    pub note: String,
}

impl RallyEvent {
    pub fn score_for(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn is_substitution(&self) -> bool {
        self.action == ActionType::Substitution
    }

    /// Both ends of the shot path, when recorded.
    pub fn path(&self) -> Option<(Coordinate, Coordinate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_winner() {
        assert_eq!(ResultType::Point.point_winner(TeamSide::Home), Some(TeamSide::Home));
        assert_eq!(ResultType::Error.point_winner(TeamSide::Home), Some(TeamSide::Away));
        assert_eq!(ResultType::Normal.point_winner(TeamSide::Away), None);
        assert!(!ResultType::Normal.ends_rally());
    }

    #[test]
    fn test_quality_ordering_best_first() {
        assert!(ActionQuality::Perfect < ActionQuality::Good);
        assert!(ActionQuality::Good < ActionQuality::Normal);
        assert!(ActionQuality::Normal < ActionQuality::Poor);
        assert_eq!(ActionQuality::Poor.symbol(), "-");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&TeamSide::Away).unwrap(), "\"away\"");
        assert_eq!(serde_json::to_string(&ActionType::Dig).unwrap(), "\"dig\"");
        let parsed: ResultType = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, ResultType::Error);
    }
}
