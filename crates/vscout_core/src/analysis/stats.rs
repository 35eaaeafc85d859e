//! Box-score counting over the event log.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{ActionType, RallyEvent, ResultType, TeamSide};

/// Narrows an aggregation to one side and/or one jersey number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatFilter {
    pub side: Option<TeamSide>,
    pub player: Option<String>,
}

impl StatFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn team(side: TeamSide) -> Self {
        Self { side: Some(side), player: None }
    }

    pub fn player(side: TeamSide, number: impl Into<String>) -> Self {
        Self { side: Some(side), player: Some(number.into()) }
    }

    pub fn matches(&self, event: &RallyEvent) -> bool {
        self.side.map_or(true, |s| s == event.side)
            && self.player.as_deref().map_or(true, |p| p == event.player_number)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSummary {
    pub attack_total: u32,
    pub attack_kills: u32,
    pub blocks: u32,
    pub serve_aces: u32,
    pub serve_errors: u32,
    pub digs: u32,
}

impl StatSummary {
    /// Kills over attempts in [0, 1]; 0 with no attempts.
    pub fn attack_success_rate(&self) -> f64 {
        if self.attack_total == 0 {
            return 0.0;
        }
        self.attack_kills as f64 / self.attack_total as f64
    }

    pub fn attack_success_percent(&self) -> u32 {
        (self.attack_success_rate() * 100.0).round() as u32
    }

    pub fn total_points(&self) -> u32 {
        self.attack_kills + self.blocks + self.serve_aces
    }

    fn record(&mut self, event: &RallyEvent) {
        match (event.action, event.result) {
            (ActionType::Attack, result) => {
                self.attack_total += 1;
                if result == ResultType::Point {
                    self.attack_kills += 1;
                }
            }
            (ActionType::Block, ResultType::Point) => self.blocks += 1,
            (ActionType::Serve, ResultType::Point) => self.serve_aces += 1,
            (ActionType::Serve, ResultType::Error) => self.serve_errors += 1,
            (ActionType::Dig, _) => self.digs += 1,
            _ => {}
        }
    }
}

pub fn aggregate<'a, I>(events: I, filter: &StatFilter) -> StatSummary
where
    I: IntoIterator<Item = &'a RallyEvent>,
{
    let mut summary = StatSummary::default();
    for event in events.into_iter().filter(|e| filter.matches(e)) {
        summary.record(event);
    }
    summary
}

/// Head-to-head table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamComparison {
    pub home: StatSummary,
    pub away: StatSummary,
}

impl TeamComparison {
    pub fn side(&self, side: TeamSide) -> &StatSummary {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

pub fn compare_teams<'a, I>(events: I) -> TeamComparison
where
    I: IntoIterator<Item = &'a RallyEvent>,
{
    let mut cmp = TeamComparison::default();
    for event in events {
        match event.side {
            TeamSide::Home => cmp.home.record(event),
            TeamSide::Away => cmp.away.record(event),
        }
    }
    cmp
}

/// Distinct jersey numbers that appear for `side`, in numeric order.
/// Non-numeric numbers sort after numeric ones, lexically.
pub fn roster_numbers<'a, I>(events: I, side: TeamSide) -> Vec<String>
where
    I: IntoIterator<Item = &'a RallyEvent>,
{
    let mut numbers: Vec<String> = Vec::new();
    for event in events.into_iter().filter(|e| e.side == side) {
        if !numbers.contains(&event.player_number) {
            numbers.push(event.player_number.clone());
        }
    }
    numbers.sort_by(|a, b| compare_jersey(a, b));
    numbers
}

fn compare_jersey(a: &str, b: &str) -> Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
