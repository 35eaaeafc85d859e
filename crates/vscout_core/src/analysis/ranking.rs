use serde::{Deserialize, Serialize};

use super::stats::{aggregate, StatFilter, StatSummary};
use crate::models::{RallyEvent, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Top1,
    Top2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub number: String,
    pub points: u32,
    pub summary: StatSummary,
    pub highlight: Option<Highlight>,
}

/// Players of `side` ordered by points scored, best first.
///
/// Ties keep the order in which players first appear in the log. Only the
/// first two entries can be highlighted, and only when they scored.
pub fn rank_players<'a, I>(events: I, side: TeamSide) -> Vec<PlayerRanking>
where
    I: IntoIterator<Item = &'a RallyEvent>,
{
    let team: Vec<&RallyEvent> = events.into_iter().filter(|e| e.side == side).collect();

    let mut numbers: Vec<&str> = Vec::new();
    for event in &team {
        if !numbers.contains(&event.player_number.as_str()) {
            numbers.push(&event.player_number);
        }
    }

    let mut ranking: Vec<PlayerRanking> = numbers
        .into_iter()
        .map(|number| {
            let summary = aggregate(team.iter().copied(), &StatFilter::player(side, number));
            PlayerRanking {
                number: number.to_string(),
                points: summary.total_points(),
                summary,
                highlight: None,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.points.cmp(&a.points));

    for (entry, mark) in ranking.iter_mut().zip([Highlight::Top1, Highlight::Top2]) {
        if entry.points > 0 {
            entry.highlight = Some(mark);
        }
    }

    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::tests::ev;
    use crate::models::{ActionType, ResultType};

    fn kills(side: TeamSide, number: &str, n: usize) -> Vec<RallyEvent> {
        (0..n).map(|_| ev(side, number, ActionType::Attack, ResultType::Point)).collect()
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let mut events = Vec::new();
        events.extend(kills(TeamSide::Home, "9", 2));
        events.extend(kills(TeamSide::Home, "4", 5));
        events.extend(kills(TeamSide::Home, "10", 5));
        events.extend(kills(TeamSide::Away, "4", 8));

        let ranking = rank_players(&events, TeamSide::Home);
        let order: Vec<&str> = ranking.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(order, vec!["4", "10", "9"]);
        assert_eq!(ranking[0].points, 5);
        assert_eq!(ranking[0].highlight, Some(Highlight::Top1));
        assert_eq!(ranking[1].highlight, Some(Highlight::Top2));
        assert_eq!(ranking[2].highlight, None);
    }

    #[test]
    fn test_no_highlight_without_points() {
        let events = vec![
            ev(TeamSide::Away, "1", ActionType::Dig, ResultType::Normal),
            ev(TeamSide::Away, "2", ActionType::Attack, ResultType::Point),
            ev(TeamSide::Away, "3", ActionType::Serve, ResultType::Error),
        ];
        let ranking = rank_players(&events, TeamSide::Away);
        assert_eq!(ranking[0].number, "2");
        assert_eq!(ranking[0].highlight, Some(Highlight::Top1));
        assert_eq!(ranking[1].number, "1");
        assert_eq!(ranking[1].highlight, None);
        assert_eq!(ranking[2].summary.serve_errors, 1);
    }

    #[test]
    fn test_substitution_entries_count_as_presence() {
        let events = vec![ev(TeamSide::Home, "5", ActionType::Substitution, ResultType::Normal)];
        let ranking = rank_players(&events, TeamSide::Home);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].points, 0);
        assert!(ranking[0].highlight.is_none());
    }
}
