//! Directional shot data for attack and serve charts.

use serde::{Deserialize, Serialize};

use super::stats::StatFilter;
use crate::models::{ActionType, Coordinate, RallyEvent, ResultType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotCategory {
    Kill,
    Ace,
    Error,
    Neutral,
}

impl ShotCategory {
    pub fn color_hex(self) -> &'static str {
        match self {
            ShotCategory::Kill => "#10B981",
            ShotCategory::Ace => "#3B82F6",
            ShotCategory::Error => "#EF4444",
            ShotCategory::Neutral => "#9CA3AF",
        }
    }
}

/// Category of a drawable shot, or `None` when the event has no full path or
/// is not an attack or serve.
pub fn classify(event: &RallyEvent) -> Option<ShotCategory> {
    if !event.action.is_directional() {
        return None;
    }
    event.path()?;

    let category = match (event.result, event.action) {
        (ResultType::Error, _) => ShotCategory::Error,
        (ResultType::Point, ActionType::Serve) => ShotCategory::Ace,
        (ResultType::Point, ActionType::Attack) => ShotCategory::Kill,
        _ => ShotCategory::Neutral,
    };
    Some(category)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPath {
    pub event_id: u64,
    pub start: Coordinate,
    pub end: Coordinate,
    pub category: ShotCategory,
}

pub fn shot_paths<'a, I>(events: I, filter: &StatFilter) -> Vec<ShotPath>
where
    I: IntoIterator<Item = &'a RallyEvent>,
{
    events
        .into_iter()
        .filter(|e| filter.matches(e))
        .filter_map(|e| {
            let category = classify(e)?;
            let (start, end) = e.path()?;
            Some(ShotPath { event_id: e.id, start, end, category })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::tests::ev;
    use crate::models::TeamSide;

    fn with_path(mut e: RallyEvent) -> RallyEvent {
        e.start = Some(Coordinate::new(20.0, 65.0));
        e.end = Some(Coordinate::new(40.0, 10.0));
        e
    }

    #[test]
    fn test_classify_categories() {
        let serve_point = with_path(ev(TeamSide::Home, "1", ActionType::Serve, ResultType::Point));
        let attack_point = with_path(ev(TeamSide::Home, "1", ActionType::Attack, ResultType::Point));
        let attack_err = with_path(ev(TeamSide::Home, "1", ActionType::Attack, ResultType::Error));
        let serve_normal = with_path(ev(TeamSide::Home, "1", ActionType::Serve, ResultType::Normal));

        assert_eq!(classify(&serve_point), Some(ShotCategory::Ace));
        assert_eq!(classify(&attack_point), Some(ShotCategory::Kill));
        assert_eq!(classify(&attack_err), Some(ShotCategory::Error));
        assert_eq!(classify(&serve_normal), Some(ShotCategory::Neutral));
    }

    #[test]
    fn test_classify_requires_path_and_direction() {
        let no_path = ev(TeamSide::Home, "1", ActionType::Attack, ResultType::Point);
        assert_eq!(classify(&no_path), None);

        let mut half = no_path.clone();
        half.start = Some(Coordinate::new(1.0, 1.0));
        assert_eq!(classify(&half), None);

        let block = with_path(ev(TeamSide::Home, "1", ActionType::Block, ResultType::Point));
        assert_eq!(classify(&block), None);
    }

    #[test]
    fn test_shot_paths_filtered_by_player() {
        let mut a = with_path(ev(TeamSide::Home, "7", ActionType::Attack, ResultType::Point));
        a.id = 4;
        let b = with_path(ev(TeamSide::Home, "8", ActionType::Attack, ResultType::Point));
        let c = ev(TeamSide::Home, "7", ActionType::Serve, ResultType::Point);
        let events = vec![a, b, c];

        let paths = shot_paths(&events, &StatFilter::player(TeamSide::Home, "7"));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].event_id, 4);
        assert_eq!(paths[0].category.color_hex(), "#10B981");
    }
}
