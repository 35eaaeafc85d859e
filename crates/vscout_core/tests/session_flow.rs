//! End-to-end session flow: record, undo, substitute, close sets, save, load, report.

use vscout_core::analysis::{Highlight, StatFilter};
use vscout_core::config::{HistoryConfig, LabelSet};
use vscout_core::save::{DirectoryRepository, MemoryRepository, SaveError, SnapshotRepository};
use vscout_core::*;

fn session() -> MatchSession {
    let home = Lineup::new(["1", "7", "3", "4", "5", "6"]).unwrap();
    let away = Lineup::new(["11", "12", "13", "14", "15", "16"]).unwrap();
    MatchSession::new(
        MatchConfig::new("Falcons", "Rivals").with_label("League R3"),
        MatchState::new(home, away, TeamSide::Home),
    )
}

fn rally(side: TeamSide, pos: Position, action: ActionType, result: ResultType) -> RallyInput {
    RallyInput::new(side, pos, action, ActionQuality::Good, result).at(1_700_000_000_000)
}

#[test]
fn test_rally_undo_redo_and_side_out() {
    let mut s = session();

    // Home serves and loses the rally: away sides out and rotates.
    let ev = s
        .record_rally(&rally(TeamSide::Home, Position::One, ActionType::Serve, ResultType::Error))
        .unwrap()
        .unwrap();
    assert_eq!(ev.player_number, "1");
    assert_eq!(s.current().serving_side, TeamSide::Away);
    assert_eq!(s.current().away_lineup.get(Position::One), "12");

    s.record_rally(&rally(TeamSide::Away, Position::Four, ActionType::Attack, ResultType::Point))
        .unwrap();
    assert_eq!((s.current().home_score, s.current().away_score), (0, 2));

    let after_two = s.current().clone();
    s.undo().unwrap();
    s.undo().unwrap();
    assert_eq!(s.undo().unwrap_err(), MatchError::NothingToUndo);
    assert_eq!(s.current().serving_side, TeamSide::Home);

    s.redo().unwrap();
    s.redo().unwrap();
    assert_eq!(s.current(), &after_two);
    assert!(!s.can_redo());
}

#[test]
fn test_rejections_leave_history_alone() {
    let mut s = session();
    let len = s.history().len();

    let dup = LineupEdit::Substitute { position: Position::One, incoming: "7".into(), recorded_at: 0 };
    assert!(matches!(
        s.edit_lineup(TeamSide::Home, &dup),
        Err(MatchError::DuplicateNumber { .. })
    ));
    let sub_as_rally = rally(TeamSide::Home, Position::One, ActionType::Substitution, ResultType::Normal);
    assert!(s.record_rally(&sub_as_rally).is_err());
    assert_eq!(s.history().len(), len);

    // Jersey 11 is only used by the opponent.
    let ok = LineupEdit::Substitute { position: Position::One, incoming: "11".into(), recorded_at: 0 };
    let ev = s.edit_lineup(TeamSide::Home, &ok).unwrap().unwrap();
    assert_eq!(ev.note, "Sub (Home): #1 -> #11");
    assert_eq!(s.history().len(), len + 1);
}

#[test]
fn test_stats_span_sets() {
    let mut s = session();
    for result in [ResultType::Point, ResultType::Point, ResultType::Error] {
        s.record_rally(&rally(TeamSide::Home, Position::Two, ActionType::Attack, result)).unwrap();
    }
    s.start_new_set();
    assert_eq!((s.current().home_set_wins, s.current().away_set_wins), (1, 0));

    let pos = s.current().home_lineup.position_of("7").unwrap();
    s.record_rally(&rally(TeamSide::Home, pos, ActionType::Block, ResultType::Point)).unwrap();

    let seven = s.stats(&StatFilter::player(TeamSide::Home, "7"));
    assert_eq!(seven.attack_total, 3);
    assert_eq!(seven.attack_kills, 2);
    assert_eq!(seven.attack_success_percent(), 67);
    assert_eq!(seven.blocks, 1);

    let ranking = s.ranking(TeamSide::Home);
    assert_eq!(ranking[0].number, "7");
    assert_eq!(ranking[0].points, 3);
    assert_eq!(ranking[0].highlight, Some(Highlight::Top1));

    let csv = String::from_utf8(s.export_csv(&ExportOptions::default()).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn test_save_and_load_through_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut repo = DirectoryRepository::new(dir.path());

    let mut s = session();
    s.record_rally(&rally(TeamSide::Home, Position::Three, ActionType::Attack, ResultType::Point))
        .unwrap();
    s.record_rally(&rally(TeamSide::Away, Position::Three, ActionType::Dig, ResultType::Normal))
        .unwrap();
    s.start_new_set();
    s.save_to(&mut repo, "r3").unwrap();

    let mut restored = session();
    restored.load_from(&repo, "r3").unwrap();
    assert_eq!(restored.current(), s.current());
    assert_eq!(restored.config(), s.config());
    assert_eq!(restored.history().len(), 1);
    assert!(!restored.can_undo());

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].label, "League R3");
}

#[test]
fn test_failed_save_and_load_keep_session() {
    let mut s = session();
    s.record_rally(&rally(TeamSide::Home, Position::Three, ActionType::Attack, ResultType::Point))
        .unwrap();
    let before = s.current().clone();

    let mut full = MemoryRepository::with_quota(16);
    let err = s.save_to(&mut full, "x").unwrap_err();
    assert!(matches!(err, SaveError::StorageUnavailable(_)));
    assert_eq!(s.current(), &before);

    let mut repo = MemoryRepository::new();
    repo.insert_raw("broken", "{\"formatVersion\": 9}");
    assert!(matches!(s.load_from(&repo, "broken"), Err(SaveError::MalformedSnapshot(_))));
    assert!(matches!(s.load_from(&repo, "missing"), Err(SaveError::NotFound { .. })));

    // A score with no events behind it would overflow on the next rally.
    let mut forged = serde_json::to_value(session().snapshot(0)).unwrap();
    forged["state"]["homeScore"] = serde_json::json!(u32::MAX);
    repo.insert_raw("forged", &forged.to_string());
    assert!(matches!(s.load_from(&repo, "forged"), Err(SaveError::MalformedSnapshot(_))));
    assert_eq!(s.current(), &before);
    assert!(s.can_undo());
}

#[test]
fn test_snapshot_roundtrip_via_json() {
    let mut s = session();
    s.record_rally(&rally(TeamSide::Away, Position::Five, ActionType::Serve, ResultType::Point))
        .unwrap();
    let text = s.snapshot(99).to_json_pretty().unwrap();
    let back = MatchSession::from_snapshot(MatchSnapshot::from_json(&text).unwrap()).unwrap();
    assert_eq!(back.current(), s.current());
    assert_eq!(back.history().len(), 1);
}

#[test]
fn test_history_limit_from_config() {
    let home = Lineup::new(["1", "2", "3", "4", "5", "6"]).unwrap();
    let away = Lineup::new(["11", "12", "13", "14", "15", "16"]).unwrap();
    let mut s = MatchSession::with_history_config(
        MatchConfig::new("A", "B"),
        MatchState::new(home, away, TeamSide::Home),
        &HistoryConfig { max_entries: Some(2) },
    );
    for _ in 0..4 {
        s.record_rally(&rally(TeamSide::Home, Position::One, ActionType::Serve, ResultType::Point))
            .unwrap();
    }
    s.undo().unwrap();
    assert!(s.undo().is_err());
    assert_eq!(s.current().home_score, 3);
    assert_eq!(LabelSet::english().header.len(), LabelSet::COLUMN_COUNT);
}
