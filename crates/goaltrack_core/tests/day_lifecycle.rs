use chrono::NaiveDate;
use goaltrack_core::db::open_db_in_memory;
use goaltrack_core::{
    DailyGoal, DayError, DayService, EntryRepository, FinalGoal, GoalRepository, Pillar,
    SqliteEntryRepository, SqliteGoalRepository,
};
use rusqlite::Connection;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

/// Replaces the seeded goals with the two-goal set from the scoring example:
/// A weighs 5, B weighs 3, total weight 8.
fn install_example_goals(conn: &Connection) {
    let repo = SqliteGoalRepository::new(conn);
    for goal in repo.list_final_goals().unwrap() {
        repo.delete_final_goal(&goal.id).unwrap();
    }

    repo.add_final_goal(&FinalGoal::with_id("fg", "example", 0))
        .unwrap();
    repo.add_daily_goal(&DailyGoal::with_id("a", "goal a", Pillar::Business, 5, "fg"))
        .unwrap();
    repo.add_daily_goal(&DailyGoal::with_id("b", "goal b", Pillar::Vision, 3, "fg"))
        .unwrap();
}

fn service(conn: &Connection) -> DayService<SqliteGoalRepository<'_>, SqliteEntryRepository<'_>> {
    DayService::new(
        SqliteGoalRepository::new(conn),
        SqliteEntryRepository::new(conn),
    )
}

#[test]
fn absent_date_loads_as_virtual_draft_without_persisting() {
    let conn = open_db_in_memory().unwrap();
    let days = service(&conn);

    let entry = days.load_day(date(1)).unwrap();
    assert!(entry.completed_goal_ids.is_empty());
    assert_eq!(entry.score, 0);
    assert_eq!(entry.note, "");
    assert!(!entry.validated);

    // Loading alone must not create a row.
    let entries = SqliteEntryRepository::new(&conn);
    assert!(entries.get_entry(date(1)).unwrap().is_none());
}

#[test]
fn toggle_persists_draft_with_weighted_score() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    // 5 of 8 -> 62.5 -> 63.
    let entry = days.toggle_completion(date(1), "a").unwrap();
    assert!(entry.completed_goal_ids.contains("a"));
    assert_eq!(entry.score, 63);
    assert!(!entry.validated);

    let entry = days.toggle_completion(date(1), "b").unwrap();
    assert_eq!(entry.score, 100);

    let stored = SqliteEntryRepository::new(&conn)
        .get_entry(date(1))
        .unwrap()
        .unwrap();
    assert_eq!(stored, entry);
}

#[test]
fn double_toggle_restores_prior_state() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    let before = days.toggle_completion(date(1), "b").unwrap();
    days.toggle_completion(date(1), "a").unwrap();
    let after = days.toggle_completion(date(1), "a").unwrap();

    assert_eq!(after.completed_goal_ids, before.completed_goal_ids);
    assert_eq!(after.score, before.score);
}

#[test]
fn set_note_keeps_score_and_persists() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    days.toggle_completion(date(2), "a").unwrap();
    let entry = days.set_note(date(2), "solid day").unwrap();
    assert_eq!(entry.note, "solid day");
    assert_eq!(entry.score, 63);

    let stored = SqliteEntryRepository::new(&conn)
        .get_entry(date(2))
        .unwrap()
        .unwrap();
    assert_eq!(stored.note, "solid day");
    assert_eq!(stored.score, 63);
}

#[test]
fn set_note_on_absent_date_creates_draft_row() {
    let conn = open_db_in_memory().unwrap();
    let days = service(&conn);

    let entry = days.set_note(date(3), "early note").unwrap();
    assert_eq!(entry.note, "early note");
    assert!(!entry.validated);
    assert!(SqliteEntryRepository::new(&conn)
        .get_entry(date(3))
        .unwrap()
        .is_some());
}

#[test]
fn validate_freezes_the_day() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    days.toggle_completion(date(4), "a").unwrap();
    let validated = days.validate_day(date(4)).unwrap();
    assert!(validated.validated);
    assert_eq!(validated.score, 63);

    let toggle_err = days.toggle_completion(date(4), "b").unwrap_err();
    assert!(matches!(toggle_err, DayError::AlreadyValidated(when) if when == date(4)));

    let note_err = days.set_note(date(4), "late edit").unwrap_err();
    assert!(matches!(note_err, DayError::AlreadyValidated(_)));

    let revalidate_err = days.validate_day(date(4)).unwrap_err();
    assert!(matches!(revalidate_err, DayError::AlreadyValidated(_)));

    // Stored fields are exactly as frozen.
    let stored = SqliteEntryRepository::new(&conn)
        .get_entry(date(4))
        .unwrap()
        .unwrap();
    assert_eq!(stored, validated);
}

#[test]
fn validating_an_untouched_day_stores_score_zero() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    let entry = days.validate_day(date(5)).unwrap();
    assert!(entry.validated);
    assert_eq!(entry.score, 0);
    assert!(entry.completed_goal_ids.is_empty());
}

#[test]
fn later_weight_edits_do_not_rewrite_frozen_scores() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    days.toggle_completion(date(6), "a").unwrap();
    days.validate_day(date(6)).unwrap();

    // Reweighting "a" changes future scores only.
    let repo = SqliteGoalRepository::new(&conn);
    repo.update_daily_goal(&DailyGoal::with_id("a", "goal a", Pillar::Business, 1, "fg"))
        .unwrap();

    let stored = SqliteEntryRepository::new(&conn)
        .get_entry(date(6))
        .unwrap()
        .unwrap();
    assert_eq!(stored.score, 63);

    // A fresh day sees the new weights: 1 of 4 -> 25.
    let fresh = days.toggle_completion(date(7), "a").unwrap();
    assert_eq!(fresh.score, 25);
}

#[test]
fn toggling_unknown_goal_id_carries_no_weight() {
    let conn = open_db_in_memory().unwrap();
    install_example_goals(&conn);
    let days = service(&conn);

    let entry = days.toggle_completion(date(8), "ghost").unwrap();
    assert!(entry.completed_goal_ids.contains("ghost"));
    assert_eq!(entry.score, 0);
}

#[test]
fn empty_goal_set_always_scores_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGoalRepository::new(&conn);
    for goal in repo.list_final_goals().unwrap() {
        repo.delete_final_goal(&goal.id).unwrap();
    }

    let days = service(&conn);
    let entry = days.toggle_completion(date(9), "anything").unwrap();
    assert_eq!(entry.score, 0);

    let validated = days.validate_day(date(9)).unwrap();
    assert_eq!(validated.score, 0);
}
