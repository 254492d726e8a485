//! Daily entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide point and range access to `daily_entries` keyed by ISO date.
//! - Own the JSON codec for the persisted completed-goal-id set.
//!
//! # Invariants
//! - At most one row per calendar date (date is the primary key).
//! - `put_entry` is insert-or-replace; the lifecycle service owns the
//!   draft/validated write guards.
//! - Range bounds are inclusive; lexicographic comparison is valid because
//!   dates are zero-padded ISO strings.

use crate::model::entry::DailyEntry;
use crate::repo::goal_repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeSet;

const ENTRY_SELECT_SQL: &str =
    "SELECT date, completed_goal_ids, score, note, validated FROM daily_entries";

/// Repository interface for daily entry persistence.
pub trait EntryRepository {
    /// Point lookup by calendar date.
    fn get_entry(&self, date: NaiveDate) -> RepoResult<Option<DailyEntry>>;
    /// Insert-or-replace by date.
    fn put_entry(&self, entry: &DailyEntry) -> RepoResult<()>;
    /// All entries with `start <= date <= end`, ordered by date ascending.
    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<DailyEntry>>;
}

/// SQLite-backed daily entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn get_entry(&self, date: NaiveDate) -> RepoResult<Option<DailyEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE date = ?1;"))?;

        let mut rows = stmt.query([iso_date(date)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn put_entry(&self, entry: &DailyEntry) -> RepoResult<()> {
        let completed = serde_json::to_string(&entry.completed_goal_ids).map_err(|err| {
            RepoError::InvalidData(format!("cannot encode completed goal ids: {err}"))
        })?;

        self.conn.execute(
            "INSERT INTO daily_entries (date, completed_goal_ids, score, note, validated)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                completed_goal_ids = excluded.completed_goal_ids,
                score = excluded.score,
                note = excluded.note,
                validated = excluded.validated;",
            params![
                entry.date_key(),
                completed,
                entry.score,
                entry.note,
                bool_to_int(entry.validated)
            ],
        )?;

        Ok(())
    }

    fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<DailyEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL} WHERE date >= ?1 AND date <= ?2 ORDER BY date ASC;"
        ))?;

        let mut rows = stmt.query(params![iso_date(start), iso_date(end)])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<DailyEntry> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in daily_entries.date"
        ))
    })?;

    let completed_text: String = row.get("completed_goal_ids")?;
    let completed_goal_ids: BTreeSet<String> =
        serde_json::from_str(&completed_text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid completed goal id set `{completed_text}` in daily_entries.completed_goal_ids"
            ))
        })?;

    let score: i64 = row.get("score")?;
    let score = u8::try_from(score).ok().filter(|value| *value <= 100).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid score value `{score}` in daily_entries.score"))
    })?;

    let validated = match row.get::<_, i64>("validated")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid validated value `{other}` in daily_entries.validated"
            )));
        }
    };

    Ok(DailyEntry {
        date,
        completed_goal_ids,
        score,
        note: row.get("note")?,
        validated,
    })
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
