//! Daily entry lifecycle service.
//!
//! # Responsibility
//! - Own the Absent -> Draft -> Validated state machine for one date.
//! - Recompute the weighted score on every persisted write.
//!
//! # Invariants
//! - A validated entry is frozen: toggle/note/validate calls for that date
//!   are rejected and stored fields never change.
//! - `score` is re-derived from the current goal set on every write, never
//!   taken from caller input.
//! - Validation is one-way; there is no unvalidate operation.

use crate::model::entry::DailyEntry;
use crate::repo::entry_repo::EntryRepository;
use crate::repo::goal_repo::{GoalRepository, RepoError, RepoResult};
use crate::scoring::weighted_score;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DayResult<T> = Result<T, DayError>;

/// Lifecycle error for daily entry writes.
#[derive(Debug)]
pub enum DayError {
    /// The entry for this date is validated and frozen.
    AlreadyValidated(NaiveDate),
    Repo(RepoError),
}

impl Display for DayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyValidated(date) => {
                write!(f, "entry for {date} is validated and can no longer change")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AlreadyValidated(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for DayError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for one day's checklist state.
pub struct DayService<G: GoalRepository, E: EntryRepository> {
    goals: G,
    entries: E,
}

impl<G: GoalRepository, E: EntryRepository> DayService<G, E> {
    pub fn new(goals: G, entries: E) -> Self {
        Self { goals, entries }
    }

    /// Returns the stored entry for `date`, or an unpersisted virtual draft
    /// when none exists yet. Loading never writes.
    pub fn load_day(&self, date: NaiveDate) -> RepoResult<DailyEntry> {
        Ok(self
            .entries
            .get_entry(date)?
            .unwrap_or_else(|| DailyEntry::draft(date)))
    }

    /// Flips completion of `goal_id` for `date`, recomputes the score and
    /// persists the draft. First write on an absent date creates the row.
    ///
    /// # Errors
    /// - `AlreadyValidated` when the date is frozen.
    pub fn toggle_completion(&self, date: NaiveDate, goal_id: &str) -> DayResult<DailyEntry> {
        let mut entry = self.writable_entry(date)?;

        if !entry.completed_goal_ids.remove(goal_id) {
            entry.completed_goal_ids.insert(goal_id.to_string());
        }

        self.persist_with_fresh_score(entry)
    }

    /// Replaces the note for `date` and persists. The score is re-derived
    /// but unchanged by note content.
    ///
    /// # Errors
    /// - `AlreadyValidated` when the date is frozen.
    pub fn set_note(&self, date: NaiveDate, note: impl Into<String>) -> DayResult<DailyEntry> {
        let mut entry = self.writable_entry(date)?;
        entry.note = note.into();
        self.persist_with_fresh_score(entry)
    }

    /// Recomputes the score one final time, marks the entry validated and
    /// persists. The transition is terminal for that date.
    ///
    /// # Errors
    /// - `AlreadyValidated` when the date was validated before.
    pub fn validate_day(&self, date: NaiveDate) -> DayResult<DailyEntry> {
        let mut entry = self.writable_entry(date)?;
        entry.validated = true;
        let entry = self.persist_with_fresh_score(entry)?;

        info!(
            "event=day_validated module=service status=ok date={} score={} completed={}",
            entry.date_key(),
            entry.score,
            entry.completed_goal_ids.len()
        );

        Ok(entry)
    }

    fn writable_entry(&self, date: NaiveDate) -> DayResult<DailyEntry> {
        let entry = self.load_day(date)?;
        if entry.validated {
            return Err(DayError::AlreadyValidated(date));
        }
        Ok(entry)
    }

    fn persist_with_fresh_score(&self, mut entry: DailyEntry) -> DayResult<DailyEntry> {
        let goals = self.goals.list_daily_goals()?;
        entry.score = weighted_score(&goals, &entry.completed_goal_ids);
        self.entries.put_entry(&entry)?;
        Ok(entry)
    }
}
