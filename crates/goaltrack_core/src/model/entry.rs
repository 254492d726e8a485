//! Daily entry domain model.
//!
//! # Responsibility
//! - Define the per-date record holding completions, score and note.
//! - Provide the virtual-draft constructor used when no record exists yet.
//!
//! # Invariants
//! - `date` is the primary key; at most one entry per calendar date.
//! - `score` is always derived from the weighted-completion formula at write
//!   time and is never accepted as authoritative input.
//! - Once `validated` is set the record is frozen; the lifecycle service
//!   enforces this on every write path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One calendar day's checklist state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Calendar date, UTC-anchored. Stored as zero-padded ISO `YYYY-MM-DD`,
    /// which keeps lexicographic range scans correct.
    pub date: NaiveDate,
    /// Ids of daily goals checked off that day. Membership is all that
    /// matters; goals deleted later keep contributing nothing.
    pub completed_goal_ids: BTreeSet<String>,
    /// Derived weighted completion score in `[0, 100]`.
    pub score: u8,
    /// Free-form note for the day. Empty means no note.
    pub note: String,
    /// Draft entries are mutable; validated entries are frozen.
    pub validated: bool,
}

impl DailyEntry {
    /// Returns the unpersisted draft handed out when no record exists for
    /// `date` yet: nothing completed, score 0, empty note.
    pub fn draft(date: NaiveDate) -> Self {
        Self {
            date,
            completed_goal_ids: BTreeSet::new(),
            score: 0,
            note: String::new(),
            validated: false,
        }
    }

    /// ISO `YYYY-MM-DD` form of the entry date, the storage key.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
