//! History aggregates: streak, rolling average, best day, calendar buckets.
//!
//! All functions filter to validated entries themselves, so callers can pass
//! raw range-query results. "Today" is always an explicit anchor computed
//! once by the caller, never re-read from the clock mid-walk.

use crate::model::entry::DailyEntry;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Minimum score for a day to keep a streak alive.
pub const STREAK_TARGET_SCORE: u8 = 70;

/// Window size for the rolling average.
const ROLLING_WINDOW_DAYS: usize = 7;

/// Counts consecutive days ending at `today` whose validated entry scores at
/// least [`STREAK_TARGET_SCORE`].
///
/// The walk starts at `today` and steps one calendar day backward at a time.
/// A missing entry, an unvalidated entry or a sub-target score stops the
/// walk; a streak of 0 means today itself fails.
pub fn streak(entries: &[DailyEntry], today: NaiveDate) -> u32 {
    let scores_by_date: HashMap<NaiveDate, u8> = entries
        .iter()
        .filter(|entry| entry.validated)
        .map(|entry| (entry.date, entry.score))
        .collect();

    let mut count = 0;
    let mut day = today;

    loop {
        match scores_by_date.get(&day) {
            Some(score) if *score >= STREAK_TARGET_SCORE => count += 1,
            _ => break,
        }
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    count
}

/// Mean score of the `<= 7` most recent validated entries, rounded half-up.
/// Returns 0 when the window holds no validated entries.
pub fn rolling_average(entries: &[DailyEntry]) -> u8 {
    let mut validated: Vec<&DailyEntry> =
        entries.iter().filter(|entry| entry.validated).collect();
    validated.sort_by_key(|entry| entry.date);

    let window_start = validated.len().saturating_sub(ROLLING_WINDOW_DAYS);
    let window = &validated[window_start..];
    if window.is_empty() {
        return 0;
    }

    let sum: u64 = window.iter().map(|entry| u64::from(entry.score)).sum();
    let len = window.len() as u64;
    ((2 * sum + len) / (2 * len)) as u8
}

/// Validated entry with the highest score; first occurrence in iteration
/// order wins ties. `None` when nothing is validated.
pub fn best_day(entries: &[DailyEntry]) -> Option<&DailyEntry> {
    entries
        .iter()
        .filter(|entry| entry.validated)
        .fold(None, |best: Option<&DailyEntry>, entry| match best {
            Some(current) if entry.score > current.score => Some(entry),
            Some(current) => Some(current),
            None => Some(entry),
        })
}

/// One `(date, score)` bucket per day in the inclusive window: the validated
/// entry's score, or 0 when the day has none.
pub fn calendar_scores(
    entries: &[DailyEntry],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(NaiveDate, u8)> {
    let scores_by_date: HashMap<NaiveDate, u8> = entries
        .iter()
        .filter(|entry| entry.validated)
        .map(|entry| (entry.date, entry.score))
        .collect();

    let mut buckets = Vec::new();
    let mut day = start;
    while day <= end {
        buckets.push((day, scores_by_date.get(&day).copied().unwrap_or(0)));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    buckets
}
