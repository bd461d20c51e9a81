//! Read-only queries over a learner's progress snapshot.
//!
//! Pure helpers the service layer uses to build review lists and counters;
//! none of them mutate state or touch the clock.

use crate::types::{ProgressEntry, Rating};
use chrono::{DateTime, Utc};

/// Due entries, most overdue first, capped at `limit`.
///
/// Suspended cards are excluded, consistent with the selector's due path.
pub fn due_entries(
    progress: &[ProgressEntry],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&ProgressEntry> {
    let mut due: Vec<&ProgressEntry> = progress
        .iter()
        .filter(|entry| !entry.state.suspended)
        .filter(|entry| entry.state.last_rating.is_some())
        .filter(|entry| entry.state.is_due(now))
        .collect();
    due.sort_by_key(|entry| (entry.state.next_review, entry.card_id));
    due.truncate(limit);
    due
}

/// Entries matching a rating, capped at `limit`.
///
/// With `match_history` false, matches the last rating only and orders by
/// due date ascending (unscheduled entries last). With it true, matches the
/// rating anywhere in the history and orders by most recently reviewed
/// first (never-reviewed entries last).
pub fn entries_by_rating(
    progress: &[ProgressEntry],
    rating: Rating,
    match_history: bool,
    exclude: Option<i64>,
    limit: usize,
) -> Vec<&ProgressEntry> {
    let mut matches: Vec<&ProgressEntry> = progress
        .iter()
        .filter(|entry| exclude != Some(entry.card_id))
        .filter(|entry| {
            if match_history {
                entry.state.rating_history.contains(&rating)
            } else {
                entry.state.last_rating == Some(rating)
            }
        })
        .collect();

    if match_history {
        matches.sort_by(|a, b| b.state.last_reviewed.cmp(&a.state.last_reviewed));
    } else {
        matches.sort_by_key(|entry| {
            (
                entry.state.next_review.is_none(),
                entry.state.next_review,
                entry.card_id,
            )
        });
    }
    matches.truncate(limit);
    matches
}

/// Number of entries reviewed at or after `since`.
///
/// The caller supplies the cutoff (typically start of the current day) so
/// the count stays a pure snapshot query.
pub fn reviews_since(progress: &[ProgressEntry], since: DateTime<Utc>) -> usize {
    progress
        .iter()
        .filter(|entry| {
            entry
                .state
                .last_reviewed
                .map_or(false, |reviewed| reviewed >= since)
        })
        .count()
}
