//! Prioritized next-card selection.
//!
//! Priority is lexicographic across levels, never a weighted blend: a
//! single candidate at a higher level always wins over any number of
//! lower-level candidates.

use crate::types::{PriorityConfig, PriorityLevel, ProgressEntry, Rating, ReviewCategory};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick the next card to show, or `None` when nothing is left to review.
///
/// `progress` is the learner's full progress snapshot, `new_pool` holds ids
/// of cards with no progress record. Levels are scanned highest first;
/// within a level, due cards are checked before new cards. Among due
/// matches the most overdue wins, ties broken by card id; a new card is
/// drawn uniformly at random.
pub fn select_next<R: Rng>(
    progress: &[ProgressEntry],
    new_pool: &[i64],
    config: &PriorityConfig,
    exclude: Option<i64>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<i64> {
    for (_, categories) in scan_order(config) {
        let ratings: Vec<Rating> = categories
            .iter()
            .filter_map(|category| match category {
                ReviewCategory::Rated(rating) => Some(*rating),
                ReviewCategory::New => None,
            })
            .collect();

        if !ratings.is_empty() {
            if let Some(card_id) = most_overdue(progress, &ratings, exclude, now) {
                return Some(card_id);
            }
        }

        if categories.contains(&ReviewCategory::New) {
            if let Some(card_id) = random_new_card(new_pool, exclude, rng) {
                return Some(card_id);
            }
        }
    }
    None
}

/// Group categories by configured level, dropping `off`, highest first.
fn scan_order(config: &PriorityConfig) -> Vec<(PriorityLevel, Vec<ReviewCategory>)> {
    let mut groups: Vec<(PriorityLevel, Vec<ReviewCategory>)> = Vec::new();
    for (category, level) in config.categories() {
        if level == PriorityLevel::Off {
            continue;
        }
        match groups.iter_mut().find(|(grouped, _)| *grouped == level) {
            Some((_, categories)) => categories.push(category),
            None => groups.push((level, vec![category])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

/// Earliest-due entry whose last rating matches, skipping suspended cards
/// and the excluded id.
fn most_overdue(
    progress: &[ProgressEntry],
    ratings: &[Rating],
    exclude: Option<i64>,
    now: DateTime<Utc>,
) -> Option<i64> {
    progress
        .iter()
        .filter(|entry| exclude != Some(entry.card_id))
        .filter(|entry| !entry.state.suspended)
        .filter(|entry| {
            entry
                .state
                .last_rating
                .map_or(false, |rating| ratings.contains(&rating))
        })
        .filter(|entry| entry.state.is_due(now))
        .min_by_key(|entry| (entry.state.next_review, entry.card_id))
        .map(|entry| entry.card_id)
}

/// Uniform random draw from the unseen pool.
fn random_new_card<R: Rng>(new_pool: &[i64], exclude: Option<i64>, rng: &mut R) -> Option<i64> {
    let candidates: Vec<i64> = new_pool
        .iter()
        .copied()
        .filter(|&card_id| exclude != Some(card_id))
        .collect();
    candidates.choose(rng).copied()
}
