//! Memory-state update algorithm.
//!
//! Simplified DSR-style model:
//! - Difficulty (D): intrinsic hardness, bounded [0.1, 1.0]
//! - Stability (S): resistance to forgetting, at least 0.1
//! - Retrievability (R): target recall probability, an interval-formula
//!   input only, never persisted

use crate::types::{MemoryState, Rating};
use chrono::{DateTime, Duration, Utc};

/// Scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Stability assumed for a card's first-ever review.
    pub initial_stability: f64,
    /// Difficulty assumed for a card's first-ever review.
    pub initial_difficulty: f64,
    /// How strongly a rating moves difficulty.
    pub difficulty_step: f64,
    /// Stability growth factor for successful recall.
    pub stability_gain: f64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            initial_stability: 0.4,
            initial_difficulty: 0.6,
            difficulty_step: 0.1,
            stability_gain: 0.2,
        }
    }
}

/// Result of the pure per-review state update.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingUpdate {
    pub stability: f64,
    pub difficulty: f64,
    pub interval_days: f64,
}

/// Result of applying a review to a memory state.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub new_state: MemoryState,
    pub next_due: DateTime<Utc>,
    pub interval_days: f64,
}

impl Scheduler {
    /// Compute new stability, difficulty, and review interval from the
    /// current values and a rating.
    ///
    /// Total over all four ratings: every input yields a finite, positive
    /// interval. The review count does not participate in the computation.
    pub fn update(&self, stability: f64, difficulty: f64, rating: Rating) -> SchedulingUpdate {
        // Worse ratings push difficulty up, better ratings pull it down;
        // the (1 - D) factor shrinks the change near the ceiling.
        let delta = 3.5 - f64::from(rating.to_value());
        let new_difficulty =
            (difficulty + self.difficulty_step * delta * (1.0 - difficulty)).clamp(0.1, 1.0);

        // Stability gain is computed against the post-update difficulty.
        let (multiplier, retrievability) = match rating {
            Rating::Again => (0.5, 0.0),
            Rating::Hard => (1.0, 0.4),
            Rating::Good => (1.0 + self.stability_gain * (1.0 - new_difficulty), 0.8),
            Rating::Easy => (1.0 + 1.5 * self.stability_gain * (1.0 - new_difficulty), 1.0),
        };
        let new_stability = (stability * multiplier).max(0.1);

        let interval_days = Self::interval_days(new_stability, retrievability, rating);

        SchedulingUpdate {
            stability: new_stability,
            difficulty: new_difficulty,
            interval_days,
        }
    }

    /// Apply a review to a (possibly absent) memory state.
    ///
    /// `None` means the card has never been tracked; scheduling then starts
    /// from the initial stability/difficulty. A state created by suspension
    /// still carries its stored zero values, matching record-existence
    /// semantics at the storage boundary. Reviewing always clears
    /// suspension.
    pub fn review(
        &self,
        current: Option<&MemoryState>,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> ReviewOutcome {
        let (stability, difficulty) = match current {
            Some(state) => (state.stability, state.difficulty),
            None => (self.initial_stability, self.initial_difficulty),
        };

        let update = self.update(stability, difficulty, rating);
        let next_due = now + Duration::seconds((update.interval_days * 86400.0) as i64);

        // Derive the appended history rather than mutating the old one.
        let mut rating_history = current.map(|s| s.rating_history.clone()).unwrap_or_default();
        rating_history.push(rating);

        let new_state = MemoryState {
            stability: update.stability,
            difficulty: update.difficulty,
            review_count: current.map_or(0, |s| s.review_count) + 1,
            last_rating: Some(rating),
            rating_history,
            last_reviewed: Some(now),
            next_review: Some(next_due),
            suspended: false,
        };

        ReviewOutcome {
            new_state,
            next_due,
            interval_days: update.interval_days,
        }
    }

    /// Next review interval in days, from the post-update stability.
    ///
    /// The natural formula `S * ln(0.9) / ln(R)` is singular at R = 1.0 and
    /// unstable near 0, so Again and Easy take dedicated paths.
    fn interval_days(stability: f64, retrievability: f64, rating: Rating) -> f64 {
        match rating {
            // Always very short; the log formula is bypassed entirely.
            Rating::Again => (stability * 0.1).max(0.01),
            // Strictly later than the equivalent Good review, sidestepping
            // ln(1.0).
            Rating::Easy => {
                let good_reference = stability * 0.9_f64.ln() / 0.8_f64.ln();
                (good_reference + 1.0).max(1.0)
            }
            Rating::Hard | Rating::Good => {
                let safe_retrievability = retrievability.max(0.01);
                let base = stability * 0.9_f64.ln() / safe_retrievability.ln();
                base.max(0.1)
            }
        }
    }
}

/// Toggle a card's suspension.
///
/// With no existing state, creates a zero-valued one that is suspended
/// ("tracked but unreviewed"). Otherwise flips the flag and leaves
/// stability, difficulty, and history untouched.
pub fn toggle_suspend(existing: Option<&MemoryState>) -> MemoryState {
    match existing {
        Some(state) => MemoryState {
            suspended: !state.suspended,
            ..state.clone()
        },
        None => MemoryState {
            suspended: true,
            ..MemoryState::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn again_halves_stability_and_schedules_soon() {
        let scheduler = Scheduler::default();
        let update = scheduler.update(0.4, 0.6, Rating::Again);

        assert!((update.stability - 0.2).abs() < 1e-9);
        assert!((update.difficulty - 0.7).abs() < 1e-9);
        assert!((update.interval_days - 0.02).abs() < 1e-9);
    }

    #[test]
    fn bounds_hold_for_all_ratings() {
        let scheduler = Scheduler::default();
        for rating in Rating::ALL {
            for &stability in &[0.1, 0.4, 5.0, 100.0] {
                for &difficulty in &[0.1, 0.5, 1.0] {
                    let update = scheduler.update(stability, difficulty, rating);
                    assert!(update.stability >= 0.1);
                    assert!((0.1..=1.0).contains(&update.difficulty));
                    assert!(update.interval_days > 0.0);
                    assert!(update.interval_days.is_finite());
                }
            }
        }
    }

    #[test]
    fn again_never_schedules_later_than_hard() {
        let scheduler = Scheduler::default();
        for &stability in &[0.1, 1.0, 10.0] {
            for &difficulty in &[0.1, 0.6, 1.0] {
                let again = scheduler.update(stability, difficulty, Rating::Again);
                let hard = scheduler.update(stability, difficulty, Rating::Hard);
                assert!(again.interval_days <= hard.interval_days);
            }
        }
    }

    #[test]
    fn easy_schedules_strictly_later_than_good() {
        let scheduler = Scheduler::default();
        for &stability in &[0.1, 0.4, 3.0, 50.0] {
            for &difficulty in &[0.1, 0.6, 1.0] {
                let good = scheduler.update(stability, difficulty, Rating::Good);
                let easy = scheduler.update(stability, difficulty, Rating::Easy);
                assert!(easy.interval_days > good.interval_days);
            }
        }
    }

    #[test]
    fn difficulty_moves_with_rating_direction() {
        let scheduler = Scheduler::default();
        let harder = scheduler.update(1.0, 0.5, Rating::Again);
        let easier = scheduler.update(1.0, 0.5, Rating::Easy);
        assert!(harder.difficulty > 0.5);
        assert!(easier.difficulty < 0.5);
    }

    #[test]
    fn repeated_easy_reviews_push_due_dates_forward() {
        let scheduler = Scheduler::default();
        let mut state: Option<MemoryState> = None;
        let mut clock = now();
        let mut previous_due: Option<DateTime<Utc>> = None;

        for _ in 0..10 {
            let outcome = scheduler.review(state.as_ref(), Rating::Easy, clock);
            if let Some(previous) = previous_due {
                assert!(outcome.next_due > previous);
            }
            previous_due = Some(outcome.next_due);
            clock = outcome.next_due;
            state = Some(outcome.new_state);
        }

        // Stability grows monotonically under repeated success.
        assert!(state.unwrap().stability > Scheduler::default().initial_stability);
    }

    #[test]
    fn first_review_starts_from_initial_parameters() {
        let scheduler = Scheduler::default();
        let outcome = scheduler.review(None, Rating::Again, now());

        // Same result as updating the initial (0.4, 0.6) pair directly.
        assert!((outcome.new_state.stability - 0.2).abs() < 1e-9);
        assert!((outcome.new_state.difficulty - 0.7).abs() < 1e-9);
        assert_eq!(outcome.new_state.review_count, 1);
        assert_eq!(outcome.new_state.rating_history, vec![Rating::Again]);
        assert_eq!(outcome.new_state.last_rating, Some(Rating::Again));
    }

    #[test]
    fn review_appends_history_and_increments_count() {
        let scheduler = Scheduler::default();
        let current_time = now();
        let first = scheduler.review(None, Rating::Good, current_time);
        let second = scheduler.review(Some(&first.new_state), Rating::Hard, current_time);

        assert_eq!(second.new_state.review_count, 2);
        assert_eq!(
            second.new_state.rating_history,
            vec![Rating::Good, Rating::Hard]
        );
        assert_eq!(
            second.new_state.rating_history.len() as u32,
            second.new_state.review_count
        );
        assert_eq!(
            second.new_state.rating_history.last().copied(),
            second.new_state.last_rating
        );
    }

    #[test]
    fn review_clears_suspension() {
        let scheduler = Scheduler::default();
        let suspended = toggle_suspend(None);
        assert!(suspended.suspended);

        let outcome = scheduler.review(Some(&suspended), Rating::Good, now());
        assert!(!outcome.new_state.suspended);
    }

    #[test]
    fn review_of_suspend_created_state_uses_stored_zeros() {
        let scheduler = Scheduler::default();
        let suspended = toggle_suspend(None);
        let outcome = scheduler.review(Some(&suspended), Rating::Good, now());

        // Stability rises from 0.0 to the floor, not from the initial 0.4.
        assert!((outcome.new_state.stability - 0.1).abs() < 1e-9);
    }

    #[test]
    fn next_due_reflects_interval() {
        let scheduler = Scheduler::default();
        let current_time = now();
        let outcome = scheduler.review(None, Rating::Good, current_time);

        let expected =
            current_time + Duration::seconds((outcome.interval_days * 86400.0) as i64);
        assert_eq!(outcome.next_due, expected);
        assert!(outcome.next_due > current_time);
    }

    #[test]
    fn toggle_suspend_without_state_creates_suspended_default() {
        let state = toggle_suspend(None);
        assert!(state.suspended);
        assert_eq!(state.stability, 0.0);
        assert_eq!(state.difficulty, 0.0);
        assert_eq!(state.review_count, 0);
        assert!(state.rating_history.is_empty());
        assert_eq!(state.next_review, None);
    }

    #[test]
    fn toggle_suspend_flips_existing_state_only() {
        let scheduler = Scheduler::default();
        let reviewed = scheduler.review(None, Rating::Good, now()).new_state;

        let suspended = toggle_suspend(Some(&reviewed));
        assert!(suspended.suspended);
        assert_eq!(suspended.stability, reviewed.stability);
        assert_eq!(suspended.rating_history, reviewed.rating_history);

        let unsuspended = toggle_suspend(Some(&suspended));
        assert_eq!(unsuspended, reviewed);
    }
}
