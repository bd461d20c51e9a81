//! Core spaced-repetition scheduling library.
//!
//! Provides:
//! - Memory-state updater: per-review stability/difficulty/interval
//!   computation (simplified DSR model)
//! - Prioritized next-card selection over a progress snapshot
//! - Suspension toggle and snapshot query helpers
//! - Shared types (MemoryState, Rating, PriorityConfig, etc.)
//!
//! Everything here is pure and synchronous: the caller loads snapshots from
//! storage, passes an explicit `now`, and persists the results. Storage,
//! identity, and transport live in the service layer.

pub mod browse;
pub mod error;
pub mod scheduler;
pub mod selector;
pub mod types;

pub use browse::{due_entries, entries_by_rating, reviews_since};
pub use error::{CoreError, Result};
pub use scheduler::{toggle_suspend, ReviewOutcome, Scheduler, SchedulingUpdate};
pub use selector::select_next;
pub use types::{
    MemoryState, PriorityConfig, PriorityLevel, ProgressEntry, Rating, ReviewCategory,
};
