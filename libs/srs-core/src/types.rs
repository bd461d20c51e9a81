//! Core types for the spaced-repetition engine.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rating for a review, ordered worst to best recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// All ratings, worst first.
    pub const ALL: [Rating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(CoreError::InvalidRating(value))
    }
}

/// Per-learner, per-card memory state.
///
/// Absent entirely while a card is still "new"; created on first review or
/// first suspension. The zero-valued `Default` is the suspend-created form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    /// Resistance to forgetting; at least 0.1 once reviewed.
    pub stability: f64,
    /// Intrinsic hardness in [0.1, 1.0] once reviewed.
    pub difficulty: f64,
    pub review_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_rating: Option<Rating>,
    /// Append-only, oldest first. Always the same length as `review_count`.
    pub rating_history: Vec<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    pub suspended: bool,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            stability: 0.0,
            difficulty: 0.0,
            review_count: 0,
            last_rating: None,
            rating_history: Vec::new(),
            last_reviewed: None,
            next_review: None,
            suspended: false,
        }
    }
}

impl MemoryState {
    /// Whether the card is due for review.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map_or(false, |due| due <= now)
    }
}

/// A learner's progress snapshot row: one reviewed (or suspended) card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub card_id: i64,
    pub state: MemoryState,
}

/// Priority bucket for a selection category, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Off,
    Low,
    Normal,
    High,
    Highest,
}

impl PriorityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Highest => "highest",
        }
    }
}

impl FromStr for PriorityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "highest" => Ok(Self::Highest),
            other => Err(CoreError::InvalidPriorityLevel(other.to_string())),
        }
    }
}

/// One of the five selectable categories: unseen cards, or cards whose last
/// review got a particular rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCategory {
    New,
    Rated(Rating),
}

/// Priority level per selection category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityConfig {
    pub new: PriorityLevel,
    pub again: PriorityLevel,
    pub hard: PriorityLevel,
    pub good: PriorityLevel,
    pub easy: PriorityLevel,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            new: PriorityLevel::Normal,
            again: PriorityLevel::Highest,
            hard: PriorityLevel::High,
            good: PriorityLevel::Normal,
            easy: PriorityLevel::Low,
        }
    }
}

impl PriorityConfig {
    /// All categories with their configured levels.
    pub fn categories(&self) -> [(ReviewCategory, PriorityLevel); 5] {
        [
            (ReviewCategory::New, self.new),
            (ReviewCategory::Rated(Rating::Again), self.again),
            (ReviewCategory::Rated(Rating::Hard), self.hard),
            (ReviewCategory::Rated(Rating::Good), self.good),
            (ReviewCategory::Rated(Rating::Easy), self.easy),
        ]
    }
}
