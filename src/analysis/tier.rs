use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal severity derived from a keyword-hit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    pub fn at_least(self, floor: Tier) -> bool {
        self >= floor
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const DEFAULT_LOW_HITS: u32 = 1;
pub const DEFAULT_MEDIUM_HITS: u32 = 2;
pub const DEFAULT_HIGH_HITS: u32 = 3;
pub const DEFAULT_VERY_HIGH_HITS: u32 = 5;

/// Minimum hit count for each tier. Must be non-decreasing from `low` to `very_high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub very_high: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_HITS,
            medium: DEFAULT_MEDIUM_HITS,
            high: DEFAULT_HIGH_HITS,
            very_high: DEFAULT_VERY_HIGH_HITS,
        }
    }
}

impl TierThresholds {
    pub fn is_monotonic(&self) -> bool {
        self.low <= self.medium && self.medium <= self.high && self.high <= self.very_high
    }

    pub fn tier_for(&self, hits: u32) -> Tier {
        if hits >= self.very_high {
            Tier::VeryHigh
        } else if hits >= self.high {
            Tier::High
        } else if hits >= self.medium {
            Tier::Medium
        } else if hits >= self.low {
            Tier::Low
        } else {
            Tier::None
        }
    }
}
