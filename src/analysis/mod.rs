//! Composition analysis of the opposing roster.

pub mod classifier;
pub mod composition;
pub mod tier;

use serde::{Deserialize, Serialize};

pub use classifier::{AbilityHits, KeywordClassifier, SignalClassifier};
pub use composition::{
    analyze_composition, CompositionAnalyzer, CompositionSignals, DamageLean, DamageMix,
    ThreatLevel,
};
pub use tier::{Tier, TierThresholds};

use classifier::{DEFAULT_CROWD_CONTROL_KEYWORDS, DEFAULT_SUSTAIN_KEYWORDS};

/// Entities with toughness strictly above this count as tanks even without the tag.
pub const DEFAULT_TANK_TOUGHNESS_THRESHOLD: u32 = 7;
/// Decimal places kept on damage-mix ratios.
pub const DEFAULT_RATIO_PRECISION: u32 = 2;
const MAX_RATIO_PRECISION: u32 = 6;

/// Analyzer tuning. Every field has a named default; a YAML file may override any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub thresholds: TierThresholds,
    pub crowd_control_keywords: Vec<String>,
    pub sustain_keywords: Vec<String>,
    pub tank_toughness_threshold: u32,
    pub ratio_precision: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default(),
            crowd_control_keywords: DEFAULT_CROWD_CONTROL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            sustain_keywords: DEFAULT_SUSTAIN_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            tank_toughness_threshold: DEFAULT_TANK_TOUGHNESS_THRESHOLD,
            ratio_precision: DEFAULT_RATIO_PRECISION,
        }
    }
}

impl AnalyzerConfig {
    /// Problems that would make tiers non-monotonic or ratios meaningless.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.thresholds.is_monotonic() {
            issues.push(format!(
                "thresholds must be non-decreasing (low={}, medium={}, high={}, very_high={})",
                self.thresholds.low,
                self.thresholds.medium,
                self.thresholds.high,
                self.thresholds.very_high
            ));
        }
        if self.thresholds.low == 0 {
            issues.push("thresholds.low must be at least 1".to_string());
        }
        if self.ratio_precision > MAX_RATIO_PRECISION {
            issues.push(format!(
                "ratio_precision must be at most {MAX_RATIO_PRECISION}"
            ));
        }
        if self.crowd_control_keywords.iter().all(|k| k.trim().is_empty()) {
            issues.push("crowd_control_keywords must not be empty".to_string());
        }
        if self.sustain_keywords.iter().all(|k| k.trim().is_empty()) {
            issues.push("sustain_keywords must not be empty".to_string());
        }
        issues
    }
}
