//! Opposing-roster composition signals: damage mix, crowd-control and sustain
//! tiers, tank count and crit threat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{KeywordClassifier, SignalClassifier};
use crate::analysis::tier::Tier;
use crate::analysis::AnalyzerConfig;
use crate::data::catalog::Catalog;
use crate::data::champion::{EntityRecord, RoleTag};

/// Share of the resolved roster leaning physical vs special. Both in [0, 1], sum <= 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageMix {
    pub physical: f64,
    pub special: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSignals {
    pub damage_mix: DamageMix,
    pub crowd_control: Tier,
    pub healing: Tier,
    pub tanks: u32,
    pub crit_threat: ThreatLevel,
    pub crowd_control_hits: u32,
    pub healing_hits: u32,
    /// Catalog ids of resolved roster entries, in roster order.
    pub resolved: Vec<String>,
    /// Roster entries with no catalog match, verbatim. Excluded from every ratio and tier.
    pub unresolved: Vec<String>,
}

impl CompositionSignals {
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}

/// Damage lean of a single entity from its role tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageLean {
    Physical,
    Special,
    /// Both a physical and a special tag: half weight to each axis.
    Mixed,
    /// Neither (e.g. pure Tank): no weight.
    Neutral,
}

impl DamageLean {
    pub fn of(entity: &EntityRecord) -> Self {
        let physical = entity.tags.iter().any(|t| t.is_physical());
        let special = entity.tags.iter().any(|t| t.is_special());
        match (physical, special) {
            (true, true) => Self::Mixed,
            (true, false) => Self::Physical,
            (false, true) => Self::Special,
            (false, false) => Self::Neutral,
        }
    }

    fn weights(self) -> (f64, f64) {
        match self {
            Self::Physical => (1.0, 0.0),
            Self::Special => (0.0, 1.0),
            Self::Mixed => (0.5, 0.5),
            Self::Neutral => (0.0, 0.0),
        }
    }
}

/// Round both shares to `places`; when both round up past the whole, special gives back the excess.
fn rounded_mix(physical: f64, special: f64, places: u32) -> DamageMix {
    let scale = 10f64.powi(places as i32);
    let whole = scale as u64;
    let physical_units = ((physical * scale).round() as u64).min(whole);
    let special_units = ((special * scale).round() as u64).min(whole - physical_units);
    DamageMix {
        physical: physical_units as f64 / scale,
        special: special_units as f64 / scale,
    }
}

fn crit_threat_for(physical_entities: u32) -> ThreatLevel {
    match physical_entities {
        0 => ThreatLevel::Low,
        1 => ThreatLevel::Medium,
        _ => ThreatLevel::High,
    }
}

/// Analyzer = tuning + a text classification strategy.
pub struct CompositionAnalyzer {
    config: AnalyzerConfig,
    classifier: Box<dyn SignalClassifier + Send + Sync>,
}

impl Default for CompositionAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl CompositionAnalyzer {
    /// Keyword classifier built from the config's keyword lists.
    pub fn new(config: AnalyzerConfig) -> Self {
        let classifier = KeywordClassifier::new(
            config.crowd_control_keywords.iter(),
            config.sustain_keywords.iter(),
        );
        Self {
            config,
            classifier: Box::new(classifier),
        }
    }

    pub fn with_classifier(
        config: AnalyzerConfig,
        classifier: Box<dyn SignalClassifier + Send + Sync>,
    ) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze<S: AsRef<str>>(&self, catalog: &Catalog, roster: &[S]) -> CompositionSignals {
        let mut physical_weight = 0.0;
        let mut special_weight = 0.0;
        let mut physical_entities = 0u32;
        let mut tanks = 0u32;
        let mut cc_hits = 0u32;
        let mut heal_hits = 0u32;
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();

        for identity in roster {
            let identity = identity.as_ref();
            let Some(entity) = catalog.entity(identity) else {
                unresolved.push(identity.to_string());
                continue;
            };

            let lean = DamageLean::of(entity);
            let (p, s) = lean.weights();
            physical_weight += p;
            special_weight += s;
            if matches!(lean, DamageLean::Physical | DamageLean::Mixed) {
                physical_entities += 1;
            }

            if entity.has_tag(RoleTag::Tank)
                || entity.toughness > self.config.tank_toughness_threshold
            {
                tanks += 1;
            }

            let hits = self.classifier.classify(entity);
            cc_hits += hits.crowd_control;
            heal_hits += hits.sustain;
            resolved.push(entity.id.clone());
        }

        if !unresolved.is_empty() {
            tracing::warn!(?unresolved, "roster entries not found in catalog");
        }

        let total = resolved.len().max(1) as f64;
        let precision = self.config.ratio_precision;
        let signals = CompositionSignals {
            damage_mix: rounded_mix(physical_weight / total, special_weight / total, precision),
            crowd_control: self.config.thresholds.tier_for(cc_hits),
            healing: self.config.thresholds.tier_for(heal_hits),
            tanks,
            crit_threat: crit_threat_for(physical_entities),
            crowd_control_hits: cc_hits,
            healing_hits: heal_hits,
            resolved,
            unresolved,
        };
        tracing::debug!(
            physical = signals.damage_mix.physical,
            special = signals.damage_mix.special,
            crowd_control = %signals.crowd_control,
            healing = %signals.healing,
            tanks = signals.tanks,
            "composition analyzed"
        );
        signals
    }
}

/// Analyze with default tuning and the keyword classifier.
pub fn analyze_composition<S: AsRef<str>>(catalog: &Catalog, roster: &[S]) -> CompositionSignals {
    CompositionAnalyzer::default().analyze(catalog, roster)
}
