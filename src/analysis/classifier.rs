//! Ability-text classification. The analyzer only sees [AbilityHits]; the
//! keyword scan below is one strategy and can be replaced by a structured
//! source without touching tiers or decision tables.

use crate::data::champion::EntityRecord;

pub const DEFAULT_CROWD_CONTROL_KEYWORDS: &[&str] = &[
    "stun",
    "root",
    "knockup",
    "knock up",
    "knocks up",
    "airborne",
    "sleep",
    "charm",
    "taunt",
    "fear",
    "suppression",
    "suppress",
    "silence",
    "slow",
    "snare",
    "cripple",
];

pub const DEFAULT_SUSTAIN_KEYWORDS: &[&str] = &[
    "heal",
    "healing",
    "shield",
    "shielding",
    "barrier",
    "lifesteal",
    "life steal",
    "omnivamp",
];

/// Per-entity count of ability texts that matched each signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityHits {
    pub crowd_control: u32,
    pub sustain: u32,
}

pub trait SignalClassifier {
    fn classify(&self, entity: &EntityRecord) -> AbilityHits;
}

/// Counts one hit per ability text containing any keyword (case-insensitive substring).
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    crowd_control: Vec<String>,
    sustain: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_CROWD_CONTROL_KEYWORDS.iter().copied(),
            DEFAULT_SUSTAIN_KEYWORDS.iter().copied(),
        )
    }
}

impl KeywordClassifier {
    pub fn new<C, S>(crowd_control: C, sustain: S) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let lower = |k: &str| k.trim().to_lowercase();
        Self {
            crowd_control: crowd_control
                .into_iter()
                .map(|k| lower(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
            sustain: sustain
                .into_iter()
                .map(|k| lower(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn mentions_any(text: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

impl SignalClassifier for KeywordClassifier {
    fn classify(&self, entity: &EntityRecord) -> AbilityHits {
        let mut hits = AbilityHits::default();
        for text in &entity.ability_texts {
            let text = text.to_lowercase();
            if Self::mentions_any(&text, &self.crowd_control) {
                hits.crowd_control += 1;
            }
            if Self::mentions_any(&text, &self.sustain) {
                hits.sustain += 1;
            }
        }
        hits
    }
}
