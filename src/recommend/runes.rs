//! Configuration-tree (rune page) decision table.

use std::fmt;

use serde::Serialize;

use crate::analysis::CompositionSignals;
use crate::recommend::{needs_tenacity, physical_dominant, special_sustained, Archetype};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatShard {
    Adaptive,
    AttackSpeed,
    Armor,
    MagicRes,
    Health,
}

impl StatShard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adaptive => "Adaptive Force",
            Self::AttackSpeed => "Attack Speed",
            Self::Armor => "Armor",
            Self::MagicRes => "Magic Resist",
            Self::Health => "Health",
        }
    }
}

impl fmt::Display for StatShard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationBundle {
    pub primary_tree: String,
    pub keystone: String,
    /// Exactly three picks from the primary tree.
    pub primary: Vec<String>,
    pub secondary_tree: String,
    /// Exactly two picks from the secondary tree.
    pub secondary: Vec<String>,
    pub stat_shards: [StatShard; 3],
    pub why: Vec<String>,
}

/// Which resistance the variable shard slot should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResistFocus {
    Physical,
    Special,
    Neutral,
}

impl ResistFocus {
    fn of(signals: &CompositionSignals) -> Self {
        if physical_dominant(signals) {
            Self::Physical
        } else if special_sustained(signals) {
            Self::Special
        } else {
            Self::Neutral
        }
    }

    fn shard(self, neutral: StatShard) -> StatShard {
        match self {
            Self::Physical => StatShard::Armor,
            Self::Special => StatShard::MagicRes,
            Self::Neutral => neutral,
        }
    }

    fn reason(self, signals: &CompositionSignals, shard: StatShard) -> String {
        let mix = &signals.damage_mix;
        match self {
            Self::Physical => format!(
                "Physical damage {:.0}% is dominant -> {shard} shard",
                mix.physical * 100.0
            ),
            Self::Special => format!(
                "Special damage {:.0}% with {} crowd control -> {shard} shard",
                mix.special * 100.0,
                signals.crowd_control
            ),
            Self::Neutral => format!(
                "Mixed damage ({:.0}% physical / {:.0}% special) -> {shard} shard",
                mix.physical * 100.0,
                mix.special * 100.0
            ),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn recommend_configuration(
    archetype: Archetype,
    signals: &CompositionSignals,
) -> ConfigurationBundle {
    let tenacity = needs_tenacity(signals);
    let focus = ResistFocus::of(signals);
    let cc_reason = |swapped: &str| {
        if tenacity {
            format!("{} enemy crowd control -> {swapped}", signals.crowd_control)
        } else {
            format!("{} enemy crowd control -> standard picks", signals.crowd_control)
        }
    };

    match archetype {
        Archetype::Tank => {
            let secondary = if tenacity {
                ["Legend: Tenacity", "Last Stand"]
            } else {
                ["Triumph", "Legend: Alacrity"]
            };
            let shard = focus.shard(StatShard::Adaptive);
            ConfigurationBundle {
                primary_tree: "Resolve".to_string(),
                keystone: "Grasp of the Undying".to_string(),
                primary: names(&["Demolish", "Second Wind", "Overgrowth"]),
                secondary_tree: "Precision".to_string(),
                secondary: names(&secondary),
                stat_shards: [shard, StatShard::Health, StatShard::Health],
                why: vec![
                    "TANK: Resolve/Grasp for sustain and scaling health".to_string(),
                    cc_reason("Legend: Tenacity + Last Stand in secondary"),
                    focus.reason(signals, shard),
                ],
            }
        }
        Archetype::SpecialCaster => {
            let (secondary_tree, secondary) = if tenacity {
                ("Resolve", ["Second Wind", "Unflinching"])
            } else {
                ("Sorcery", ["Manaflow Band", "Transcendence"])
            };
            let shard = focus.shard(StatShard::Health);
            ConfigurationBundle {
                primary_tree: "Domination".to_string(),
                keystone: "Electrocute".to_string(),
                primary: names(&["Taste of Blood", "Eyeball Collection", "Ultimate Hunter"]),
                secondary_tree: secondary_tree.to_string(),
                secondary: names(&secondary),
                stat_shards: [StatShard::Adaptive, StatShard::Adaptive, shard],
                why: vec![
                    "AP: Domination/Electrocute burst and skirmish profile".to_string(),
                    cc_reason("Resolve secondary (Second Wind + Unflinching)"),
                    focus.reason(signals, shard),
                ],
            }
        }
        Archetype::PhysicalCarry => {
            let legend = if tenacity {
                "Legend: Tenacity"
            } else {
                "Legend: Alacrity"
            };
            let secondary = if tenacity {
                ["Second Wind", "Unflinching"]
            } else {
                ["Bone Plating", "Overgrowth"]
            };
            let shard = focus.shard(StatShard::Health);
            ConfigurationBundle {
                primary_tree: "Precision".to_string(),
                keystone: "Conqueror".to_string(),
                primary: names(&["Triumph", legend, "Last Stand"]),
                secondary_tree: "Resolve".to_string(),
                secondary: names(&secondary),
                stat_shards: [StatShard::AttackSpeed, StatShard::Adaptive, shard],
                why: vec![
                    "AD: Precision/Conqueror for sustained fighting".to_string(),
                    cc_reason("Legend: Tenacity + Unflinching"),
                    focus.reason(signals, shard),
                ],
            }
        }
    }
}
