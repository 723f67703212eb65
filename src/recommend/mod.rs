//! Recommendation engine: pure decision tables keyed by the ally archetype and
//! the opposing roster's composition signals.

pub mod items;
pub mod runes;
pub mod summoners;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::{CompositionSignals, Tier};
use crate::data::catalog::Catalog;
use crate::error::AdvisorError;

pub use items::{recommend_equipment, BootsChoice, CoreItem, EquipmentBundle, SituationalItem};
pub use runes::{recommend_configuration, ConfigurationBundle, StatShard};
pub use summoners::{recommend_spells, SpellBundle};

/// Physical share at or above which physical resistances are favoured.
pub const PHYSICAL_DOMINANT_RATIO: f64 = 0.60;
/// Special share at or above which (with enough crowd control) special resistances are favoured.
pub const SPECIAL_SUSTAINED_RATIO: f64 = 0.40;
/// Crowd-control tier from which tenacity picks replace alacrity/standard picks.
pub const TENACITY_TIER: Tier = Tier::High;
/// Crowd-control tier required, with [SPECIAL_SUSTAINED_RATIO], for special-resist shards.
pub const SPECIAL_SUSTAINED_CC_TIER: Tier = Tier::Medium;
/// Healing/shield tier from which an anti-heal item is prepended to situational lists.
pub const ANTI_HEAL_TIER: Tier = Tier::Medium;

/// The ally's play style. Parsing rejects anything outside the three known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    #[serde(rename = "AD")]
    PhysicalCarry,
    #[serde(rename = "AP")]
    SpecialCaster,
    #[serde(rename = "TANK")]
    Tank,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhysicalCarry => "AD",
            Self::SpecialCaster => "AP",
            Self::Tank => "TANK",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = AdvisorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AD" => Ok(Self::PhysicalCarry),
            "AP" => Ok(Self::SpecialCaster),
            "TANK" => Ok(Self::Tank),
            _ => Err(AdvisorError::InvalidArgument(format!(
                "unknown archetype '{raw}', expected one of AD, AP, TANK"
            ))),
        }
    }
}

pub fn needs_tenacity(signals: &CompositionSignals) -> bool {
    signals.crowd_control.at_least(TENACITY_TIER)
}

pub fn physical_dominant(signals: &CompositionSignals) -> bool {
    signals.damage_mix.physical >= PHYSICAL_DOMINANT_RATIO
}

pub fn special_sustained(signals: &CompositionSignals) -> bool {
    signals.damage_mix.special >= SPECIAL_SUSTAINED_RATIO
        && signals.crowd_control.at_least(SPECIAL_SUSTAINED_CC_TIER)
}

pub fn heavy_sustain(signals: &CompositionSignals) -> bool {
    signals.healing.at_least(ANTI_HEAL_TIER)
}

/// Physical-resist boots only when physical strictly outweighs special.
pub fn physical_over_special(signals: &CompositionSignals) -> bool {
    signals.damage_mix.physical > signals.damage_mix.special
}

/// All three bundles for one matchup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanBundle {
    pub archetype: Archetype,
    pub runes: ConfigurationBundle,
    pub summoners: SpellBundle,
    pub items: EquipmentBundle,
}

pub fn plan_build(archetype: Archetype, signals: &CompositionSignals) -> PlanBundle {
    PlanBundle {
        archetype,
        runes: recommend_configuration(archetype, signals),
        summoners: recommend_spells(archetype, signals),
        items: recommend_equipment(archetype, signals),
    }
}

/// Recommended names missing from the loaded catalog version. Empty when the
/// catalog carries no name tables (entities only).
pub fn unavailable_names(plan: &PlanBundle, catalog: &Catalog) -> Vec<String> {
    if !catalog.has_name_tables() {
        return Vec::new();
    }
    let runes = &plan.runes;
    let option_names = std::iter::once(&runes.primary_tree)
        .chain(std::iter::once(&runes.keystone))
        .chain(runes.primary.iter())
        .chain(std::iter::once(&runes.secondary_tree))
        .chain(runes.secondary.iter())
        .filter(|name| !catalog.has_option(name));
    let spell_names = plan
        .summoners
        .summoners
        .iter()
        .chain(plan.summoners.alt.iter())
        .filter(|name| !catalog.has_spell(name));
    let items = &plan.items;
    let item_names = items
        .starter
        .iter()
        .chain([&items.boots.pick, &items.boots.alt])
        .chain(items.core.iter().map(|c| &c.item))
        .chain(items.situational.iter().map(|s| &s.item))
        .filter(|name| !catalog.has_item(name));

    let mut missing: Vec<String> = option_names
        .chain(spell_names)
        .chain(item_names)
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    missing
}
