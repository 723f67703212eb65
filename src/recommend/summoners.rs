//! Consumable (summoner) spell table. Pure lookup on archetype.

use serde::Serialize;

use crate::analysis::CompositionSignals;
use crate::recommend::Archetype;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellBundle {
    pub summoners: Vec<String>,
    pub alt: Vec<String>,
    pub why: String,
}

struct SpellRow {
    primary: [&'static str; 2],
    alternate: [&'static str; 2],
    why: &'static str,
}

const TANK_SPELLS: SpellRow = SpellRow {
    primary: ["Flash", "Teleport"],
    alternate: ["Flash", "Ghost"],
    why: "TANK: Teleport for map presence; Ghost for extended chases and escapes.",
};

const AP_SPELLS: SpellRow = SpellRow {
    primary: ["Flash", "Teleport"],
    alternate: ["Flash", "Barrier"],
    why: "AP: Teleport for tempo and roams; Barrier into strong burst compositions.",
};

const AD_SPELLS: SpellRow = SpellRow {
    primary: ["Flash", "Heal"],
    alternate: ["Flash", "Exhaust"],
    why: "AD: Heal is standard on carries; Exhaust against assassins and hypercarries.",
};

/// Signals are accepted for signature parity with the other tables; the lookup ignores them.
pub fn recommend_spells(archetype: Archetype, _signals: &CompositionSignals) -> SpellBundle {
    let row = match archetype {
        Archetype::Tank => &TANK_SPELLS,
        Archetype::SpecialCaster => &AP_SPELLS,
        Archetype::PhysicalCarry => &AD_SPELLS,
    };
    SpellBundle {
        summoners: row.primary.iter().map(|s| s.to_string()).collect(),
        alt: row.alternate.iter().map(|s| s.to_string()).collect(),
        why: row.why.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::recommend_spells;
    use crate::analysis::Tier;
    use crate::recommend::test_support::signals;
    use crate::recommend::Archetype;

    #[test]
    fn tank_and_caster_share_map_presence_but_diverge_on_alternate() {
        let s = signals(0.5, 0.5, Tier::None, Tier::None);
        let tank = recommend_spells(Archetype::Tank, &s);
        let caster = recommend_spells(Archetype::SpecialCaster, &s);
        assert_eq!(tank.summoners, vec!["Flash", "Teleport"]);
        assert_eq!(caster.summoners, vec!["Flash", "Teleport"]);
        assert_eq!(tank.alt[1], "Ghost");
        assert_eq!(caster.alt[1], "Barrier");
    }

    #[test]
    fn carry_defaults_to_self_sustain() {
        let bundle = recommend_spells(Archetype::PhysicalCarry, &signals(1.0, 0.0, Tier::VeryHigh, Tier::VeryHigh));
        assert_eq!(bundle.summoners, vec!["Flash", "Heal"]);
        assert_eq!(bundle.alt, vec!["Flash", "Exhaust"]);
    }
}
