//! Equipment decision table: starter, boots, core and situational items.

use serde::Serialize;

use crate::analysis::CompositionSignals;
use crate::recommend::{heavy_sustain, physical_over_special, Archetype};

const PHYSICAL_RESIST_BOOTS: &str = "Plated Steelcaps";
const SPECIAL_RESIST_BOOTS: &str = "Mercury's Treads";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootsChoice {
    pub pick: String,
    pub alt: String,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreItem {
    pub item: String,
    pub why: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SituationalItem {
    pub item: String,
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentBundle {
    pub starter: Vec<String>,
    pub boots: BootsChoice,
    pub core: Vec<CoreItem>,
    pub situational: Vec<SituationalItem>,
}

fn core(list: &[(&str, &str)]) -> Vec<CoreItem> {
    list.iter()
        .map(|(item, why)| CoreItem {
            item: item.to_string(),
            why: why.to_string(),
        })
        .collect()
}

fn situational(list: &[(&str, &str)]) -> Vec<SituationalItem> {
    list.iter()
        .map(|(item, when)| SituationalItem {
            item: item.to_string(),
            when: when.to_string(),
        })
        .collect()
}

/// (chosen, other) defensive boots; ties go to special resist.
fn defensive_boots(signals: &CompositionSignals) -> (&'static str, &'static str) {
    if physical_over_special(signals) {
        (PHYSICAL_RESIST_BOOTS, SPECIAL_RESIST_BOOTS)
    } else {
        (SPECIAL_RESIST_BOOTS, PHYSICAL_RESIST_BOOTS)
    }
}

fn prepend_anti_heal(list: &mut Vec<SituationalItem>, item: &str, when: &str) {
    list.retain(|s| s.item != item);
    list.insert(
        0,
        SituationalItem {
            item: item.to_string(),
            when: when.to_string(),
        },
    );
}

pub fn recommend_equipment(archetype: Archetype, signals: &CompositionSignals) -> EquipmentBundle {
    let (defensive, other_defensive) = defensive_boots(signals);

    let mut bundle = match archetype {
        Archetype::Tank => EquipmentBundle {
            starter: vec!["Doran's Shield".to_string(), "Health Potion".to_string()],
            boots: BootsChoice {
                pick: defensive.to_string(),
                alt: other_defensive.to_string(),
                rule: "Physical-heavy -> Steelcaps; otherwise Mercury's Treads vs special damage/CC."
                    .to_string(),
            },
            core: core(&[
                ("Sunfire Aegis", "Durability plus sustained area damage in fights."),
                ("Thornmail", "Applies Grievous Wounds against healing."),
                ("Randuin's Omen", "Mitigates critical strikes from physical carries."),
            ]),
            situational: situational(&[
                ("Force of Nature", "Sustained special damage plus crowd control."),
                ("Gargoyle Stoneplate", "Five-versus-five brawls and high burst."),
                ("Dead Man's Plate", "Need extra mobility or roam potential."),
            ]),
        },
        Archetype::SpecialCaster => EquipmentBundle {
            starter: vec!["Doran's Ring".to_string(), "Health Potion".to_string()],
            boots: BootsChoice {
                pick: "Sorcerer's Shoes".to_string(),
                alt: defensive.to_string(),
                rule: format!("Penetration for damage; {defensive} when you keep getting caught."),
            },
            core: core(&[
                ("Luden's Companion", "Burst and mana efficiency for poke and picks."),
                ("Shadowflame", "Strong against shields; flat penetration spike."),
                ("Zhonya's Hourglass", "Defensive active against engage and burst."),
            ]),
            situational: situational(&[
                ("Banshee's Veil", "Pick-heavy or special burst threats."),
                ("Rabadon's Deathcap", "Snowball or late scaling power spike."),
                ("Void Staff", "Enemy stacking magic resist."),
            ]),
        },
        Archetype::PhysicalCarry => EquipmentBundle {
            starter: vec!["Doran's Blade".to_string(), "Health Potion".to_string()],
            boots: BootsChoice {
                pick: "Berserker's Greaves".to_string(),
                alt: defensive.to_string(),
                rule: format!("Attack speed by default; {defensive} when focused early."),
            },
            core: core(&[
                ("Kraken Slayer", "Sustained damage and anti-tank passive."),
                ("Infinity Edge", "Critical strike spike for carries."),
                ("Lord Dominik's Regards", "Armor penetration against tanks and bruisers."),
            ]),
            situational: situational(&[
                ("Guardian Angel", "Focused often in teamfights."),
                ("Mortal Reminder", "High enemy healing present."),
                ("Wit's End", "Sustained special damage and need magic resist."),
            ]),
        },
    };

    if heavy_sustain(signals) {
        match archetype {
            Archetype::SpecialCaster => prepend_anti_heal(
                &mut bundle.situational,
                "Morellonomicon",
                "Significant enemy healing/shields.",
            ),
            Archetype::PhysicalCarry => prepend_anti_heal(
                &mut bundle.situational,
                "Mortal Reminder",
                "Significant enemy healing.",
            ),
            // Thornmail in core already applies anti-heal.
            Archetype::Tank => {}
        }
    }

    bundle
}

#[cfg(test)]
mod tests {
    use super::recommend_equipment;
    use crate::analysis::Tier;
    use crate::recommend::test_support::signals;
    use crate::recommend::Archetype;

    #[test]
    fn tank_boots_follow_damage_mix_with_special_tie_break() {
        let physical = recommend_equipment(Archetype::Tank, &signals(0.8, 0.2, Tier::None, Tier::None));
        assert_eq!(physical.boots.pick, "Plated Steelcaps");
        assert_eq!(physical.boots.alt, "Mercury's Treads");

        let tie = recommend_equipment(Archetype::Tank, &signals(0.4, 0.4, Tier::None, Tier::None));
        assert_eq!(tie.boots.pick, "Mercury's Treads");
    }

    #[test]
    fn caster_gets_special_anti_heal_first_under_sustain() {
        let bundle = recommend_equipment(Archetype::SpecialCaster, &signals(0.5, 0.5, Tier::None, Tier::Medium));
        assert_eq!(bundle.situational[0].item, "Morellonomicon");
        assert_eq!(bundle.situational.len(), 4);
    }

    #[test]
    fn carry_anti_heal_is_moved_not_duplicated() {
        let bundle = recommend_equipment(Archetype::PhysicalCarry, &signals(0.5, 0.5, Tier::None, Tier::High));
        assert_eq!(bundle.situational[0].item, "Mortal Reminder");
        assert_eq!(bundle.situational[0].when, "Significant enemy healing.");
        let count = bundle
            .situational
            .iter()
            .filter(|s| s.item == "Mortal Reminder")
            .count();
        assert_eq!(count, 1);
        assert_eq!(bundle.situational.len(), 3);
    }

    #[test]
    fn tank_situational_is_unaffected_by_sustain() {
        let calm = recommend_equipment(Archetype::Tank, &signals(0.5, 0.5, Tier::None, Tier::None));
        let heavy = recommend_equipment(Archetype::Tank, &signals(0.5, 0.5, Tier::None, Tier::VeryHigh));
        assert_eq!(calm.situational, heavy.situational);
        assert!(heavy.core.iter().any(|c| c.item == "Thornmail"));
    }

    #[test]
    fn low_sustain_leaves_tables_untouched() {
        let bundle = recommend_equipment(Archetype::SpecialCaster, &signals(0.5, 0.5, Tier::None, Tier::Low));
        assert_eq!(bundle.situational[0].item, "Banshee's Veil");
        assert_eq!(bundle.core.len(), 3);
        assert_eq!(bundle.starter.len(), 2);
    }
}
