mod common;

use common::{fixture_catalog, roster, CANONICAL_ROSTER};
use draftwise::analysis::{analyze_composition, Tier};
use draftwise::error::ErrorCode;
use draftwise::intent::MatchupDescriptor;
use draftwise::recommend::{
    plan_build, recommend_configuration, recommend_equipment, recommend_spells, unavailable_names,
    Archetype, StatShard,
};

#[test]
fn tank_into_all_physical_roster() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(
        &catalog,
        &roster(&["zed", "talon", "draven", "tryndamere", "caitlyn"]),
    );
    assert_eq!(signals.damage_mix.physical, 1.0);
    assert_eq!(signals.crowd_control, Tier::None);
    assert_eq!(signals.healing, Tier::None);

    let runes = recommend_configuration(Archetype::Tank, &signals);
    assert_eq!(runes.primary_tree, "Resolve");
    assert_eq!(runes.stat_shards[0], StatShard::Armor);
    assert_eq!(runes.secondary, vec!["Triumph", "Legend: Alacrity"]);

    let spells = recommend_spells(Archetype::Tank, &signals);
    assert!(spells.summoners.iter().any(|s| s == "Teleport"));

    let items = recommend_equipment(Archetype::Tank, &signals);
    assert_eq!(items.boots.pick, "Plated Steelcaps");
    assert_eq!(items.situational[0].item, "Force of Nature");

    let plan = plan_build(Archetype::Tank, &signals);
    assert_eq!(unavailable_names(&plan, &catalog), vec!["Gargoyle Stoneplate"]);
}

#[test]
fn caster_into_heavy_crowd_control() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(&catalog, &roster(&["annie", "morgana", "lux", "zed", "talon"]));
    assert_eq!(signals.crowd_control_hits, 3);
    assert_eq!(signals.crowd_control, Tier::High);
    assert_eq!(signals.damage_mix.special, 0.6);

    let runes = recommend_configuration(Archetype::SpecialCaster, &signals);
    assert_eq!(runes.primary_tree, "Domination");
    assert_eq!(runes.keystone, "Electrocute");
    assert_eq!(runes.secondary_tree, "Resolve");
    assert_eq!(runes.secondary, vec!["Second Wind", "Unflinching"]);
    assert_eq!(runes.stat_shards[2], StatShard::MagicRes);
    assert!(runes.why[1].contains("high enemy crowd control"));
    assert!(runes.why[2].ends_with("-> Magic Resist shard"), "{}", runes.why[2]);

    let spells = recommend_spells(Archetype::SpecialCaster, &signals);
    assert_eq!(spells.summoners, vec!["Flash", "Teleport"]);

    let items = recommend_equipment(Archetype::SpecialCaster, &signals);
    assert_eq!(items.boots.pick, "Sorcerer's Shoes");
    assert_eq!(items.boots.alt, "Mercury's Treads");
    assert_eq!(items.situational[0].item, "Morellonomicon");
}

#[test]
fn canonical_tank_plan_flags_names_missing_from_catalog() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(&catalog, &CANONICAL_ROSTER);
    let plan = plan_build(Archetype::Tank, &signals);
    assert_eq!(plan.runes.secondary, vec!["Legend: Tenacity", "Last Stand"]);
    // Tie on damage mix goes to special-resist boots.
    assert_eq!(plan.items.boots.pick, "Mercury's Treads");
    assert_eq!(
        unavailable_names(&plan, &catalog),
        vec!["Gargoyle Stoneplate", "Legend: Tenacity"]
    );
}

#[test]
fn carry_with_partially_unknown_roster() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(&catalog, &roster(&["darius", "ghost1", "lulu", "ghost2", "jinx"]));
    assert_eq!(signals.unresolved, vec!["ghost1", "ghost2"]);
    // Darius physical, Lulu special, Jinx physical over three resolved.
    assert_eq!(signals.damage_mix.physical, 0.67);
    assert_eq!(signals.damage_mix.special, 0.33);

    let items = recommend_equipment(Archetype::PhysicalCarry, &signals);
    assert_eq!(items.boots.alt, "Plated Steelcaps");
    let runes = recommend_configuration(Archetype::PhysicalCarry, &signals);
    assert_eq!(runes.stat_shards[2], StatShard::Armor);
}

#[test]
fn unknown_archetype_is_rejected_before_any_table() {
    for raw in ["support", "", "A D", "mage"] {
        let err = raw.parse::<Archetype>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument, "{raw:?}");
    }
    let err = MatchupDescriptor::new("darius", "jungle", &roster(&CANONICAL_ROSTER)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}
