mod common;

use common::{fixture_catalog, roster, CANONICAL_ROSTER};
use draftwise::analysis::{
    analyze_composition, AbilityHits, AnalyzerConfig, CompositionAnalyzer, SignalClassifier,
    ThreatLevel, Tier, TierThresholds,
};
use draftwise::data::EntityRecord;

#[test]
fn canonical_roster_signals() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(&catalog, &CANONICAL_ROSTER);

    // Garen physical, Maokai special, Ahri mixed, Jinx physical, Lulu special.
    assert_eq!(signals.damage_mix.physical, 0.5);
    assert_eq!(signals.damage_mix.special, 0.5);
    assert_eq!(signals.crowd_control_hits, 9);
    assert_eq!(signals.crowd_control, Tier::VeryHigh);
    assert_eq!(signals.healing_hits, 3);
    assert_eq!(signals.healing, Tier::High);
    assert_eq!(signals.tanks, 2);
    assert_eq!(signals.crit_threat, ThreatLevel::High);
    assert!(signals.unresolved.is_empty());
    assert_eq!(signals.resolved, vec!["Garen", "Maokai", "Ahri", "Jinx", "Lulu"]);
}

#[test]
fn unresolved_identities_are_reported_and_excluded() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(
        &catalog,
        &roster(&["garen", "notachamp", "maokai", "ahri", "Mystery Guy"]),
    );
    assert_eq!(signals.unresolved, vec!["notachamp", "Mystery Guy"]);
    assert_eq!(signals.resolved_count(), 3);
    // (1 + 0 + 0.5) / 3 and (0 + 1 + 0.5) / 3
    assert_eq!(signals.damage_mix.physical, 0.5);
    assert_eq!(signals.damage_mix.special, 0.5);
    assert_eq!(signals.crowd_control_hits, 5);
}

#[test]
fn fully_unknown_roster_yields_zero_signals() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(&catalog, &roster(&["a", "b", "c", "d", "e"]));
    assert_eq!(signals.unresolved.len(), 5);
    assert_eq!(signals.damage_mix.physical, 0.0);
    assert_eq!(signals.damage_mix.special, 0.0);
    assert_eq!(signals.crowd_control, Tier::None);
    assert_eq!(signals.tanks, 0);
    assert_eq!(signals.crit_threat, ThreatLevel::Low);
}

#[test]
fn lookup_ignores_case_and_punctuation() {
    let catalog = fixture_catalog();
    let signals = analyze_composition(&catalog, &roster(&["KAI'SA", "kaisa", "Zed", "TALON", "draven"]));
    assert!(signals.unresolved.is_empty());
    assert_eq!(signals.damage_mix.physical, 1.0);
    assert_eq!(signals.crowd_control, Tier::None);
}

#[test]
fn ratios_stay_in_unit_interval_and_analysis_is_deterministic() {
    let catalog = fixture_catalog();
    let rosters = [
        roster(&CANONICAL_ROSTER),
        roster(&["annie", "morgana", "lux", "zed", "talon"]),
        roster(&["zed", "talon", "draven", "tryndamere", "caitlyn"]),
        roster(&["maokai", "maokai", "maokai", "maokai", "x"]),
    ];
    for roster in &rosters {
        let a = analyze_composition(&catalog, roster);
        let b = analyze_composition(&catalog, roster);
        assert_eq!(a, b);
        let mix = a.damage_mix;
        assert!((0.0..=1.0).contains(&mix.physical));
        assert!((0.0..=1.0).contains(&mix.special));
        assert!(mix.physical + mix.special <= 1.0 + 1e-9);
    }
}

#[test]
fn mixed_entity_over_four_resolved_keeps_mix_within_whole() {
    let catalog = fixture_catalog();
    // Ahri splits half a share each way; Lux, Lulu and Annie are special.
    let signals = analyze_composition(&catalog, &roster(&["ahri", "lux", "lulu", "annie", "ghost"]));
    assert_eq!(signals.resolved.len(), 4);
    assert_eq!(signals.damage_mix.physical, 0.13);
    assert_eq!(signals.damage_mix.special, 0.87);
    assert!(signals.damage_mix.physical + signals.damage_mix.special <= 1.0);
}

#[test]
fn tiers_never_decrease_as_hits_grow() {
    let thresholds = TierThresholds::default();
    let mut previous = Tier::None;
    for hits in 0..20 {
        let tier = thresholds.tier_for(hits);
        assert!(tier >= previous, "tier dropped at {hits} hits");
        previous = tier;
    }
    assert_eq!(thresholds.tier_for(2), Tier::Medium);
    assert_eq!(thresholds.tier_for(5), Tier::VeryHigh);
}

struct FixedHits;

impl SignalClassifier for FixedHits {
    fn classify(&self, _entity: &EntityRecord) -> AbilityHits {
        AbilityHits {
            crowd_control: 0,
            sustain: 2,
        }
    }
}

#[test]
fn classifier_strategy_is_swappable() {
    let catalog = fixture_catalog();
    let analyzer = CompositionAnalyzer::with_classifier(AnalyzerConfig::default(), Box::new(FixedHits));
    let signals = analyzer.analyze(&catalog, &CANONICAL_ROSTER);
    assert_eq!(signals.crowd_control, Tier::None);
    assert_eq!(signals.healing_hits, 10);
    assert_eq!(signals.healing, Tier::VeryHigh);
    // Damage mix still comes from role tags.
    assert_eq!(signals.damage_mix.physical, 0.5);
}

#[test]
fn tuned_thresholds_and_toughness_change_tiers() {
    let catalog = fixture_catalog();
    let config = AnalyzerConfig {
        thresholds: TierThresholds {
            low: 2,
            medium: 4,
            high: 8,
            very_high: 12,
        },
        tank_toughness_threshold: 4,
        ..AnalyzerConfig::default()
    };
    let signals = CompositionAnalyzer::new(config).analyze(&catalog, &CANONICAL_ROSTER);
    assert_eq!(signals.crowd_control, Tier::High);
    assert_eq!(signals.healing, Tier::Low);
    // Lulu (toughness 5) now counts as a tank alongside Garen and Maokai.
    assert_eq!(signals.tanks, 3);
}
