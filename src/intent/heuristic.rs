//! Deterministic free-text parse used when no completion service is configured
//! or its output is unusable.

use std::sync::LazyLock;

use regex::Regex;

use crate::intent::{MatchupDescriptor, ROSTER_SIZE};
use crate::recommend::Archetype;

pub const DEFAULT_ALLY: &str = "darius";
pub const DEFAULT_ROSTER: [&str; ROSTER_SIZE] = ["garen", "maokai", "ahri", "jinx", "lulu"];

/// Connective words that survive the alphabetic filter but are never identities.
const FILLER_WORDS: &[&str] = &["and", "or", "the", "vs", "versus", "plus"];

static ALLY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:play|use)\s+([a-z'.]+)").expect("valid regex"));
static ROSTER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:against|vs)\b\.?").expect("valid regex"));

/// `tank` anywhere -> TANK, ` ap` -> AP, otherwise AD.
pub fn detect_archetype(lower: &str) -> Archetype {
    if lower.contains("tank") {
        Archetype::Tank
    } else if lower.contains(" ap") {
        Archetype::SpecialCaster
    } else {
        Archetype::PhysicalCarry
    }
}

pub fn detect_ally(lower: &str) -> Option<String> {
    ALLY_PATTERN
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(|c| c == '.' || c == '\'').to_string())
        .filter(|name| !name.is_empty())
}

/// Alphabetic tokens after the first `against`/`vs`, filler words removed.
pub fn detect_roster(lower: &str) -> Vec<String> {
    let Some(marker) = ROSTER_MARKER.find(lower) else {
        return Vec::new();
    };
    lower[marker.end()..]
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim_end_matches(['.', '!', '?', ';']))
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
        .filter(|token| !FILLER_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Truncate to [ROSTER_SIZE], padding short rosters from [DEFAULT_ROSTER].
pub fn pad_roster(mut roster: Vec<String>) -> Vec<String> {
    if roster.len() < ROSTER_SIZE {
        roster.extend(DEFAULT_ROSTER.iter().map(|s| s.to_string()));
    }
    roster.truncate(ROSTER_SIZE);
    roster
}

pub fn parse_intent_heuristic(text: &str) -> MatchupDescriptor {
    let lower = text.to_lowercase();
    let archetype = detect_archetype(&lower);
    let ally = detect_ally(&lower).unwrap_or_else(|| DEFAULT_ALLY.to_string());
    let roster = pad_roster(detect_roster(&lower));
    MatchupDescriptor {
        ally_champion: ally,
        ally_characteristic: archetype,
        enemy_team: roster,
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_ally, detect_archetype, detect_roster, pad_roster, parse_intent_heuristic};
    use crate::recommend::Archetype;

    #[test]
    fn parses_the_canonical_sentence() {
        let m = parse_intent_heuristic(
            "I want to play Darius tank against Garen, Maokai, Ahri, Jinx, and Lulu",
        );
        assert_eq!(m.ally_champion, "darius");
        assert_eq!(m.ally_characteristic, Archetype::Tank);
        assert_eq!(m.enemy_team, vec!["garen", "maokai", "ahri", "jinx", "lulu"]);
    }

    #[test]
    fn vs_marker_and_caster_detection() {
        let m = parse_intent_heuristic("use Lux ap vs Zed, Yasuo, Leona");
        assert_eq!(m.ally_champion, "lux");
        assert_eq!(m.ally_characteristic, Archetype::SpecialCaster);
        assert_eq!(m.enemy_team, vec!["zed", "yasuo", "leona", "garen", "maokai"]);
    }

    #[test]
    fn missing_pieces_fall_back_to_defaults() {
        let m = parse_intent_heuristic("what should I build?");
        assert_eq!(m.ally_champion, "darius");
        assert_eq!(m.ally_characteristic, Archetype::PhysicalCarry);
        assert_eq!(m.enemy_team, vec!["garen", "maokai", "ahri", "jinx", "lulu"]);
    }

    #[test]
    fn long_rosters_are_truncated_and_non_alphabetic_tokens_dropped() {
        let roster = detect_roster("against a1, b, c, d, e, f, g");
        assert_eq!(roster, vec!["b", "c", "d", "e", "f", "g"]);
        assert_eq!(pad_roster(roster), vec!["b", "c", "d", "e", "f"]);
    }

    #[test]
    fn ally_needs_a_word_boundary() {
        assert_eq!(detect_ally("because nothing"), None);
        assert_eq!(detect_ally("i play kai'sa."), Some("kai'sa".to_string()));
        assert_eq!(detect_archetype("full tank please"), Archetype::Tank);
    }
}
