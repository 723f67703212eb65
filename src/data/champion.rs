//! Entity records: one per playable character, read from the catalog's
//! `championFull.json` (tags, toughness, passive and spell texts).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Role labels carried by catalog entities. Unknown labels are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    Fighter,
    Marksman,
    Assassin,
    Mage,
    Support,
    Tank,
    #[serde(other)]
    Other,
}

impl RoleTag {
    pub fn is_physical(self) -> bool {
        matches!(self, Self::Fighter | Self::Marksman | Self::Assassin)
    }

    pub fn is_special(self) -> bool {
        matches!(self, Self::Mage | Self::Support)
    }
}

/// Immutable per-version record for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub name: String,
    pub tags: Vec<RoleTag>,
    /// Passive first, then actives in catalog order.
    pub ability_texts: Vec<String>,
    /// Catalog `info.defense` score (0..=10).
    pub toughness: u32,
}

impl EntityRecord {
    pub fn has_tag(&self, tag: RoleTag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Deserialize)]
struct ChampionFile {
    data: HashMap<String, RawChampion>,
}

#[derive(Debug, Deserialize)]
struct RawChampion {
    id: String,
    name: String,
    #[serde(default)]
    tags: Vec<RoleTag>,
    #[serde(default)]
    info: Option<RawInfo>,
    #[serde(default)]
    passive: Option<RawAbility>,
    #[serde(default)]
    spells: Vec<RawAbility>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(default)]
    defense: u32,
}

#[derive(Debug, Deserialize)]
struct RawAbility {
    #[serde(default)]
    description: String,
    #[serde(default, rename = "sanitizedDescription")]
    sanitized_description: Option<String>,
}

impl RawAbility {
    fn into_text(self) -> Option<String> {
        if !self.description.trim().is_empty() {
            return Some(self.description);
        }
        self.sanitized_description.filter(|s| !s.trim().is_empty())
    }
}

impl From<RawChampion> for EntityRecord {
    fn from(raw: RawChampion) -> Self {
        let ability_texts = raw
            .passive
            .into_iter()
            .chain(raw.spells)
            .filter_map(RawAbility::into_text)
            .collect();
        EntityRecord {
            id: raw.id,
            name: raw.name,
            tags: raw.tags,
            ability_texts,
            toughness: raw.info.map(|i| i.defense).unwrap_or(0),
        }
    }
}

/// Parse a catalog entity document into catalog key -> record.
pub fn parse_entities(raw: &str) -> Result<HashMap<String, EntityRecord>, AdvisorError> {
    let file: ChampionFile =
        serde_json::from_str(raw).map_err(|e| AdvisorError::parse("entity catalog", e))?;
    Ok(file
        .data
        .into_iter()
        .map(|(key, champ)| (key, EntityRecord::from(champ)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{parse_entities, RoleTag};

    const SAMPLE: &str = r#"{
        "type": "champion",
        "data": {
            "Leona": {
                "id": "Leona", "name": "Leona", "tags": ["Tank", "Support"],
                "info": {"attack": 4, "defense": 8, "magic": 3, "difficulty": 4},
                "passive": {"name": "Sunlight", "description": "Marks enemies."},
                "spells": [
                    {"name": "Shield of Daybreak", "description": "Stuns the target."},
                    {"name": "Eclipse", "description": ""},
                    {"name": "Zenith Blade", "description": "Roots the target."}
                ]
            },
            "Nunu": {"id": "Nunu", "name": "Nunu & Willump", "tags": ["Tank", "Brawler"]}
        }
    }"#;

    #[test]
    fn parses_tags_toughness_and_ability_texts() {
        let entities = parse_entities(SAMPLE).unwrap();
        let leona = &entities["Leona"];
        assert_eq!(leona.tags, vec![RoleTag::Tank, RoleTag::Support]);
        assert_eq!(leona.toughness, 8);
        assert_eq!(
            leona.ability_texts,
            vec!["Marks enemies.", "Stuns the target.", "Roots the target."]
        );
    }

    #[test]
    fn unknown_tags_and_missing_sections_degrade_gracefully() {
        let entities = parse_entities(SAMPLE).unwrap();
        let nunu = &entities["Nunu"];
        assert_eq!(nunu.tags, vec![RoleTag::Tank, RoleTag::Other]);
        assert!(nunu.ability_texts.is_empty());
        assert_eq!(nunu.toughness, 0);
    }

    #[test]
    fn rejects_documents_without_data() {
        assert!(parse_entities("{\"type\":\"champion\"}").is_err());
    }
}
