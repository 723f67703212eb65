//! Equipment, configuration-tree and consumable-spell records
//! (`item.json`, `runesReforged.json`, `summoner.json`).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: String,
    pub name: String,
    pub gold_total: u32,
    pub tags: Vec<String>,
}

/// One configuration tree with its option names. `keystones` is the first slot row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionTree {
    pub id: u32,
    pub name: String,
    pub keystones: Vec<String>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ItemFile {
    data: HashMap<String, RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    #[serde(default)]
    gold: Option<RawGold>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawGold {
    #[serde(default)]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct RawTree {
    id: u32,
    name: String,
    #[serde(default)]
    slots: Vec<RawSlot>,
}

#[derive(Debug, Deserialize)]
struct RawSlot {
    #[serde(default)]
    runes: Vec<RawRune>,
}

#[derive(Debug, Deserialize)]
struct RawRune {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpellFile {
    data: HashMap<String, RawSpell>,
}

#[derive(Debug, Deserialize)]
struct RawSpell {
    id: String,
    name: String,
}

/// Item id -> record, ordered by id for stable listing.
pub fn parse_equipment(raw: &str) -> Result<BTreeMap<String, EquipmentRecord>, AdvisorError> {
    let file: ItemFile =
        serde_json::from_str(raw).map_err(|e| AdvisorError::parse("equipment catalog", e))?;
    Ok(file
        .data
        .into_iter()
        .map(|(id, item)| {
            let record = EquipmentRecord {
                id: id.clone(),
                name: item.name,
                gold_total: item.gold.map(|g| g.total).unwrap_or(0),
                tags: item.tags,
            };
            (id, record)
        })
        .collect())
}

pub fn parse_options(raw: &str) -> Result<Vec<OptionTree>, AdvisorError> {
    let trees: Vec<RawTree> =
        serde_json::from_str(raw).map_err(|e| AdvisorError::parse("option catalog", e))?;
    Ok(trees
        .into_iter()
        .map(|tree| {
            let keystones = tree
                .slots
                .first()
                .map(|slot| slot.runes.iter().map(|r| r.name.clone()).collect())
                .unwrap_or_default();
            let options = tree
                .slots
                .iter()
                .skip(1)
                .flat_map(|slot| slot.runes.iter().map(|r| r.name.clone()))
                .collect();
            OptionTree {
                id: tree.id,
                name: tree.name,
                keystones,
                options,
            }
        })
        .collect())
}

pub fn parse_spells(raw: &str) -> Result<BTreeMap<String, SpellRecord>, AdvisorError> {
    let file: SpellFile =
        serde_json::from_str(raw).map_err(|e| AdvisorError::parse("spell catalog", e))?;
    Ok(file
        .data
        .into_iter()
        .map(|(key, spell)| {
            (
                key,
                SpellRecord {
                    id: spell.id,
                    name: spell.name,
                },
            )
        })
        .collect())
}
