//! Loaded catalog snapshot for one version/language, with case-insensitive
//! identity lookup. Built once per `fetch_static_data` and shared read-only by
//! the analyzer and the availability check.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::data::cache::CatalogCache;
use crate::data::champion::EntityRecord;
use crate::data::equipment::{EquipmentRecord, OptionTree, SpellRecord};
use crate::error::AdvisorError;

/// Normalize an identity for lookup: alphanumeric lowercase only ("Kai'Sa" -> "kaisa").
pub fn normalize_lookup_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub version: String,
    pub lang: String,
    /// Normalized id and normalized display name -> record.
    by_key: HashMap<String, EntityRecord>,
    entity_count: usize,
    item_names: BTreeSet<String>,
    option_names: BTreeSet<String>,
    spell_names: BTreeSet<String>,
}

impl Catalog {
    /// Load every resource for `version`/`lang` through the read-through cache.
    pub fn load(cache: &CatalogCache, version: &str, lang: &str) -> Result<Self, AdvisorError> {
        let entities = cache.get_entities(version, lang)?;
        let equipment = cache.get_equipment(version, lang)?;
        let options = cache.get_options(version, lang)?;
        let spells = cache.get_summoner_spells(version, lang)?;
        Ok(Self::from_entities(version, lang, entities.into_values())
            .with_equipment(&equipment)
            .with_options(&options)
            .with_spells(&spells))
    }

    pub fn from_entities<I>(version: &str, lang: &str, entities: I) -> Self
    where
        I: IntoIterator<Item = EntityRecord>,
    {
        let mut by_key = HashMap::new();
        let mut entity_count = 0;
        for entity in entities {
            entity_count += 1;
            let name_key = normalize_lookup_key(&entity.name);
            if !name_key.is_empty() {
                by_key.entry(name_key).or_insert_with(|| entity.clone());
            }
            // Ids win over display names on collision.
            by_key.insert(normalize_lookup_key(&entity.id), entity);
        }
        Self {
            version: version.to_string(),
            lang: lang.to_string(),
            by_key,
            entity_count,
            ..Self::default()
        }
    }

    pub fn with_equipment(mut self, equipment: &BTreeMap<String, EquipmentRecord>) -> Self {
        self.item_names = equipment.values().map(|e| e.name.clone()).collect();
        self
    }

    pub fn with_options(mut self, trees: &[OptionTree]) -> Self {
        self.option_names = trees
            .iter()
            .flat_map(|t| {
                std::iter::once(t.name.clone())
                    .chain(t.keystones.iter().cloned())
                    .chain(t.options.iter().cloned())
            })
            .collect();
        self
    }

    pub fn with_spells(mut self, spells: &BTreeMap<String, SpellRecord>) -> Self {
        self.spell_names = spells.values().map(|s| s.name.clone()).collect();
        self
    }

    /// Case- and punctuation-insensitive lookup by id or display name.
    pub fn entity(&self, identity: &str) -> Option<&EntityRecord> {
        self.by_key.get(&normalize_lookup_key(identity))
    }

    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.item_names.contains(name)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.option_names.contains(name)
    }

    pub fn has_spell(&self, name: &str) -> bool {
        self.spell_names.contains(name)
    }

    /// True once equipment/options/spells were attached (not just entities).
    pub fn has_name_tables(&self) -> bool {
        !self.item_names.is_empty() || !self.option_names.is_empty() || !self.spell_names.is_empty()
    }
}
