//! Read-through, on-disk cache over the versioned catalog.
//!
//! Each catalog resource is stored verbatim as one JSON file whose name is the
//! resource path with slashes replaced. Writes go to a temp file in the same
//! directory and are renamed into place, so concurrent workers never observe a
//! partially written file.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::champion::{parse_entities, EntityRecord};
use crate::data::equipment::{
    parse_equipment, parse_options, parse_spells, EquipmentRecord, OptionTree, SpellRecord,
};
use crate::data::fetch::CatalogSource;
use crate::error::AdvisorError;

pub const DEFAULT_CACHE_DIR: &str = "./cache_dd";
pub const LATEST_VERSION: &str = "latest";
/// Used when the version list cannot be fetched.
pub const FALLBACK_VERSION: &str = "15.1.1";
pub const VERSIONS_PATH: &str = "/api/versions.json";

pub const ENTITY_FILE: &str = "championFull.json";
pub const EQUIPMENT_FILE: &str = "item.json";
pub const OPTIONS_FILE: &str = "runesReforged.json";
pub const SPELLS_FILE: &str = "summoner.json";

pub fn resource_path(version: &str, lang: &str, file: &str) -> String {
    format!("/cdn/{version}/data/{lang}/{file}")
}

/// Turn a resource path into a flat cache file name.
pub fn sanitize_cache_name(path: &str) -> String {
    let flat: String = path
        .trim_matches('/')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if flat.ends_with(".json") {
        flat
    } else {
        format!("{flat}.json")
    }
}

pub struct CatalogCache {
    dir: PathBuf,
    source: Box<dyn CatalogSource>,
}

impl CatalogCache {
    pub fn new(dir: impl Into<PathBuf>, source: Box<dyn CatalogSource>) -> Self {
        Self {
            dir: dir.into(),
            source,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn cache_path(&self, path: &str) -> PathBuf {
        self.dir.join(sanitize_cache_name(path))
    }

    /// `latest` asks the catalog for its newest-first version list; anything else is returned as is.
    pub fn resolve_version(&self, requested: &str) -> String {
        if requested != LATEST_VERSION {
            return requested.to_string();
        }
        let newest = self
            .source
            .fetch_text(VERSIONS_PATH)
            .and_then(|raw| {
                serde_json::from_str::<Vec<String>>(&raw)
                    .map_err(|e| AdvisorError::parse("version list", e))
            })
            .map(|versions| versions.into_iter().next());
        match newest {
            Ok(Some(version)) => version,
            Ok(None) => {
                tracing::warn!(fallback = FALLBACK_VERSION, "catalog returned an empty version list");
                FALLBACK_VERSION.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, fallback = FALLBACK_VERSION, "could not resolve latest version");
                FALLBACK_VERSION.to_string()
            }
        }
    }

    /// Cached text if present, otherwise fetch, persist and return.
    pub fn get_text(&self, path: &str) -> Result<String, AdvisorError> {
        let cache_file = self.cache_path(path);
        if cache_file.exists() {
            tracing::debug!(path, "catalog cache hit");
            return fs::read_to_string(&cache_file)
                .map_err(|e| AdvisorError::cache(cache_file.display().to_string(), e));
        }
        self.fetch_and_store(path)
    }

    fn fetch_and_store(&self, path: &str) -> Result<String, AdvisorError> {
        tracing::info!(path, "catalog cache miss, fetching");
        let body = self.source.fetch_text(path)?;
        self.write_atomic(&self.cache_path(path), &body)?;
        Ok(body)
    }

    fn write_atomic(&self, target: &Path, body: &str) -> Result<(), AdvisorError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AdvisorError::cache(self.dir.display().to_string(), e))?;
        let file_name = target
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resource.json");
        let temp = self
            .dir
            .join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&temp, body).map_err(|e| AdvisorError::cache(temp.display().to_string(), e))?;
        if let Err(err) = fs::rename(&temp, target) {
            let _ = fs::remove_file(&temp);
            return Err(AdvisorError::cache(target.display().to_string(), err));
        }
        Ok(())
    }

    /// Read-through load; a cached file that no longer parses is fetched again.
    fn load<T, P>(&self, path: &str, parse: P) -> Result<T, AdvisorError>
    where
        P: Fn(&str) -> Result<T, AdvisorError>,
    {
        let text = self.get_text(path)?;
        match parse(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(path, error = %err, "cached resource unreadable, refetching");
                parse(&self.fetch_and_store(path)?)
            }
        }
    }

    pub fn get_entities(
        &self,
        version: &str,
        lang: &str,
    ) -> Result<HashMap<String, EntityRecord>, AdvisorError> {
        self.load(&resource_path(version, lang, ENTITY_FILE), parse_entities)
    }

    pub fn get_equipment(
        &self,
        version: &str,
        lang: &str,
    ) -> Result<BTreeMap<String, EquipmentRecord>, AdvisorError> {
        self.load(&resource_path(version, lang, EQUIPMENT_FILE), parse_equipment)
    }

    pub fn get_options(&self, version: &str, lang: &str) -> Result<Vec<OptionTree>, AdvisorError> {
        self.load(&resource_path(version, lang, OPTIONS_FILE), parse_options)
    }

    pub fn get_summoner_spells(
        &self,
        version: &str,
        lang: &str,
    ) -> Result<BTreeMap<String, SpellRecord>, AdvisorError> {
        self.load(&resource_path(version, lang, SPELLS_FILE), parse_spells)
    }

    /// Resolve `requested` and warm the cache with every resource for that version.
    pub fn ensure_version(&self, requested: &str, lang: &str) -> Result<String, AdvisorError> {
        let version = self.resolve_version(requested);
        for file in [ENTITY_FILE, EQUIPMENT_FILE, OPTIONS_FILE, SPELLS_FILE] {
            self.get_text(&resource_path(&version, lang, file))?;
        }
        tracing::info!(%version, lang, "catalog ready");
        Ok(version)
    }
}
