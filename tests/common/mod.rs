#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use draftwise::config::Settings;
use draftwise::data::cache::VERSIONS_PATH;
use draftwise::data::{Catalog, CatalogCache, CatalogSource};
use draftwise::error::AdvisorError;
use draftwise::intent::IntentExtractor;
use draftwise::session::Session;

pub const FIXTURE_VERSION: &str = "15.1.1";
pub const CANONICAL_ROSTER: [&str; 5] = ["garen", "maokai", "ahri", "jinx", "lulu"];

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Serves catalog paths from `tests/fixtures` by file name and records every request.
#[derive(Clone)]
pub struct FixtureSource {
    dir: PathBuf,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self {
            dir: fixture_dir(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log").clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }
}

impl CatalogSource for FixtureSource {
    fn fetch_text(&self, path: &str) -> Result<String, AdvisorError> {
        self.requests.lock().expect("request log").push(path.to_string());
        let file = if path == VERSIONS_PATH {
            "versions.json"
        } else {
            path.rsplit('/').next().unwrap_or_default()
        };
        std::fs::read_to_string(self.dir.join(file))
            .map_err(|e| AdvisorError::upstream(path, format!("HTTP 404: {e}")))
    }
}

/// Always fails, like an unreachable catalog.
pub struct OfflineSource;

impl CatalogSource for OfflineSource {
    fn fetch_text(&self, path: &str) -> Result<String, AdvisorError> {
        Err(AdvisorError::upstream(path, "connection refused"))
    }
}

pub fn fixture_cache(dir: &Path) -> (CatalogCache, FixtureSource) {
    let source = FixtureSource::new();
    (CatalogCache::new(dir, Box::new(source.clone())), source)
}

pub fn fixture_catalog() -> Catalog {
    let temp = tempfile::tempdir().expect("temp dir");
    let (cache, _) = fixture_cache(temp.path());
    Catalog::load(&cache, FIXTURE_VERSION, "en_US").expect("fixture catalog")
}

pub fn fixture_session(cache_dir: &Path) -> Session {
    let settings = Settings {
        cache_dir: cache_dir.to_path_buf(),
        ..Settings::default()
    };
    Session::new(&settings, Box::new(FixtureSource::new()), IntentExtractor::heuristic_only())
}

pub fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
