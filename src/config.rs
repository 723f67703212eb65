use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::AnalyzerConfig;
use crate::data::cache::DEFAULT_CACHE_DIR;
use crate::data::fetch::DEFAULT_CATALOG_BASE_URL;
use crate::error::AdvisorError;
use crate::intent::completion::{DEFAULT_CHAT_URL, DEFAULT_MODEL};

pub const DEFAULT_LANG: &str = "en_US";

pub const LANG_VAR: &str = "DDRAGON_LANG";
pub const CACHE_DIR_VAR: &str = "DRAFTWISE_CACHE_DIR";
pub const CATALOG_URL_VAR: &str = "DRAFTWISE_CATALOG_URL";
pub const INSECURE_TLS_VAR: &str = "DRAFTWISE_INSECURE_TLS";
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const MODEL_VAR: &str = "GROQ_MODEL";
pub const CHAT_URL_VAR: &str = "GROQ_CHAT_URL";
pub const CONFIG_PATH_VAR: &str = "DRAFTWISE_CONFIG";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub api_key: String,
    pub model: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lang: String,
    pub cache_dir: PathBuf,
    pub catalog_url: String,
    pub insecure_tls: bool,
    /// `None` when no credential is configured; intent extraction is then heuristic only.
    pub completion: Option<CompletionSettings>,
    pub analyzer: AnalyzerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            catalog_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            insecure_tls: false,
            completion: None,
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AdvisorError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdvisorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let completion = get(API_KEY_VAR).map(|api_key| CompletionSettings {
            api_key,
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            url: get(CHAT_URL_VAR).unwrap_or_else(|| DEFAULT_CHAT_URL.to_string()),
        });

        let analyzer = match get(CONFIG_PATH_VAR) {
            Some(path) => load_analyzer_config(Path::new(&path))?,
            None => AnalyzerConfig::default(),
        };

        Ok(Self {
            lang: get(LANG_VAR).unwrap_or_else(|| DEFAULT_LANG.to_string()),
            cache_dir: get(CACHE_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            catalog_url: get(CATALOG_URL_VAR)
                .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string()),
            insecure_tls: get(INSECURE_TLS_VAR)
                .map(|v| parse_flag(&v))
                .transpose()?
                .unwrap_or(false),
            completion,
            analyzer,
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool, AdvisorError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AdvisorError::Config(format!(
            "{INSECURE_TLS_VAR} must be a boolean, got '{other}'"
        ))),
    }
}

/// Parse and validate a YAML analyzer tuning file.
pub fn load_analyzer_config(path: &Path) -> Result<AnalyzerConfig, AdvisorError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AdvisorError::cache(path.display().to_string(), e))?;
    parse_analyzer_config(&raw)
        .map_err(|e| AdvisorError::Config(format!("{}: {e}", path.display())))
}

pub fn parse_analyzer_config(raw: &str) -> Result<AnalyzerConfig, String> {
    if raw.trim().is_empty() {
        return Ok(AnalyzerConfig::default());
    }
    let config: AnalyzerConfig = serde_yaml::from_str(raw).map_err(|e| e.to_string())?;
    let issues = config.validate();
    if issues.is_empty() {
        Ok(config)
    } else {
        Err(issues.join("; "))
    }
}
