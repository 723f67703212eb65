//! Per-process matchup session: the loaded catalog, the current matchup and
//! the last composition analysis. One instance lives for one worker run and is
//! passed by reference to every request handler.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{CompositionAnalyzer, CompositionSignals};
use crate::config::Settings;
use crate::data::cache::{CatalogCache, LATEST_VERSION};
use crate::data::catalog::Catalog;
use crate::data::fetch::{CatalogSource, HttpCatalogSource};
use crate::error::AdvisorError;
use crate::intent::{ChatCompletionClient, IntentExtractor, MatchupDescriptor, ROSTER_SIZE};
use crate::recommend::{
    plan_build, recommend_configuration, recommend_equipment, recommend_spells, unavailable_names,
    Archetype, ConfigurationBundle, EquipmentBundle, PlanBundle, SpellBundle,
};

pub const CATALOG_NOT_READY: &str = "Call fetch_static_data first.";
pub const MATCHUP_NOT_READY: &str = "Set enemy_team with matchup first.";

#[derive(Debug, Clone, Serialize)]
pub struct FetchSummary {
    pub ok: bool,
    pub version: String,
    pub lang: String,
    pub entities: usize,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchupSummary {
    pub ok: bool,
    pub matchup: MatchupDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub version: String,
    pub matchup: MatchupDescriptor,
    pub analysis: CompositionSignals,
    #[serde(flatten)]
    pub plan: PlanBundle,
    pub unresolved: Vec<String>,
    /// Recommended names the loaded catalog version does not contain.
    pub unavailable: Vec<String>,
}

pub struct Session {
    lang: String,
    cache: CatalogCache,
    analyzer: CompositionAnalyzer,
    extractor: IntentExtractor,
    catalog: Option<Catalog>,
    matchup: Option<MatchupDescriptor>,
    last_signals: Option<CompositionSignals>,
}

impl Session {
    pub fn new(settings: &Settings, source: Box<dyn CatalogSource>, extractor: IntentExtractor) -> Self {
        Self {
            lang: settings.lang.clone(),
            cache: CatalogCache::new(settings.cache_dir.clone(), source),
            analyzer: CompositionAnalyzer::new(settings.analyzer.clone()),
            extractor,
            catalog: None,
            matchup: None,
            last_signals: None,
        }
    }

    /// Live HTTP catalog source plus a completion client when a credential is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, AdvisorError> {
        let source = HttpCatalogSource::new(&settings.catalog_url, settings.insecure_tls)?;
        let extractor = match &settings.completion {
            Some(completion) => IntentExtractor::with_client(Box::new(ChatCompletionClient::new(
                &completion.url,
                &completion.api_key,
                &completion.model,
                settings.insecure_tls,
            )?)),
            None => IntentExtractor::heuristic_only(),
        };
        Ok(Self::new(settings, Box::new(source), extractor))
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn matchup(&self) -> Option<&MatchupDescriptor> {
        self.matchup.as_ref()
    }

    pub fn last_signals(&self) -> Option<&CompositionSignals> {
        self.last_signals.as_ref()
    }

    fn require_catalog(&self) -> Result<&Catalog, AdvisorError> {
        self.catalog
            .as_ref()
            .ok_or_else(|| AdvisorError::StateNotReady(CATALOG_NOT_READY.to_string()))
    }

    fn require_matchup(&self) -> Result<&MatchupDescriptor, AdvisorError> {
        self.matchup
            .as_ref()
            .filter(|m| !m.enemy_team.is_empty())
            .ok_or_else(|| AdvisorError::StateNotReady(MATCHUP_NOT_READY.to_string()))
    }

    /// Resolve the version, warm the cache and swap in the new catalog.
    pub fn fetch_static_data(
        &mut self,
        version: Option<&str>,
        lang: Option<&str>,
    ) -> Result<FetchSummary, AdvisorError> {
        if let Some(lang) = lang.map(str::trim).filter(|l| !l.is_empty()) {
            self.lang = lang.to_string();
        }
        let requested = version.unwrap_or(LATEST_VERSION);
        let resolved = self.cache.ensure_version(requested, &self.lang)?;
        let catalog = Catalog::load(&self.cache, &resolved, &self.lang)?;
        let summary = FetchSummary {
            ok: true,
            version: resolved,
            lang: self.lang.clone(),
            entities: catalog.entity_count(),
            fetched_at: Utc::now(),
        };
        self.catalog = Some(catalog);
        self.last_signals = None;
        Ok(summary)
    }

    pub fn set_matchup(&mut self, matchup: MatchupDescriptor) -> MatchupSummary {
        tracing::info!(
            ally = %matchup.ally_champion,
            archetype = %matchup.ally_characteristic,
            enemies = ?matchup.enemy_team,
            "matchup set"
        );
        self.matchup = Some(matchup.clone());
        self.last_signals = None;
        MatchupSummary { ok: true, matchup }
    }

    /// Interpret `text` without touching the session's matchup.
    pub fn extract_matchup(&self, text: &str) -> Result<MatchupDescriptor, AdvisorError> {
        self.extractor.extract(text)
    }

    pub fn set_matchup_from_text(&mut self, text: &str) -> Result<MatchupSummary, AdvisorError> {
        let matchup = self.extract_matchup(text)?;
        Ok(self.set_matchup(matchup))
    }

    /// Analyze `roster`, or the current matchup's roster when `None`.
    pub fn analyze(&mut self, roster: Option<&[String]>) -> Result<CompositionSignals, AdvisorError> {
        let catalog = self.require_catalog()?;
        let signals = match roster {
            Some(roster) => {
                if roster.len() != ROSTER_SIZE {
                    return Err(AdvisorError::InvalidParams(format!(
                        "enemy_team must list exactly {ROSTER_SIZE} champions, got {}",
                        roster.len()
                    )));
                }
                self.analyzer.analyze(catalog, roster)
            }
            None => {
                let matchup = self.require_matchup()?;
                self.analyzer.analyze(catalog, &matchup.enemy_team)
            }
        };
        self.last_signals = Some(signals.clone());
        Ok(signals)
    }

    /// Explicit archetype wins over the matchup's; the last analysis is reused when present.
    fn suggestion_inputs(
        &mut self,
        archetype: Option<Archetype>,
    ) -> Result<(Archetype, CompositionSignals), AdvisorError> {
        self.require_catalog()?;
        let archetype = match archetype {
            Some(archetype) => archetype,
            None => self.require_matchup()?.ally_characteristic,
        };
        let signals = match self.last_signals.clone() {
            Some(signals) => signals,
            None => self.analyze(None)?,
        };
        Ok((archetype, signals))
    }

    pub fn suggest_runes(&mut self, archetype: Option<Archetype>) -> Result<ConfigurationBundle, AdvisorError> {
        let (archetype, signals) = self.suggestion_inputs(archetype)?;
        Ok(recommend_configuration(archetype, &signals))
    }

    pub fn suggest_summoners(&mut self, archetype: Option<Archetype>) -> Result<SpellBundle, AdvisorError> {
        let (archetype, signals) = self.suggestion_inputs(archetype)?;
        Ok(recommend_spells(archetype, &signals))
    }

    pub fn suggest_items(&mut self, archetype: Option<Archetype>) -> Result<EquipmentBundle, AdvisorError> {
        let (archetype, signals) = self.suggestion_inputs(archetype)?;
        Ok(recommend_equipment(archetype, &signals))
    }

    /// Set the matchup, analyze it and produce all three bundles in one step.
    pub fn plan_build(&mut self, matchup: MatchupDescriptor) -> Result<PlanReport, AdvisorError> {
        self.require_catalog()?;
        self.set_matchup(matchup.clone());
        let signals = self.analyze(None)?;
        let catalog = self.require_catalog()?;
        let plan = plan_build(matchup.ally_characteristic, &signals);
        let unavailable = unavailable_names(&plan, catalog);
        if !unavailable.is_empty() {
            tracing::warn!(version = %catalog.version, missing = ?unavailable, "recommended names absent from catalog");
        }
        Ok(PlanReport {
            version: catalog.version.clone(),
            matchup,
            unresolved: signals.unresolved.clone(),
            analysis: signals,
            plan,
            unavailable,
        })
    }
}
