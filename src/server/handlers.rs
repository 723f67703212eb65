use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AdvisorError;
use crate::intent::MatchupDescriptor;
use crate::recommend::Archetype;
use crate::server::rpc::{RpcRequest, RpcResponse};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    FetchStaticData,
    Matchup,
    AnalyzeEnemies,
    SuggestRunes,
    SuggestSummoners,
    SuggestItems,
    PlanBuild,
}

impl Method {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "fetch_static_data" => Some(Self::FetchStaticData),
            "matchup" | "set_matchup" => Some(Self::Matchup),
            "analyze_enemies" | "analyze_enemy_comp" => Some(Self::AnalyzeEnemies),
            "suggest_runes" => Some(Self::SuggestRunes),
            "suggest_summoners" => Some(Self::SuggestSummoners),
            "suggest_items" => Some(Self::SuggestItems),
            "plan_build" => Some(Self::PlanBuild),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FetchParams {
    ddragon_version: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchupParams {
    text: Option<String>,
    ally_champion: Option<String>,
    ally_characteristic: Option<String>,
    enemy_team: Option<Vec<String>>,
}

impl MatchupParams {
    fn take_text(&mut self) -> Option<String> {
        self.text.take().filter(|t| !t.trim().is_empty())
    }

    fn explicit(self) -> Result<MatchupDescriptor, AdvisorError> {
        match (self.ally_champion, self.ally_characteristic, self.enemy_team) {
            (Some(ally), Some(archetype), Some(team)) => MatchupDescriptor::new(&ally, &archetype, &team),
            _ => Err(AdvisorError::InvalidParams(
                "expected either text or ally_champion, ally_characteristic and enemy_team".to_string(),
            )),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeParams {
    enemy_team: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestParams {
    ally_characteristic: Option<String>,
}

impl SuggestParams {
    fn archetype(&self) -> Result<Option<Archetype>, AdvisorError> {
        self.ally_characteristic
            .as_deref()
            .map(str::parse::<Archetype>)
            .transpose()
    }
}

fn read_params<T: DeserializeOwned>(params: Value) -> Result<T, AdvisorError> {
    serde_json::from_value(params).map_err(|e| AdvisorError::InvalidParams(e.to_string()))
}

fn to_value<T: serde::Serialize>(payload: &T) -> Result<Value, AdvisorError> {
    Ok(serde_json::to_value(payload)?)
}

pub fn dispatch(session: &mut Session, method: Method, params: Value) -> Result<Value, AdvisorError> {
    match method {
        Method::FetchStaticData => {
            let params: FetchParams = read_params(params)?;
            to_value(&session.fetch_static_data(params.ddragon_version.as_deref(), params.lang.as_deref())?)
        }
        Method::Matchup => {
            let mut params: MatchupParams = read_params(params)?;
            let summary = match params.take_text() {
                Some(text) => session.set_matchup_from_text(&text)?,
                None => session.set_matchup(params.explicit()?),
            };
            to_value(&summary)
        }
        Method::AnalyzeEnemies => {
            let params: AnalyzeParams = read_params(params)?;
            to_value(&session.analyze(params.enemy_team.as_deref())?)
        }
        Method::SuggestRunes => {
            let params: SuggestParams = read_params(params)?;
            to_value(&session.suggest_runes(params.archetype()?)?)
        }
        Method::SuggestSummoners => {
            let params: SuggestParams = read_params(params)?;
            to_value(&session.suggest_summoners(params.archetype()?)?)
        }
        Method::SuggestItems => {
            let params: SuggestParams = read_params(params)?;
            to_value(&session.suggest_items(params.archetype()?)?)
        }
        Method::PlanBuild => {
            let mut params: MatchupParams = read_params(params)?;
            let matchup = match params.take_text() {
                Some(text) => session.extract_matchup(&text)?,
                None => params.explicit()?,
            };
            to_value(&session.plan_build(matchup)?)
        }
    }
}

/// Run one request against the session and build its response.
pub fn handle_request(session: &mut Session, request: RpcRequest) -> RpcResponse {
    let params = request.params_object();
    let outcome = match Method::parse(&request.method) {
        Some(method) => {
            tracing::info!(method = %request.method, "dispatching request");
            dispatch(session, method, params)
        }
        None => Err(AdvisorError::MethodNotFound(request.method.clone())),
    };
    match outcome {
        Ok(result) => RpcResponse::success(request.id, result),
        Err(err) => {
            tracing::warn!(method = %request.method, code = err.code().as_i64(), error = %err, "request failed");
            RpcResponse::failure(request.id, &err)
        }
    }
}

/// Parse one input line and handle it; unreadable lines yield a parse-error response with a null id.
pub fn handle_line(session: &mut Session, line: &str) -> RpcResponse {
    match serde_json::from_str::<RpcRequest>(line) {
        Ok(request) => handle_request(session, request),
        Err(err) => {
            let err = AdvisorError::parse("request line", err);
            tracing::warn!(error = %err, "unreadable request");
            RpcResponse::failure(None, &err)
        }
    }
}
