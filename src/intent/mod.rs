//! Free text -> matchup descriptor.

pub mod completion;
pub mod heuristic;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::recommend::Archetype;

pub use completion::{extract_json_object, ChatCompletionClient, CompletionClient};
pub use heuristic::parse_intent_heuristic;

pub const ROSTER_SIZE: usize = 5;

pub const INTENT_SYSTEM_PROMPT: &str = r#"You are a strict intent extractor for League of Legends.
Input: free text like "I want to play Darius tank against Garen, Maokai, Ahri, Jinx, Lulu".
Output only a JSON object:
{"ally_champion":"<string>","ally_characteristic":"AD|AP|TANK","enemy_team":["<5 champions>"]}"#;

/// Ally identity, archetype and the five opposing identities, all normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupDescriptor {
    pub ally_champion: String,
    pub ally_characteristic: Archetype,
    pub enemy_team: Vec<String>,
}

impl MatchupDescriptor {
    /// Strict constructor for explicit input: roster must have exactly [ROSTER_SIZE] entries.
    pub fn new(
        ally_champion: &str,
        ally_characteristic: &str,
        enemy_team: &[String],
    ) -> Result<Self, AdvisorError> {
        let archetype = ally_characteristic.parse::<Archetype>()?;
        if enemy_team.len() != ROSTER_SIZE {
            return Err(AdvisorError::InvalidParams(format!(
                "enemy_team must list exactly {ROSTER_SIZE} champions, got {}",
                enemy_team.len()
            )));
        }
        let ally = ally_champion.trim().to_lowercase();
        if ally.is_empty() {
            return Err(AdvisorError::InvalidParams(
                "ally_champion must not be empty".to_string(),
            ));
        }
        Ok(Self {
            ally_champion: ally,
            ally_characteristic: archetype,
            enemy_team: enemy_team.iter().map(|e| e.trim().to_lowercase()).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CompletionIntent {
    ally_champion: String,
    ally_characteristic: String,
    #[serde(default)]
    enemy_team: Vec<String>,
}

/// Read completion output into a descriptor; any shape problem is `MalformedResponse`.
pub fn interpret_completion(content: &str) -> Result<MatchupDescriptor, AdvisorError> {
    let value = extract_json_object(content)
        .ok_or_else(|| AdvisorError::MalformedResponse("no JSON object in completion".to_string()))?;
    let intent: CompletionIntent = serde_json::from_value(value)
        .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
    let archetype = intent
        .ally_characteristic
        .parse::<Archetype>()
        .map_err(|e| AdvisorError::MalformedResponse(e.to_string()))?;
    let ally = intent.ally_champion.trim().to_lowercase();
    if ally.is_empty() {
        return Err(AdvisorError::MalformedResponse(
            "empty ally_champion".to_string(),
        ));
    }
    let roster = intent
        .enemy_team
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();
    Ok(MatchupDescriptor {
        ally_champion: ally,
        ally_characteristic: archetype,
        enemy_team: heuristic::pad_roster(roster),
    })
}

/// Uses the completion service when one is configured, the heuristic otherwise.
#[derive(Default)]
pub struct IntentExtractor {
    client: Option<Box<dyn CompletionClient>>,
}

impl IntentExtractor {
    pub fn heuristic_only() -> Self {
        Self { client: None }
    }

    pub fn with_client(client: Box<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Upstream failures propagate; unreadable completion output falls back to the heuristic.
    pub fn extract(&self, text: &str) -> Result<MatchupDescriptor, AdvisorError> {
        let Some(client) = &self.client else {
            tracing::debug!("no completion credential configured, using heuristic intent parse");
            return Ok(parse_intent_heuristic(text));
        };
        let content = client.complete(INTENT_SYSTEM_PROMPT, text)?;
        match interpret_completion(&content) {
            Ok(descriptor) => Ok(descriptor),
            Err(err) => {
                tracing::warn!(error = %err, "completion output unusable, using heuristic intent parse");
                Ok(parse_intent_heuristic(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{interpret_completion, CompletionClient, IntentExtractor, MatchupDescriptor};
    use crate::error::{AdvisorError, ErrorCode};
    use crate::recommend::Archetype;

    struct CannedClient(Result<String, ()>);

    impl CompletionClient for CannedClient {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, AdvisorError> {
            self.0
                .clone()
                .map_err(|_| AdvisorError::upstream("chat completion", "HTTP 503"))
        }
    }

    #[test]
    fn completion_output_is_normalized() {
        let m = interpret_completion(
            r#"{"ally_champion":"Darius","ally_characteristic":"tank","enemy_team":["Garen","Maokai","Ahri","Jinx","Lulu","Extra"]}"#,
        )
        .unwrap();
        assert_eq!(m.ally_champion, "darius");
        assert_eq!(m.ally_characteristic, Archetype::Tank);
        assert_eq!(m.enemy_team, vec!["garen", "maokai", "ahri", "jinx", "lulu"]);
    }

    #[test]
    fn prose_wrapped_completion_is_recovered() {
        let extractor = IntentExtractor::with_client(Box::new(CannedClient(Ok(
            "Here: {\"ally_champion\":\"Lux\",\"ally_characteristic\":\"AP\",\"enemy_team\":[\"Zed\"]}".to_string(),
        ))));
        let m = extractor.extract("ignored").unwrap();
        assert_eq!(m.ally_champion, "lux");
        assert_eq!(m.enemy_team.len(), 5);
        assert_eq!(m.enemy_team[0], "zed");
    }

    #[test]
    fn malformed_completion_falls_back_to_heuristic() {
        let extractor = IntentExtractor::with_client(Box::new(CannedClient(Ok("I cannot help".to_string()))));
        let m = extractor
            .extract("I want to play Garen tank against Zed, Ahri, Lux, Jinx, Thresh")
            .unwrap();
        assert_eq!(m.ally_champion, "garen");
        assert_eq!(m.enemy_team, vec!["zed", "ahri", "lux", "jinx", "thresh"]);
    }

    #[test]
    fn upstream_failure_is_propagated() {
        let extractor = IntentExtractor::with_client(Box::new(CannedClient(Err(()))));
        let err = extractor.extract("play garen").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UpstreamFetch);
    }

    #[test]
    fn explicit_input_requires_five_and_known_archetype() {
        let four: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            MatchupDescriptor::new("Darius", "TANK", &four).unwrap_err().code(),
            ErrorCode::InvalidParams
        );
        let five: Vec<String> = ["A", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            MatchupDescriptor::new("Darius", "jungle", &five).unwrap_err().code(),
            ErrorCode::InvalidArgument
        );
        let m = MatchupDescriptor::new("Darius", "tank", &five).unwrap();
        assert_eq!(m.enemy_team[0], "a");
    }
}
