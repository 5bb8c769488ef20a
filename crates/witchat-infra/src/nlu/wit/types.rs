//! wit.ai wire types.
//!
//! Only the fields the classifier needs are typed; entity and trait payloads
//! are kept as raw JSON since their shape depends on the entity definition.

use std::collections::BTreeMap;

use serde::Deserialize;

use witchat_types::intent::{Classification, Intent};

/// Response body of `GET /message`.
#[derive(Debug, Deserialize)]
pub struct WitMessageResponse {
    #[serde(default)]
    pub text: Option<String>,
    /// Required: a body without `intents` is not a classification.
    pub intents: Vec<WitIntent>,
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub traits: BTreeMap<String, Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct WitIntent {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub confidence: f64,
}

/// Error body wit.ai returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct WitErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl From<WitMessageResponse> for Classification {
    fn from(resp: WitMessageResponse) -> Self {
        Classification {
            text: resp.text,
            intents: resp
                .intents
                .into_iter()
                .map(|i| Intent {
                    id: i.id,
                    name: i.name,
                    confidence: i.confidence,
                })
                .collect(),
            entities: resp.entities,
            traits: resp.traits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "text": "quiero una pizza para hoy",
            "intents": [
                {"id": "1", "name": "order_food", "confidence": 0.97},
                {"id": "2", "name": "greet", "confidence": 0.01}
            ],
            "entities": {
                "food:food": [{"body": "pizza", "confidence": 0.9, "value": "pizza"}]
            },
            "traits": {}
        }"#;
        let resp: WitMessageResponse = serde_json::from_str(json).unwrap();
        let c = Classification::from(resp);
        assert_eq!(c.intents.len(), 2);
        assert_eq!(c.top_intent().unwrap().name, "order_food");
        assert_eq!(c.entities["food:food"][0]["value"], "pizza");
    }

    #[test]
    fn test_missing_intents_is_error() {
        let result = serde_json::from_str::<WitMessageResponse>(r#"{"text": "hola", "entities": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_body() {
        let body: WitErrorBody =
            serde_json::from_str(r#"{"error": "Bad auth, check token/params", "code": "no-auth"}"#)
                .unwrap();
        assert_eq!(body.code.as_deref(), Some("no-auth"));
    }
}
