//! Request and response bodies for `POST /ask`

use serde::{Deserialize, Serialize};

use crate::domain::semantic_cache::LookupResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub query: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
    pub meta: AskMeta,
}

/// Lookup metadata shown next to each answer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskMeta {
    pub hit: bool,
    pub score: f64,
    /// Milliseconds
    pub latency: u64,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_latency: Option<u64>,
}

impl From<LookupResult> for AskResponse {
    fn from(result: LookupResult) -> Self {
        Self {
            meta: AskMeta {
                hit: result.hit,
                score: result.score,
                latency: result.latency_ms,
                model: result.source.label().to_string(),
                saved_latency: result.saved_latency_ms,
            },
            response: result.response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_optional_fields() {
        let request: AskRequest = serde_json::from_str(r#"{"query": "pwa"}"#).unwrap();

        assert_eq!(request.query, "pwa");
        assert!(request.threshold.is_none());
        assert!(request.session_id.is_none());

        let request: AskRequest =
            serde_json::from_str(r#"{"query": "pwa", "threshold": 0.8, "sessionId": "tab-2"}"#)
                .unwrap();

        assert_eq!(request.threshold, Some(0.8));
        assert_eq!(request.session_id.as_deref(), Some("tab-2"));
    }

    #[test]
    fn test_hit_response_shape() {
        let result = LookupResult::hit(0.93, "cached text", "semantic cache", 18, 950);

        let json = serde_json::to_value(AskResponse::from(result)).unwrap();

        assert_eq!(json["response"], "cached text");
        assert_eq!(json["meta"]["hit"], true);
        assert_eq!(json["meta"]["latency"], 18);
        assert_eq!(json["meta"]["model"], "cached");
        assert_eq!(json["meta"]["savedLatency"], 950);
    }

    #[test]
    fn test_miss_response_omits_saved_latency() {
        let result = LookupResult::miss(0.35, "generated text", 1100);

        let json = serde_json::to_value(AskResponse::from(result)).unwrap();

        assert_eq!(json["meta"]["hit"], false);
        assert_eq!(json["meta"]["model"], "gpt-5-nano");
        assert!(json["meta"].get("savedLatency").is_none());
    }
}
