//! Validation server response and the debug hit record.

use serde::{Deserialize, Serialize};

/// Result of a debug hit: what was sent, from where, and what came back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugHit {
    /// Encoded form body
    pub payload: String,
    /// `file:line` of the code that issued the hit
    pub caller_location: String,
    /// Parsed response body
    pub response: serde_json::Value,
}

impl DebugHit {
    /// Typed view of [`response`](Self::response).
    pub fn parsed(&self) -> Result<DebugResponse, serde_json::Error> {
        DebugResponse::deserialize(&self.response)
    }
}

/// Body returned by the debug endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    #[serde(default)]
    pub hit_parsing_result: Vec<HitParsingResult>,
    #[serde(default)]
    pub parser_message: Vec<ParserMessage>,
}

impl DebugResponse {
    /// True when every parsed hit was accepted.
    pub fn all_valid(&self) -> bool {
        !self.hit_parsing_result.is_empty() && self.hit_parsing_result.iter().all(|r| r.valid)
    }
}

/// Verdict for one hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitParsingResult {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub hit: String,
    #[serde(default)]
    pub parser_message: Vec<ParserMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserMessage {
    #[serde(default)]
    pub message_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_validation_body() {
        let body = json!({
            "hitParsingResult": [{
                "valid": false,
                "parserMessage": [{
                    "messageType": "ERROR",
                    "description": "The value provided for parameter 'tid' is invalid.",
                    "messageCode": "VALUE_INVALID",
                    "parameter": "tid"
                }],
                "hit": "/debug/collect?v=1&tid=UA-XXXXX-Y&t=pageview"
            }],
            "parserMessage": [{
                "messageType": "INFO",
                "description": "Found 1 hit in the request."
            }]
        });
        let hit = DebugHit {
            payload: "v=1".to_string(),
            caller_location: "src/lib.rs:1".to_string(),
            response: body,
        };

        let parsed = hit.parsed().unwrap();
        assert!(!parsed.all_valid());
        assert_eq!(parsed.hit_parsing_result.len(), 1);
        let msg = &parsed.hit_parsing_result[0].parser_message[0];
        assert_eq!(msg.parameter.as_deref(), Some("tid"));
        assert_eq!(parsed.parser_message[0].message_type, "INFO");
    }

    #[test]
    fn test_empty_result_is_not_valid() {
        assert!(!DebugResponse::default().all_valid());
    }
}
