//! Wire types for the chat backend.
//!
//! These mirror the JSON bodies exchanged with `/api/chat` and the emergency
//! endpoints. Field names follow the backend (snake_case), so no renames are
//! needed beyond the status enum.

use serde::{Deserialize, Serialize};

/// Request body for `/api/chat` and `/api/emergency/check`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub question: String,
    /// Reserved by the backend for multi-turn conversations. Serialized as `null` when unset.
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            session_id: None,
        }
    }
}

/// Top-level outcome reported by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Emergency,
    Error,
}

/// One titled block of a structured answer (symptom analysis, advice, ...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Payload carried by `ok` and `emergency` responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponseData {
    pub answer: String,
    #[serde(default)]
    pub sections: Option<Vec<AnswerSection>>,
    /// Where the answer came from: "kg", "deepseek", "mixed", "system" or "unknown".
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub elapsed_ms: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

/// Response body for `/api/chat` and `/api/emergency/check`.
///
/// The backend is expected to fill exactly one of `data` / `error`, but both
/// may be missing; callers treat that as an application error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub data: Option<ChatResponseData>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

impl ChatResponse {
    pub fn ok(answer: impl Into<String>) -> Self {
        Self::with_data(ResponseStatus::Ok, answer)
    }

    pub fn emergency(answer: impl Into<String>) -> Self {
        Self::with_data(ResponseStatus::Emergency, answer)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(ErrorInfo {
                code: code.into(),
                message: message.into(),
            }),
        }
    }

    fn with_data(status: ResponseStatus, answer: impl Into<String>) -> Self {
        Self {
            status,
            data: Some(ChatResponseData {
                answer: answer.into(),
                sections: None,
                source: None,
                elapsed_ms: None,
            }),
            error: None,
        }
    }
}

/// Per-question verdict from `/api/emergency/batch-check`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BatchCheckResult {
    pub question: String,
    pub is_emergency: bool,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchCheckResponse {
    pub results: Vec<BatchCheckResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_missing_session_as_null() {
        let json = serde_json::to_value(ChatRequest::new("头痛怎么办")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"question": "头痛怎么办", "session_id": null})
        );
    }

    #[test]
    fn full_ok_response_parses() {
        let body = r#"{
            "status": "ok",
            "data": {
                "answer": "Drink water and rest.",
                "sections": [
                    {"title": "Advice", "content": "Rest", "icon": "💡"},
                    {"title": "When to see a doctor", "content": "Fever over 3 days"}
                ],
                "source": "kg",
                "elapsed_ms": 1234
            },
            "error": null
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, ResponseStatus::Ok);
        let data = response.data.unwrap();
        assert_eq!(data.answer, "Drink water and rest.");
        let sections = data.sections.unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].icon, None);
        assert_eq!(data.source.as_deref(), Some("kg"));
        assert_eq!(data.elapsed_ms, Some(1234));
        assert!(response.error.is_none());
    }

    #[test]
    fn error_response_without_data_field_parses() {
        let body = r#"{"status": "error", "error": {"code": "E1", "message": "Z"}}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, ResponseStatus::Error);
        assert!(response.data.is_none());
        assert_eq!(response.error.unwrap().message, "Z");
    }

    #[test]
    fn bare_status_parses_with_both_payloads_absent() {
        let response: ChatResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(response.data.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_str::<ChatResponse>(r#"{"status": "pending"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn batch_check_response_parses() {
        let body = r#"{"results": [
            {"question": "有点头痛", "is_emergency": false, "matched_keywords": []},
            {"question": "胸痛，呼吸困难", "is_emergency": true, "matched_keywords": ["胸痛", "呼吸困难"]}
        ]}"#;
        let response: BatchCheckResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 2);
        assert!(response.results[1].is_emergency);
        assert_eq!(response.results[1].matched_keywords, vec!["胸痛", "呼吸困难"]);
    }
}
