use crate::session::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /get_response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub session_id: SessionId,
    pub question: String,
}

/// Success body. Only `answer` is read and its shape is not checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Value,
}

/// Error body the backend sends alongside a 400.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl QueryRequest {
    pub fn new(session_id: SessionId, question: impl Into<String>) -> Self {
        Self {
            session_id,
            question: question.into(),
        }
    }
}

impl QueryResponse {
    /// Text to display: strings verbatim, a missing or null answer as empty,
    /// anything else as its JSON text.
    pub fn answer_text(&self) -> String {
        match &self.answer {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
