//! Wire format of the classification endpoint.
//!
//! Request: `{"text": "<user message>"}`.
//! Response: `{"response": "<reply text>", "prediction": "<4-letter code>"}`.

use serde::{Deserialize, Serialize};

/// Body POSTed to the classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

impl ClassifyRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Successful classifier reply. Both fields are required; any other shape
/// is a protocol failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub response: String,
    pub prediction: String,
}
