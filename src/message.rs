// src/message.rs
use serde::{Deserialize, Serialize};

/// Body of `POST /api/embed/{embedId}/chat`. Wire names are camelCase.
///
/// `message` and `sessionId` are required but modeled as options so that a
/// missing field is reported as a 400 by the handler instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// Identity of the authenticated caller, when one exists.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CallerMetadata {
    pub username: String,
}

/// Inserted into request extensions by the caller-identity middleware.
/// `None` means the request came from an unauthenticated visitor.
#[derive(Clone, Debug, Default)]
pub struct AuthSession(pub Option<CallerMetadata>);
