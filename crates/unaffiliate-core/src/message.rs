//! Request/response messages exchanged with the background context.
//!
//! Requests are tagged on `action`; an unknown action fails to deserialize
//! instead of being silently ignored.

use serde::{Deserialize, Serialize};

use crate::stats::Counters;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// `{"action":"cleanUrl","url":"..."}`
    CleanUrl { url: String },
    /// `{"action":"linkCleaned"}`: a caller cleaned a link on its own.
    LinkCleaned,
    /// `{"action":"getStats"}`
    GetStats,
    /// `{"action":"navigationStarted"}`
    NavigationStarted,
    /// `{"action":"ruleMatched"}`: a network rule rewrote a request.
    RuleMatched,
}

impl Request {
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

/// Untagged; each variant serializes to the bare object the caller expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// `{"cleanUrl":"..."}`
    CleanUrl {
        #[serde(rename = "cleanUrl")]
        clean_url: String,
    },
    /// `{"success":true}`
    Ack { success: bool },
    /// `{"error":"..."}`
    Error { error: String },
    /// `{"totalCleaned":n,"lastPageCleaned":m}`
    Stats(Counters),
}

impl Response {
    pub fn ack() -> Self {
        Response::Ack { success: true }
    }

    pub fn to_json(&self) -> String {
        // Every variant is a flat object of strings, bools and integers.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"unserializable"}"#.to_string())
    }
}
