use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Note attached to results delivered through the text fallback of an embed.
pub const EMBED_FALLBACK_NOTE: &str = "Embed not supported, sent as text";

/// Outcome of one member of a broadcast.
///
/// Exactly one of `result` / `error` is set, matching `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub success: bool,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the member was served through a degraded path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BroadcastResult {
    pub fn ok(platform: impl Into<String>, result: Value) -> Self {
        Self {
            success: true,
            platform: platform.into(),
            result: Some(result),
            error: None,
            note: None,
        }
    }

    pub fn failed(platform: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            platform: platform.into(),
            result: None,
            error: Some(error.into()),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Aggregate outcome of a broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastSummary {
    pub group_name: String,
    /// Number of members when the broadcast started.
    pub total_clients: usize,
    /// Outcome per member alias.
    pub results: HashMap<String, BroadcastResult>,
}

impl BroadcastSummary {
    /// Number of members that delivered successfully.
    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|r| r.success).count()
    }

    /// Number of members that failed.
    pub fn failed(&self) -> usize {
        self.results.values().filter(|r| !r.success).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.values().all(|r| r.success)
    }

    /// Aliases of the failed members, sorted.
    pub fn failed_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .results
            .iter()
            .filter(|(_, r)| !r.success)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }
}

/// Outcome of a connection test for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConnectionResult {
    pub platform: String,
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
