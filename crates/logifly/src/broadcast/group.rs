use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::summary::{BroadcastResult, BroadcastSummary, EMBED_FALLBACK_NOTE, TestConnectionResult};
use crate::clients::{EmbedOptions, Message, PlatformClient, SendOptions, Severity};
use crate::{Error, Result};

/// Message sent to check clients without a dedicated connection test.
const FALLBACK_TEST_MESSAGE: &str = "Test";

#[derive(Clone)]
struct ClientEntry {
    client: Arc<dyn PlatformClient>,
    alias: String,
    platform: String,
}

/// Public view of a group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub alias: String,
    pub platform: String,
}

/// A named set of platform clients targeted together.
pub struct BroadcastGroup {
    name: String,
    clients: Vec<ClientEntry>,
}

impl std::fmt::Debug for BroadcastGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastGroup")
            .field("name", &self.name)
            .field("clients", &self.list_clients())
            .finish()
    }
}

impl BroadcastGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clients: Vec::new(),
        }
    }

    /// Create a group and register `clients` with default aliases.
    pub fn with_clients<I>(name: impl Into<String>, clients: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn PlatformClient>>,
    {
        let mut group = Self::new(name);
        for client in clients {
            group.add_client(client, None)?;
        }
        Ok(group)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a client.
    ///
    /// Without an alias the member is named `client_{n}` where `n` is its
    /// position at insertion time. Explicit aliases are not checked for
    /// uniqueness.
    pub fn add_client(
        &mut self,
        client: Arc<dyn PlatformClient>,
        alias: Option<&str>,
    ) -> Result<&mut Self> {
        if !client.can_send() {
            return Err(Error::config("Invalid client: must have a send() method"));
        }

        let alias = match alias {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => format!("client_{}", self.clients.len() + 1),
        };
        let platform = client.platform().to_string();

        debug!(group = %self.name, alias = %alias, platform = %platform, "Client added");
        self.clients.push(ClientEntry {
            client,
            alias,
            platform,
        });

        Ok(self)
    }

    /// Remove the first member with `alias`. Returns whether one was removed.
    pub fn remove_client(&mut self, alias: &str) -> bool {
        match self.clients.iter().position(|c| c.alias == alias) {
            Some(index) => {
                self.clients.remove(index);
                debug!(group = %self.name, alias = %alias, "Client removed");
                true
            }
            None => false,
        }
    }

    /// Send `message` to every member concurrently.
    pub async fn broadcast(&self, message: &Message, options: &SendOptions) -> BroadcastSummary {
        self.fan_out("message", |entry| async move {
            match entry.client.send(message, options).await {
                Ok(result) => BroadcastResult::ok(entry.platform, result),
                Err(e) => BroadcastResult::failed(entry.platform, e.to_string()),
            }
        })
        .await
    }

    /// Send an embed to every member concurrently.
    ///
    /// Members without embed support receive a text rendering instead and
    /// their result carries [`EMBED_FALLBACK_NOTE`].
    pub async fn broadcast_embed(&self, embed: &EmbedOptions) -> BroadcastSummary {
        self.fan_out("embed", |entry| async move {
            match entry.client.as_embed_sender() {
                Some(sender) => match sender.send_embed(embed).await {
                    Ok(result) => BroadcastResult::ok(entry.platform, result),
                    Err(e) => BroadcastResult::failed(entry.platform, e.to_string()),
                },
                None => {
                    let text = Message::text(embed.to_text());
                    match entry.client.send(&text, &SendOptions::default()).await {
                        Ok(result) => BroadcastResult::ok(entry.platform, result)
                            .with_note(EMBED_FALLBACK_NOTE),
                        Err(e) => BroadcastResult::failed(entry.platform, e.to_string()),
                    }
                }
            }
        })
        .await
    }

    /// Broadcast a severity-styled embed.
    pub async fn broadcast_severity(
        &self,
        severity: Severity,
        title: &str,
        description: &str,
    ) -> BroadcastSummary {
        self.broadcast_embed(&EmbedOptions::severity(severity, title, description))
            .await
    }

    pub async fn broadcast_success(&self, title: &str, description: &str) -> BroadcastSummary {
        self.broadcast_severity(Severity::Success, title, description)
            .await
    }

    pub async fn broadcast_error(&self, title: &str, description: &str) -> BroadcastSummary {
        self.broadcast_severity(Severity::Error, title, description)
            .await
    }

    pub async fn broadcast_warning(&self, title: &str, description: &str) -> BroadcastSummary {
        self.broadcast_severity(Severity::Warning, title, description)
            .await
    }

    pub async fn broadcast_info(&self, title: &str, description: &str) -> BroadcastSummary {
        self.broadcast_severity(Severity::Info, title, description)
            .await
    }

    /// Check every member's connectivity concurrently.
    ///
    /// Clients without a dedicated check are checked with a plain `"Test"`
    /// message; a failed send reports `connected: false` without an error.
    pub async fn test_connections(&self) -> HashMap<String, TestConnectionResult> {
        let members = self.clients.clone();
        debug!(group = %self.name, members = members.len(), "Testing connections");

        let checks = members.into_iter().map(|entry| async move {
            let outcome = match entry.client.as_connection_tester() {
                Some(tester) => match tester.test_connection().await {
                    Ok(connected) => TestConnectionResult {
                        platform: entry.platform,
                        connected,
                        error: None,
                    },
                    Err(e) => TestConnectionResult {
                        platform: entry.platform,
                        connected: false,
                        error: Some(e.to_string()),
                    },
                },
                None => {
                    let connected = entry
                        .client
                        .send(&Message::text(FALLBACK_TEST_MESSAGE), &SendOptions::default())
                        .await
                        .is_ok();
                    TestConnectionResult {
                        platform: entry.platform,
                        connected,
                        error: None,
                    }
                }
            };
            (entry.alias, outcome)
        });

        let results: HashMap<String, TestConnectionResult> =
            join_all(checks).await.into_iter().collect();

        let connected = results.values().filter(|r| r.connected).count();
        info!(
            group = %self.name,
            connected,
            total = results.len(),
            "Connection test finished"
        );
        results
    }

    /// Members in insertion order.
    pub fn list_clients(&self) -> Vec<ClientInfo> {
        self.clients
            .iter()
            .map(|c| ClientInfo {
                alias: c.alias.clone(),
                platform: c.platform.clone(),
            })
            .collect()
    }

    pub fn size(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Run `dispatch` for a snapshot of the members and wait for all of them.
    ///
    /// Every member yields exactly one result; none is cancelled by a sibling's failure.
    async fn fan_out<F, Fut>(&self, kind: &'static str, dispatch: F) -> BroadcastSummary
    where
        F: Fn(ClientEntry) -> Fut,
        Fut: Future<Output = BroadcastResult>,
    {
        let members = self.clients.clone();
        let total_clients = members.len();
        debug!(group = %self.name, kind, members = total_clients, "Broadcasting");

        let deliveries = members.into_iter().map(|entry| {
            let alias = entry.alias.clone();
            let delivery = dispatch(entry);
            async move { (alias, delivery.await) }
        });

        let mut results = HashMap::with_capacity(total_clients);
        for (alias, result) in join_all(deliveries).await {
            if let Some(error) = &result.error {
                warn!(
                    group = %self.name,
                    alias = %alias,
                    platform = %result.platform,
                    "Broadcast delivery failed: {}",
                    error
                );
            }
            results.insert(alias, result);
        }

        let summary = BroadcastSummary {
            group_name: self.name.clone(),
            total_clients,
            results,
        };
        info!(
            group = %self.name,
            kind,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "Broadcast finished"
        );
        summary
    }
}
