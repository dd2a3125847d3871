//! Declarative configuration for building a [`Logifly`](crate::Logifly) registry.
//!
//! ```toml
//! [[groups]]
//! name = "alerts"
//!
//! [[groups.clients]]
//! alias = "ops-discord"
//! type = "discord"
//! webhook_url = "https://discord.com/api/webhooks/123/abc"
//! username = "AlertBot"
//!
//! [[groups.clients]]
//! type = "webhook"
//! url = "https://hooks.example.com/notify"
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clients::{DiscordClient, DiscordConfig, PlatformClient, WebhookClient, WebhookConfig};
use crate::Result;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogiflyConfig {
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

/// A broadcast group and its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub clients: Vec<ClientEntryConfig>,
}

/// A group member: client configuration plus an optional alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientEntryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(flatten)]
    pub client: ClientConfig,
}

/// Client configuration wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientConfig {
    /// Discord webhook client.
    Discord(DiscordConfig),
    /// Generic webhook client.
    Webhook(WebhookConfig),
}

impl ClientConfig {
    /// Get the client type name.
    pub fn client_type(&self) -> &'static str {
        match self {
            Self::Discord(_) => "discord",
            Self::Webhook(_) => "webhook",
        }
    }

    /// Build the configured client.
    pub fn build(&self) -> Result<Arc<dyn PlatformClient>> {
        Ok(match self {
            Self::Discord(c) => Arc::new(DiscordClient::new(c.clone())?),
            Self::Webhook(c) => Arc::new(WebhookClient::new(c.clone())?),
        })
    }
}

impl LogiflyConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[groups]]
        name = "alerts"

        [[groups.clients]]
        alias = "ops-discord"
        type = "discord"
        webhook_url = "https://discord.com/api/webhooks/123/abc"
        username = "AlertBot"

        [[groups.clients]]
        type = "webhook"
        url = "https://hooks.example.com/notify"
        auth = { type = "bearer", token = "secret" }

        [[groups]]
        name = "empty"
    "#;

    #[test]
    fn test_parse_sample() {
        let config = LogiflyConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.groups.len(), 2);

        let alerts = &config.groups[0];
        assert_eq!(alerts.clients.len(), 2);
        assert_eq!(alerts.clients[0].alias.as_deref(), Some("ops-discord"));

        match &alerts.clients[0].client {
            ClientConfig::Discord(c) => {
                assert_eq!(c.username, "AlertBot");
                assert_eq!(c.default_color, 0x3498db);
                assert_eq!(c.timeout_ms, 5000);
            }
            other => panic!("expected discord, got {}", other.client_type()),
        }

        match &alerts.clients[1].client {
            ClientConfig::Webhook(c) => {
                assert!(c.enabled);
                assert_eq!(c.method, crate::clients::HttpMethod::Post);
                assert!(c.auth.is_some());
            }
            other => panic!("expected webhook, got {}", other.client_type()),
        }
        assert!(alerts.clients[1].alias.is_none());
        assert!(config.groups[1].clients.is_empty());
    }

    #[test]
    fn test_unknown_client_type_is_rejected() {
        let err = LogiflyConfig::from_toml_str(
            r#"
            [[groups]]
            name = "x"
            [[groups.clients]]
            type = "carrier-pigeon"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_build_validates_discord_url() {
        let config = ClientConfig::Discord(DiscordConfig {
            webhook_url: "https://example.com/nope".to_string(),
            ..Default::default()
        });
        assert!(config.build().is_err());
    }
}
