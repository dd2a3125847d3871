//! Discord webhook client.
//!
//! Delivers plain messages and embeds through a Discord webhook URL. Each
//! request is a single POST bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::{
    ConnectionTester, EmbedOptions, EmbedSender, Message, PlatformClient, SendOptions, Severity,
};
use crate::validators::{WebhookPlatform, is_valid_webhook_url, validate_required};
use crate::{Error, Result};

const PLATFORM: &str = "discord";
const PLATFORM_LABEL: &str = "Discord";

/// Message sent by [`DiscordClient::test_connection`].
pub const CONNECTION_TEST_MESSAGE: &str = "logifly connection test successful! 🚀";

/// Discord client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord webhook URL.
    pub webhook_url: String,
    /// Default username for the webhook.
    #[serde(default = "default_username")]
    pub username: String,
    /// Default avatar URL. Empty means the webhook's own avatar.
    #[serde(default)]
    pub avatar_url: String,
    /// Embed color used when an embed does not set one.
    #[serde(default = "default_color")]
    pub default_color: u32,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_username() -> String {
    "logifly Bot".to_string()
}

fn default_color() -> u32 {
    0x3498db
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            username: default_username(),
            avatar_url: String::new(),
            default_color: default_color(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Discord webhook client.
#[derive(Debug)]
pub struct DiscordClient {
    config: DiscordConfig,
    client: Client,
}

impl DiscordClient {
    /// Create a new Discord client.
    ///
    /// Fails with a configuration error when the webhook URL is missing or
    /// does not look like a Discord webhook.
    pub fn new(config: DiscordConfig) -> Result<Self> {
        validate_required(&[("webhook_url", &config.webhook_url)], PLATFORM_LABEL)?;

        if !is_valid_webhook_url(&config.webhook_url, WebhookPlatform::Discord) {
            return Err(Error::config(
                "Invalid Discord webhook URL format. Expected: https://discord.com/api/webhooks/...",
            ));
        }

        Self::from_validated(config)
    }

    fn from_validated(config: DiscordConfig) -> Result<Self> {
        let client = crate::http::build_client(Duration::from_millis(config.timeout_ms))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DiscordConfig {
        &self.config
    }

    /// Send a green success embed.
    pub async fn success(&self, title: &str, description: &str) -> Result<Value> {
        self.send_embed(&EmbedOptions::severity(Severity::Success, title, description))
            .await
    }

    /// Send a red error embed.
    pub async fn error(&self, title: &str, description: &str) -> Result<Value> {
        self.send_embed(&EmbedOptions::severity(Severity::Error, title, description))
            .await
    }

    /// Send a yellow warning embed.
    pub async fn warn(&self, title: &str, description: &str) -> Result<Value> {
        self.send_embed(&EmbedOptions::severity(Severity::Warning, title, description))
            .await
    }

    /// Send a blue informational embed.
    pub async fn info(&self, title: &str, description: &str) -> Result<Value> {
        self.send_embed(&EmbedOptions::severity(Severity::Info, title, description))
            .await
    }

    /// Build the webhook payload for a message.
    fn build_payload(&self, message: &Message, options: &SendOptions) -> Value {
        let mut payload = Map::new();

        let username = options.username.as_deref().unwrap_or(&self.config.username);
        if !username.is_empty() {
            payload.insert("username".to_string(), json!(username));
        }
        let avatar_url = options
            .avatar_url
            .as_deref()
            .unwrap_or(&self.config.avatar_url);
        if !avatar_url.is_empty() {
            payload.insert("avatar_url".to_string(), json!(avatar_url));
        }

        match message {
            Message::Text(content) => {
                payload.insert("content".to_string(), json!(content));
            }
            Message::Payload(fields) => {
                payload.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }

        Value::Object(payload)
    }

    /// Build the Discord embed object, filling the color and timestamp defaults.
    fn build_embed(&self, embed: &EmbedOptions) -> Result<Value> {
        let mut embed = embed.clone();
        if embed.color.is_none() {
            embed.color = Some(self.config.default_color);
        }
        if embed.timestamp.is_none() {
            embed.timestamp = Some(Utc::now().to_rfc3339());
        }
        Ok(serde_json::to_value(embed)?)
    }
}

#[async_trait]
impl PlatformClient for DiscordClient {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn send(&self, message: &Message, options: &SendOptions) -> Result<Value> {
        let payload = self.build_payload(message, options);

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                Error::send(
                    PLATFORM_LABEL,
                    format!("Discord API Error: Unknown - {}", e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Discord webhook failed: {} - {}", status, body);
            return Err(Error::send(
                PLATFORM_LABEL,
                format!("Discord API Error: {} - {}", status.as_u16(), body),
            ));
        }

        debug!("Discord message delivered ({})", status);
        Ok(json!({
            "success": true,
            "platform": PLATFORM,
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }

    fn as_embed_sender(&self) -> Option<&dyn EmbedSender> {
        Some(self)
    }

    fn as_connection_tester(&self) -> Option<&dyn ConnectionTester> {
        Some(self)
    }
}

#[async_trait]
impl EmbedSender for DiscordClient {
    async fn send_embed(&self, embed: &EmbedOptions) -> Result<Value> {
        let embed = self.build_embed(embed)?;
        let message = Message::payload(json!({ "embeds": [embed] }));
        self.send(&message, &SendOptions::default()).await
    }
}

#[async_trait]
impl ConnectionTester for DiscordClient {
    async fn test_connection(&self) -> Result<bool> {
        match self
            .send(&Message::text(CONNECTION_TEST_MESSAGE), &SendOptions::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!("Discord connection test failed: {}", e);
                Ok(false)
            }
        }
    }
}
