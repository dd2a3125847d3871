//! Platform clients.
//!
//! This module provides the clients that deliver messages to one platform each:
//! - Discord webhooks (plain messages and embeds)
//! - Generic JSON webhooks (plain messages only)
//!
//! Every client implements [`PlatformClient`]. Embeds and connection tests are
//! optional capabilities discovered through [`PlatformClient::as_embed_sender`]
//! and [`PlatformClient::as_connection_tester`].

mod discord;
mod webhook;

pub use discord::{DiscordClient, DiscordConfig};
pub use webhook::{HttpMethod, WebhookAuth, WebhookClient, WebhookConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Trait implemented by every platform client.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Platform label, e.g. `"discord"`. Used for reporting only.
    fn platform(&self) -> &str;

    /// Whether this client is able to deliver messages at all.
    ///
    /// Groups refuse to register clients that return `false`.
    fn can_send(&self) -> bool {
        true
    }

    /// Send a plain or structured message.
    async fn send(&self, message: &Message, options: &SendOptions) -> Result<Value>;

    /// Embed capability, if the platform supports rich embeds.
    fn as_embed_sender(&self) -> Option<&dyn EmbedSender> {
        None
    }

    /// Connection-test capability, if the client provides a dedicated check.
    fn as_connection_tester(&self) -> Option<&dyn ConnectionTester> {
        None
    }
}

/// Optional capability: rich embed delivery.
#[async_trait]
pub trait EmbedSender: Send + Sync {
    async fn send_embed(&self, embed: &EmbedOptions) -> Result<Value>;
}

/// Optional capability: dedicated connectivity check.
#[async_trait]
pub trait ConnectionTester: Send + Sync {
    /// Returns whether the endpoint accepted a test delivery.
    async fn test_connection(&self) -> Result<bool>;
}

/// A message to deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Plain text content.
    Text(String),
    /// Structured payload merged into the request body.
    Payload(Map<String, Value>),
}

impl Message {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Build a structured message from a JSON value.
    ///
    /// Non-object values are sent as text using their JSON rendering.
    pub fn payload(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Payload(map),
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Per-send overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    /// Override the sender display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Override the sender avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A field inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

/// Rich message content.
///
/// Platforms without embed support receive `"**{title}**\n{description}"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedOptions {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    /// RFC 3339 timestamp shown by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EmbedOptions {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Severity preset: glyph-prefixed title and the severity color.
    pub fn severity(severity: Severity, title: &str, description: impl Into<String>) -> Self {
        Self::new(format!("{} {}", severity.glyph(), title), description)
            .with_color(severity.color())
    }

    /// Plain-text rendering for platforms without embed support.
    pub fn to_text(&self) -> String {
        format!("**{}**\n{}", self.title, self.description)
    }
}

/// Severity presets for status notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            Self::Success => 0x00ff00, // Green
            Self::Error => 0xff0000,   // Red
            Self::Warning => 0xffff00, // Yellow
            Self::Info => 0x3498db,    // Blue
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(crate::Error::config(format!("Unknown severity: {}", other))),
        }
    }
}
