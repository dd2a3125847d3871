//! logifly: send logs, alerts or any message to several messaging platforms at once.
//!
//! Platform clients (Discord, generic webhooks) implement [`PlatformClient`].
//! A [`BroadcastGroup`] holds any mix of them and fans a message out to every
//! member concurrently, reporting a per-member outcome in a [`BroadcastSummary`].
//! One failing endpoint never prevents delivery to the others.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use logifly::{DiscordConfig, Logifly, Message, PlatformClient, SendOptions};
//!
//! # async fn run() -> logifly::Result<()> {
//! let mut log = Logifly::new();
//! let discord = log.new_discord_client(DiscordConfig {
//!     webhook_url: "https://discord.com/api/webhooks/123/abc".to_string(),
//!     username: "AlertBot".to_string(),
//!     ..Default::default()
//! })?;
//!
//! // Discord handles keep their presets.
//! discord.warn("Disk", "85% used").await?;
//!
//! let group = log.create_group("alerts", vec![discord as Arc<dyn PlatformClient>])?;
//! let summary = group
//!     .broadcast(&Message::text("Server is down!"), &SendOptions::default())
//!     .await;
//! assert_eq!(summary.total_clients, 1);
//! # Ok(())
//! # }
//! ```

pub mod broadcast;
pub mod clients;
pub mod config;
pub mod error;
pub mod registry;
pub mod validators;

mod http;

pub use broadcast::{
    BroadcastGroup, BroadcastResult, BroadcastSummary, ClientInfo, EMBED_FALLBACK_NOTE,
    TestConnectionResult,
};
pub use clients::{
    ConnectionTester, DiscordClient, DiscordConfig, EmbedField, EmbedOptions, EmbedSender,
    HttpMethod, Message, PlatformClient, SendOptions, Severity, WebhookAuth, WebhookClient,
    WebhookConfig,
};
pub use config::{ClientConfig, ClientEntryConfig, GroupConfig, LogiflyConfig};
pub use error::{Error, Result};
pub use registry::Logifly;
