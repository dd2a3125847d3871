//! URL and configuration validators used by the platform clients.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{Error, Result};

static DISCORD_WEBHOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:(?:ptb|canary)\.)?discord(?:app)?\.com/api/(?:v\d+/)?webhooks/\d+/[\w-]+/?$")
        .expect("discord webhook pattern is valid")
});

/// Platforms with a known webhook URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookPlatform {
    Discord,
}

impl WebhookPlatform {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Discord => &DISCORD_WEBHOOK,
        }
    }
}

/// Returns `true` if `input` parses as an absolute URL.
pub fn is_valid_url(input: &str) -> bool {
    Url::parse(input).is_ok()
}

/// Returns `true` if `input` is a valid URL matching the platform's webhook shape.
pub fn is_valid_webhook_url(input: &str, platform: WebhookPlatform) -> bool {
    is_valid_url(input) && platform.pattern().is_match(input)
}

/// Check that every `(field, value)` pair has a non-blank value.
///
/// All missing fields are reported in one error.
pub fn validate_required(fields: &[(&str, &str)], platform_name: &str) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Error::config(format!(
        "{} configuration missing required fields: {}",
        platform_name,
        missing.join(", ")
    )))
}
