//! Generic webhook client.
//!
//! Posts `{"content": ...}` (or a structured payload) to any HTTP endpoint.
//! It has no embed or connection-test capability, so broadcast groups use
//! their text fallbacks for it.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::{Message, PlatformClient, SendOptions};
use crate::{Error, Result};

const PLATFORM: &str = "webhook";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Disabled clients are refused by broadcast groups.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// Extra request headers, e.g. `headers = { X-Source = "logifly" }`.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub auth: Option<WebhookAuth>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: String::new(),
            method: HttpMethod::default(),
            headers: BTreeMap::new(),
            auth: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Credentials attached to every request, selected by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookAuth {
    Bearer { token: String },
    Basic { username: String, password: String },
    /// Arbitrary header such as `X-Api-Key`.
    Header { name: String, value: String },
}

/// Generic webhook client.
#[derive(Debug)]
pub struct WebhookClient {
    config: WebhookConfig,
    client: Client,
    headers: HeaderMap,
}

impl WebhookClient {
    /// Create a new webhook client.
    ///
    /// Header names and values are checked up front; an invalid one is a
    /// configuration error instead of being dropped at send time.
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let headers = request_headers(&config)?;
        let client = crate::http::build_client(Duration::from_secs(config.timeout_secs))?;
        Ok(Self {
            config,
            client,
            headers,
        })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    fn build_payload(&self, message: &Message, options: &SendOptions) -> Value {
        let mut body = match message {
            Message::Text(content) => {
                let mut body = Map::new();
                body.insert("content".to_string(), json!(content));
                body
            }
            Message::Payload(fields) => fields.clone(),
        };
        for (key, value) in [
            ("username", &options.username),
            ("avatar_url", &options.avatar_url),
        ] {
            if let Some(value) = value {
                body.insert(key.to_string(), json!(value));
            }
        }
        Value::Object(body)
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::config(format!("Invalid webhook header name '{}': {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| Error::config(format!("Invalid value for webhook header '{}': {}", name, e)))?;
    Ok((header_name, header_value))
}

fn request_headers(config: &WebhookConfig) -> Result<HeaderMap> {
    let mut headers = config
        .headers
        .iter()
        .map(|(name, value)| header_pair(name, value))
        .collect::<Result<HeaderMap>>()?;

    match &config.auth {
        Some(WebhookAuth::Bearer { token }) => {
            let (_, value) = header_pair(AUTHORIZATION.as_str(), &format!("Bearer {}", token))?;
            headers.insert(AUTHORIZATION, value);
        }
        Some(WebhookAuth::Header { name, value }) => {
            let (name, value) = header_pair(name, value)?;
            headers.insert(name, value);
        }
        // Applied per request by reqwest.
        Some(WebhookAuth::Basic { .. }) | None => {}
    }

    Ok(headers)
}

#[async_trait]
impl PlatformClient for WebhookClient {
    fn platform(&self) -> &str {
        PLATFORM
    }

    fn can_send(&self) -> bool {
        self.config.enabled && !self.config.url.is_empty()
    }

    async fn send(&self, message: &Message, options: &SendOptions) -> Result<Value> {
        let url = self.config.url.as_str();
        let request = match self.config.method {
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        };
        let request = match &self.config.auth {
            Some(WebhookAuth::Basic { username, password }) => {
                request.basic_auth(username, Some(password))
            }
            _ => request,
        };

        let response = request
            .headers(self.headers.clone())
            .json(&self.build_payload(message, options))
            .send()
            .await
            .map_err(|e| Error::send("Webhook", format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Webhook rejected message: {}", body);
            return Err(Error::send(
                "Webhook",
                format!("Webhook failed: {} - {}", status.as_u16(), body),
            ));
        }

        debug!(status = status.as_u16(), "Webhook message delivered");
        Ok(json!({
            "success": true,
            "platform": PLATFORM,
            "status": status.as_u16(),
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hook(url: &str) -> WebhookConfig {
        WebhookConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_webhook_config_default() {
        let config = WebhookConfig::default();
        assert!(config.enabled);
        assert!(config.url.is_empty());
        assert_eq!(config.method, HttpMethod::Post);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_cannot_send_without_url_or_when_disabled() {
        assert!(!WebhookClient::new(WebhookConfig::default()).unwrap().can_send());

        let disabled = WebhookClient::new(WebhookConfig {
            enabled: false,
            ..hook("https://example.com/hook")
        })
        .unwrap();
        assert!(!disabled.can_send());
    }

    #[test]
    fn test_has_no_optional_capabilities() {
        let client = WebhookClient::new(hook("https://example.com/hook")).unwrap();
        assert!(client.as_embed_sender().is_none());
        assert!(client.as_connection_tester().is_none());
    }

    #[test]
    fn test_headers_and_bearer_auth() {
        let client = WebhookClient::new(WebhookConfig {
            headers: BTreeMap::from([("X-Source".to_string(), "logifly".to_string())]),
            auth: Some(WebhookAuth::Bearer {
                token: "test-token".to_string(),
            }),
            ..hook("https://example.com/webhook")
        })
        .unwrap();

        assert_eq!(client.headers[AUTHORIZATION], "Bearer test-token");
        assert_eq!(client.headers["x-source"], "logifly");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let err = WebhookClient::new(WebhookConfig {
            headers: BTreeMap::from([("bad header".to_string(), "x".to_string())]),
            ..hook("https://example.com/webhook")
        })
        .unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn test_payload_merges_options() {
        let client = WebhookClient::new(hook("https://example.com/webhook")).unwrap();
        let options = SendOptions {
            username: Some("Bot".to_string()),
            avatar_url: None,
        };
        let payload = client.build_payload(&Message::payload(json!({"text": "hi"})), &options);
        assert_eq!(payload, json!({"text": "hi", "username": "Bot"}));
    }

    #[test]
    fn test_method_and_auth_parse_from_toml() {
        let config: WebhookConfig = toml::from_str(
            r#"
            url = "https://example.com/hook"
            method = "put"
            headers = { X-Source = "logifly" }
            auth = { type = "basic", username = "u", password = "p" }
            "#,
        )
        .unwrap();
        assert_eq!(config.method, HttpMethod::Put);
        assert_eq!(config.headers["X-Source"], "logifly");
        assert!(matches!(config.auth, Some(WebhookAuth::Basic { .. })));
    }

    #[tokio::test]
    async fn test_send_posts_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({"content": "hello"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = WebhookClient::new(WebhookConfig {
            auth: Some(WebhookAuth::Bearer {
                token: "secret".to_string(),
            }),
            ..hook(&format!("{}/hook", server.uri()))
        })
        .unwrap();

        let result = client
            .send(&Message::text("hello"), &SendOptions::default())
            .await
            .unwrap();
        assert_eq!(result["status"], 200);
    }

    #[tokio::test]
    async fn test_send_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = WebhookClient::new(WebhookConfig {
            method: HttpMethod::Put,
            ..hook(&server.uri())
        })
        .unwrap();

        let err = client
            .send(&Message::text("hello"), &SendOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Webhook failed: 503 - down"));
    }
}
