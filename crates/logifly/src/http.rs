//! Shared HTTP client construction for platform clients.

use std::{sync::OnceLock, time::Duration};

use tracing::debug;

use crate::Result;

pub(crate) fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Another crate got there first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// Build a `reqwest::Client` with a per-request timeout.
///
/// A zero timeout leaves reqwest's default (no timeout) in place. Builder
/// failures are returned rather than replaced by an unbounded default client.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    install_rustls_provider();

    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if timeout > Duration::ZERO {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

    #[tokio::test]
    async fn test_timeout_is_applied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_millis(100)).unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_zero_timeout_builds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = build_client(Duration::ZERO).unwrap();
        let response = client.get(server.uri()).send().await.unwrap();
        assert_eq!(response.status(), 204);
    }
}
