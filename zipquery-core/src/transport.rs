use std::future::Future;
use std::time::Duration;

use http::StatusCode;
use reqwest::Client;
use tracing::warn;

use crate::config::HttpCfg;
use crate::error::{CoreResult, ZipQueryError};
use crate::outcome::{ApiError, Outcome};

/// Thin wrapper around `reqwest::Client` that turns every transport-level
/// fault into a typed [`Outcome`]. Callers above this layer never see a
/// transport exception.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    inner: Client,
}

impl ApiTransport {
    pub fn new_default() -> CoreResult<Self> {
        Self::from_config(&HttpCfg::default())
    }

    pub fn from_config(cfg: &HttpCfg) -> CoreResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms));
        if let Some(cap) = cfg.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(cap);
        }
        let inner = builder
            .build()
            .map_err(|e| ZipQueryError::Other(anyhow::anyhow!("http client build failed: {e}")))?;
        Ok(Self { inner })
    }

    /// Use a caller-configured client (custom proxies, extra roots, ...).
    pub fn with_client(client: Client) -> Self {
        Self { inner: client }
    }

    /// GET `url` and classify the response.
    ///
    /// 2xx becomes `Success(body)`; everything else — remote error status,
    /// connection failure, timeout — becomes a `Failure` with the taxonomy
    /// the rest of the crate relies on.
    pub async fn call(&self, url: &str) -> Outcome<String> {
        if url.trim().is_empty() {
            return Outcome::failure(ApiError::new(
                StatusCode::BAD_REQUEST,
                "URL cannot be null or empty.",
            ));
        }

        let resp = match self.inner.get(url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(error = %err, "transport call failed");
                return Outcome::failure(classify_transfer_error(&err));
            }
        };

        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or("Unknown");
        let body = match resp.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "failed reading response body");
                return Outcome::failure(classify_transfer_error(&err));
            }
        };

        if status.is_success() {
            return Outcome::success(body);
        }

        warn!(status = status.as_u16(), "remote API returned an error status");
        Outcome::failure(
            ApiError::new(status, format!("API returned {} {}", status.as_u16(), reason))
                .with_detail(reason)
                .with_body(body),
        )
    }

    /// Like [`call`](Self::call), but races the request against `cancel`.
    /// A completed cancel signal yields a 400 "cancelled" failure, distinct
    /// from the 408 a timeout produces.
    pub async fn call_with_cancel(
        &self,
        url: &str,
        cancel: impl Future<Output = ()>,
    ) -> Outcome<String> {
        tokio::select! {
            _ = cancel => Outcome::failure(ApiError::new(
                StatusCode::BAD_REQUEST,
                "Request was cancelled.",
            )),
            outcome = self.call(url) => outcome,
        }
    }
}

fn classify_transfer_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out.").with_detail(err.to_string())
    } else if err.is_connect() || err.is_request() || err.is_body() {
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Network or connection error.")
            .with_detail(err.to_string())
    } else {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected error.")
            .with_detail(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[tokio::test]
    async fn blank_url_fails_fast() {
        let transport = ApiTransport::new_default().unwrap();
        for url in ["", "   "] {
            let outcome = transport.call(url).await;
            let err = outcome.error().expect("failure");
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), "URL cannot be null or empty.");
        }
    }

    #[tokio::test]
    async fn success_returns_body_text() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/lookup");
            then.status(200).body(r#"{"data":"test"}"#);
        });

        let transport = ApiTransport::new_default().unwrap();
        let outcome = transport.call(&format!("{}/lookup", server.base_url())).await;
        assert_eq!(outcome.value().map(String::as_str), Some(r#"{"data":"test"}"#));
        m.assert();
    }

    #[tokio::test]
    async fn remote_404_preserves_status_reason_and_body() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/lookup");
            then.status(404).body(r#"{"error":"not found"}"#);
        });

        let transport = ApiTransport::new_default().unwrap();
        let outcome = transport.call(&format!("{}/lookup", server.base_url())).await;
        let err = outcome.error().expect("failure");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "API returned 404 Not Found");
        assert_eq!(err.detail(), Some("Not Found"));
        assert_eq!(err.response_body(), Some(r#"{"error":"not found"}"#));
    }

    #[tokio::test]
    async fn connection_failure_maps_to_503() {
        // Port 9 (discard) is typically closed.
        let transport = ApiTransport::new_default().unwrap();
        let outcome = transport.call("http://127.0.0.1:9/lookup").await;
        let err = outcome.error().expect("failure");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.message(), "Network or connection error.");
        assert!(err.detail().is_some());
    }

    #[tokio::test]
    async fn timeout_maps_to_408() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).body("late").delay(Duration::from_millis(500));
        });

        let cfg = HttpCfg {
            connect_timeout_ms: 1_000,
            request_timeout_ms: 50,
            pool_max_idle_per_host: None,
        };
        let transport = ApiTransport::from_config(&cfg).unwrap();
        let outcome = transport.call(&format!("{}/slow", server.base_url())).await;
        let err = outcome.error().expect("failure");
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.message(), "Request timed out.");
    }

    #[tokio::test]
    async fn cancellation_is_distinct_from_timeout() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).body("late").delay(Duration::from_millis(500));
        });

        let transport = ApiTransport::new_default().unwrap();
        let url = format!("{}/slow", server.base_url());
        let outcome = transport
            .call_with_cancel(&url, tokio::time::sleep(Duration::from_millis(20)))
            .await;
        let err = outcome.error().expect("failure");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Request was cancelled.");
    }

    #[tokio::test]
    async fn cancel_that_never_fires_leaves_call_untouched() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/fast");
            then.status(200).body("ok");
        });

        let transport = ApiTransport::new_default().unwrap();
        let url = format!("{}/fast", server.base_url());
        let outcome = transport
            .call_with_cancel(&url, std::future::pending())
            .await;
        assert_eq!(outcome.value().map(String::as_str), Some("ok"));
        m.assert();
    }
}
