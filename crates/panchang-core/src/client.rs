//! Single-endpoint provider client.
//!
//! One call, one endpoint, one outcome. Every failure mode is folded into
//! [`FetchError`] so the fan-out can run many calls without any of them
//! aborting the others.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::PanchangRequest;

/// Why a single provider call produced no data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to encode request payload: {0}")]
    Encode(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Encode(_) => "fetch.encode",
            Self::Transport(_) => "fetch.transport",
            Self::Timeout { .. } => "fetch.timeout",
            Self::Status { .. } => "fetch.status",
            Self::Decode(_) => "fetch.decode",
        }
    }
}

/// Issues authenticated POSTs against the provider's base URL.
#[derive(Clone)]
pub struct ProviderClient {
    http_client: Arc<dyn HttpClient>,
    config: ProviderConfig,
    auth: HttpAuth,
}

impl ProviderClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        let auth = HttpAuth::api_key(config.api_key.clone());
        Self {
            http_client,
            config,
            auth,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// POSTs the shared payload to `path` and returns the parsed JSON body.
    ///
    /// The configured deadline bounds the whole call, including the body read.
    pub async fn fetch(&self, path: &str, payload: &PanchangRequest) -> Result<Value, FetchError> {
        let body =
            serde_json::to_string(payload).map_err(|error| FetchError::Encode(error.to_string()))?;
        let timeout = self.config.request_timeout;
        let request = HttpRequest::post(self.config.endpoint_url(path))
            .with_auth(&self.auth)
            .with_json_body(body)
            .with_timeout_ms(duration_ms(timeout));

        let started = Instant::now();
        let response = match tokio::time::timeout(timeout, self.http_client.execute(request)).await
        {
            Ok(result) => result,
            Err(_) => {
                return Err(FetchError::Timeout {
                    after_ms: duration_ms(timeout),
                })
            }
        };

        let response = response.map_err(|error| {
            if error.timed_out() {
                FetchError::Timeout {
                    after_ms: duration_ms(timeout),
                }
            } else {
                FetchError::Transport(error.message().to_owned())
            }
        })?;

        debug!(
            path,
            status = response.status,
            latency_ms = duration_ms(started.elapsed()),
            "provider call completed"
        );

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|error| FetchError::Decode(error.to_string()))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct CannedHttpClient {
        outcome: Result<HttpResponse, HttpError>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedHttpClient {
        fn new(outcome: Result<HttpResponse, HttpError>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl HttpClient for CannedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.seen.lock().expect("lock is not poisoned").push(request);
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    fn request() -> PanchangRequest {
        PanchangRequest::new(2024, 4, 15, 28.6, 77.2).expect("valid request")
    }

    fn client(outcome: Result<HttpResponse, HttpError>) -> (Arc<CannedHttpClient>, ProviderClient) {
        let http = Arc::new(CannedHttpClient::new(outcome));
        let config = ProviderConfig::default()
            .with_base_url("https://api.example.test")
            .with_api_key("key-123");
        (http.clone(), ProviderClient::new(http, config))
    }

    #[tokio::test]
    async fn success_returns_parsed_json_and_sends_api_key() {
        let (http, client) = client(Ok(HttpResponse::ok_json(r#"{"output":{"number":3}}"#)));

        let value = client
            .fetch("tithi-durations", &request())
            .await
            .expect("2xx with JSON succeeds");

        assert_eq!(value["output"]["number"], 3);
        let seen = http.seen.lock().expect("lock is not poisoned");
        assert_eq!(seen[0].url, "https://api.example.test/tithi-durations");
        assert_eq!(seen[0].headers.get("x-api-key").map(String::as_str), Some("key-123"));
        assert!(seen[0].body.as_deref().unwrap_or_default().contains("\"latitude\":28.6"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (_, client) = client(Ok(HttpResponse::with_status(503, "busy")));
        let error = client.fetch("rahu-kalam", &request()).await.expect_err("503 fails");
        assert_eq!(error, FetchError::Status { status: 503 });
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (_, client) = client(Ok(HttpResponse::ok_json("<html>")));
        let error = client.fetch("aayanam", &request()).await.expect_err("not JSON");
        assert_eq!(error.code(), "fetch.decode");
    }

    #[tokio::test]
    async fn transport_timeouts_are_classified() {
        let (_, provider) = client(Err(HttpError::timeout("slow")));
        let error = provider.fetch("varjyam", &request()).await.expect_err("timed out");
        assert!(matches!(error, FetchError::Timeout { .. }));

        let (_, provider) = client(Err(HttpError::new("connection refused")));
        let error = provider.fetch("varjyam", &request()).await.expect_err("refused");
        assert_eq!(error, FetchError::Transport(String::from("connection refused")));
    }
}
