//! Authenticated transport with gateway envelope decoding.

use log::{debug, warn};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::retry::{MAX_RETRIES, RETRY_DELAY_MS, is_retryable};
use crate::config::{ApiConfig, Platform};
use crate::error::{Error, Result};
use crate::response::{extract_error_code, fold_custom_data};
use crate::wiki::{self, Feature};

/// Authenticated HTTP transport shared by every gateway operation.
///
/// Every request carries the `Apikey` and `Authorization` headers from the
/// [`ApiConfig`] it was built with. Responses are decoded through the gateway
/// envelope: `response_code == "00"` yields the typed body, anything else is
/// resolved into an [`Error::Gateway`].
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: String,
    platform: Platform,
}

impl HttpProvider {
    /// Builds an authenticated transport for the configured platform.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let headers = config.auth_headers()?;
        let client = Client::builder()
            .user_agent("ligdicash-rs")
            .default_headers(headers)
            .build()?;

        debug!(
            "Gateway transport ready for {} platform at {}",
            config.platform,
            config.endpoint_root()
        );

        Ok(Self {
            client,
            base_url: config.endpoint_root().trim_end_matches('/').to_string(),
            platform: config.platform,
        })
    }

    /// The platform this transport resolves error codes against.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Performs a GET request and decodes the gateway envelope.
    /// Reads are idempotent, so transient failures are retried.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        feature: Feature,
    ) -> Result<T> {
        let url = self.url_for(endpoint);
        debug!("GET {} for {}...", url, feature);

        self.with_retry(feature.as_str(), || async {
            let response = self.client.get(&url).query(query).send().await?;
            let body: Value = response.error_for_status()?.json().await?;
            self.decode_envelope(body, feature)
        })
        .await
    }

    /// Performs a POST request with a JSON body and decodes the gateway
    /// envelope. Creation calls are not idempotent and are never retried.
    #[tracing::instrument(skip(self, payload))]
    pub async fn post_json<T, P>(&self, endpoint: &str, payload: &P, feature: Feature) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let url = self.url_for(endpoint);
        debug!("POST {} for {}...", url, feature);

        let response = self.client.post(&url).json(payload).send().await?;
        let body: Value = response.error_for_status()?.json().await?;
        self.decode_envelope(body, feature)
    }

    /// Applies the envelope contract shared by every gateway endpoint.
    ///
    /// A `"00"` response code means success: the `custom_data` pairs are
    /// folded into a plain map and the body is handed to serde. Any other
    /// code is an error; the numeric code buried in `response_text` picks
    /// the [`crate::ErrorKind`] for the feature that was called.
    fn decode_envelope<T: DeserializeOwned>(&self, mut body: Value, feature: Feature) -> Result<T> {
        let response_code = body
            .get("response_code")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if response_code == "00" {
            fold_custom_data(&mut body);
            return Ok(serde_json::from_value(body)?);
        }

        let response_text = body
            .get("response_text")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let code = extract_error_code(response_text).unwrap_or_default();
        let kind = wiki::resolve(self.platform, feature, &code);
        debug!(
            "{} rejected by the gateway: text {:?} resolved to {}",
            feature, response_text, kind
        );

        Err(Error::Gateway { kind, code })
    }

    /// Executes an async operation, repeating it on retryable failures.
    async fn with_retry<F, Fut, T>(&self, operation_name: &str, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt >= MAX_RETRIES || !is_retryable(&e) {
                        return Err(e);
                    }
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                        operation_name, attempt, MAX_RETRIES, e, RETRY_DELAY_MS
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS)).await;
                    attempt += 1;
                }
            }
        }
    }
}
