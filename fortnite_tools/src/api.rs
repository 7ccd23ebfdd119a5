use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
    StatusCode,
};
use serde_json::Value;

use crate::{
    config::FortniteApiConfig,
    data_objects::{ShopData, ShopPayload, ShopResponse},
    FortniteApiError,
};

#[derive(Clone)]
pub struct FortniteApi {
    config: FortniteApiConfig,
    client: Arc<Client>,
}

impl FortniteApi {
    pub fn new(config: FortniteApiConfig) -> Result<Self, FortniteApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        if let Some(key) = config.api_key.as_ref() {
            let val = HeaderValue::from_str(key.reveal().as_str())
                .map_err(|e| FortniteApiError::Initialization(e.to_string()))?;
            headers.insert(AUTHORIZATION, val);
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FortniteApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Fetch the current item shop from upstream.
    ///
    /// Retries on 429 and 5xx responses and on transport errors, up to `max_attempts` tries with
    /// exponential backoff (`backoff_factor` seconds, doubling per attempt). Every failure mode,
    /// bad status, error body, or unparseable payload, surfaces as [`FortniteApiError::FetchFailed`].
    pub async fn fetch_shop(&self) -> Result<ShopPayload, FortniteApiError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.try_fetch().await {
                Ok(payload) => return Ok(payload),
                Err(FetchAttemptError { message, retryable }) => {
                    if !retryable || attempt >= self.config.max_attempts {
                        return Err(FortniteApiError::FetchFailed(message));
                    }
                    let backoff = backoff_secs(self.config.backoff_factor, attempt);
                    warn!(
                        "Shop fetch attempt {attempt}/{} failed ({message}). Retrying in {backoff:.1}s",
                        self.config.max_attempts
                    );
                    tokio::time::sleep(std::time::Duration::from_secs_f64(backoff)).await;
                },
            }
        }
    }

    async fn try_fetch(&self) -> Result<ShopPayload, FetchAttemptError> {
        let url = &self.config.shop_url;
        trace!("Fetching item shop: {url}?language={}", self.config.language);
        let response = self
            .client
            .get(url)
            .query(&[("language", self.config.language.as_str())])
            .send()
            .await
            .map_err(|e| FetchAttemptError { message: e.to_string(), retryable: true })?;
        let status = response.status();
        if !status.is_success() {
            let retryable = is_retryable(status);
            let body = response.text().await.unwrap_or_default();
            return Err(FetchAttemptError {
                message: format!("Upstream returned {status}: {}", body.chars().take(200).collect::<String>()),
                retryable,
            });
        }
        let body: Value =
            response.json().await.map_err(|e| FetchAttemptError { message: e.to_string(), retryable: false })?;
        let envelope: ShopResponse = serde_json::from_value(body)
            .map_err(|e| FetchAttemptError { message: format!("Unexpected response shape: {e}"), retryable: false })?;
        if envelope.status != 200 {
            return Err(FetchAttemptError {
                message: format!(
                    "Upstream status {}: {}",
                    envelope.status,
                    envelope.error.unwrap_or_else(|| "unknown error".to_string())
                ),
                retryable: false,
            });
        }
        let raw = envelope.data.ok_or_else(|| FetchAttemptError {
            message: "Upstream response has no data object".to_string(),
            retryable: false,
        })?;
        let shop: ShopData = serde_json::from_value(raw.clone())
            .map_err(|e| FetchAttemptError { message: format!("Could not parse shop data: {e}"), retryable: false })?;
        debug!("Fetched shop for {} with {} entries", shop.date, shop.entries.len());
        Ok(ShopPayload { shop, raw })
    }
}

struct FetchAttemptError {
    message: String,
    retryable: bool,
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

// The shift saturates so that absurd max_attempts settings cannot overflow the doubling.
fn backoff_secs(factor: f64, attempt: u32) -> f64 {
    factor * f64::from(1u32 << (attempt - 1).min(16))
}

#[cfg(test)]
mod test {
    use super::{backoff_secs, is_retryable};

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(backoff_secs(1.5, 1), 1.5);
        assert_eq!(backoff_secs(1.5, 2), 3.0);
        assert_eq!(backoff_secs(1.5, 3), 6.0);
    }

    #[test]
    fn backoff_is_capped_for_large_attempt_counts() {
        let ceiling = backoff_secs(1.5, 17);
        assert_eq!(backoff_secs(1.5, 33), ceiling);
        assert_eq!(backoff_secs(1.5, 1000), ceiling);
    }

    #[test]
    fn retryable_statuses() {
        for code in [429u16, 500, 502, 503, 504] {
            assert!(is_retryable(reqwest::StatusCode::from_u16(code).unwrap()));
        }
        for code in [400u16, 401, 403, 404, 418] {
            assert!(!is_retryable(reqwest::StatusCode::from_u16(code).unwrap()));
        }
    }
}
