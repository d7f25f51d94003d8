//! HTTP client for the headless content API.

mod products;
mod theme;

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use shopfront_core::ClientConfig;

use crate::error::ContentError;
use crate::retry::retry_with_backoff;

/// Seconds to wait on a 429 that carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Client for the content API's category, product, and user-theme routes.
///
/// Content routes live under `{base_origin}{api_prefix}`; the theme routes
/// live directly under `{base_origin}`. Non-2xx responses map to typed
/// [`ContentError`] variants. Transient failures are retried up to
/// `max_retries` extra times; the default of `0` leaves the product-lookup
/// fallback as the only automatic retry.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: Client,
    base_origin: String,
    api_prefix: String,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl ContentClient {
    /// Creates a client with the given timeout and `User-Agent`, the `/api`
    /// content prefix, and retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidBaseUrl`] if `base_origin` is not an
    /// absolute URL, or [`ContentError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_origin: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ContentError> {
        let base_origin = base_origin.trim_end_matches('/').to_owned();
        Url::parse(&base_origin).map_err(|e| ContentError::InvalidBaseUrl {
            url: base_origin.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_origin,
            api_prefix: "/api".to_owned(),
            max_retries: 0,
            retry_backoff_base_ms: 0,
        })
    }

    /// Builds a client from the app's [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, ContentError> {
        Ok(Self::new(
            &config.base_origin,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_api_prefix(&config.api_prefix)
        .with_retries(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Overrides the content route prefix (`""` for none).
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Enables retries of transient failures.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_base_ms = backoff_base_ms;
        self
    }

    /// Origin used for request URLs, without a trailing `/`.
    #[must_use]
    pub fn base_origin(&self) -> &str {
        &self.base_origin
    }

    /// Builds `{base_origin}{api_prefix}{path}?{query}`.
    fn content_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ContentError> {
        let raw = format!("{}{}{path}", self.base_origin, self.api_prefix);
        let mut url = Url::parse(&raw).map_err(|e| ContentError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Builds `{base_origin}{path}` for routes outside the content prefix.
    fn root_url(&self, path: &str) -> Result<Url, ContentError> {
        let raw = format!("{}{path}", self.base_origin);
        Url::parse(&raw).map_err(|e| ContentError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Sends a request and decodes the JSON body, retrying transient errors.
    async fn execute<T>(
        &self,
        method: Method,
        url: Url,
        bearer: Option<&str>,
        body: Option<&serde_json::Value>,
        context: &str,
    ) -> Result<T, ContentError>
    where
        T: DeserializeOwned,
    {
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            let method = method.clone();
            let url = url.clone();
            async move {
                tracing::debug!(%method, %url, "content API request");

                let mut request = self
                    .client
                    .request(method, url.clone())
                    .header(reqwest::header::ACCEPT, "application/json");
                if let Some(token) = bearer {
                    request = request.bearer_auth(token);
                }
                if let Some(body) = body {
                    request = request.json(body);
                }

                let response = check_status(request.send().await?, &url)?;
                let text = response.text().await?;
                serde_json::from_str::<T>(&text).map_err(|e| ContentError::Deserialize {
                    context: format!("{context} from {url}"),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Maps non-2xx statuses to typed errors.
fn check_status(response: Response, url: &Url) -> Result<Response, ContentError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(ContentError::RateLimited { retry_after_secs });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ContentError::NotFound {
            url: url.to_string(),
        });
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ContentError::Unauthorized {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    if !status.is_success() {
        return Err(ContentError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
