use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by content API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unauthorized request to {url} (HTTP {status})")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("product {id} not found")]
    ProductNotFound { id: i64 },

    #[error("invalid product id \"{raw}\": expected an integer")]
    InvalidProductId { raw: String },

    #[error("invalid content API URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unexpected theme value from content API: {0}")]
    InvalidTheme(String),
}
