use thiserror::Error;

/// Errors returned by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is extracted
    /// from the JSON error body when present.
    #[error("backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The configured backend base URL could not be parsed.
    #[error("invalid backend URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
