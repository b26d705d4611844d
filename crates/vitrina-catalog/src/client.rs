//! HTTP client for the commerce backend's store API.
//!
//! Wraps `reqwest` with publishable-key authentication, typed response
//! deserialization, and retry on transient failures. Non-2xx statuses are
//! surfaced as [`CatalogError::Api`] with the message extracted from the
//! backend's JSON error body when one is present.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use vitrina_core::AppConfig;

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::types::{
    Collection, CollectionResponse, CollectionsResponse, Product, ProductResponse,
    ProductsResponse,
};

/// Header carrying the storefront's public API credential.
const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_CURRENCY: &str = "usd";

/// Query parameters for the product list endpoint.
///
/// Unset fields fall back to the backend defaults the storefront always
/// sent: `limit=10`, `offset=0`, `currency_code=usd`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub collection_id: Option<String>,
    pub region_id: Option<String>,
    pub currency_code: Option<String>,
    /// Free-text search term.
    pub q: Option<String>,
}

impl ProductQuery {
    /// Query for one page of the catalog.
    #[must_use]
    pub fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            ..Self::default()
        }
    }

    /// Query searching the catalog by free text.
    #[must_use]
    pub fn search(term: &str) -> Self {
        Self {
            q: Some(term.to_owned()),
            ..Self::default()
        }
    }
}

/// Client for the commerce backend's store API.
///
/// Holds the HTTP client, backend base URL, publishable key, and the retry
/// policy applied to every request. Point `base_url` at a mock server in
/// tests.
pub struct CatalogClient {
    client: Client,
    publishable_key: String,
    base_url: Url,
    /// Additional attempts after the first failure for transient errors.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient errors (connect failures, timeouts, 5xx). Set
    /// to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse
    /// as an absolute URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        publishable_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vitrina/0.1 (storefront)")
            .build()?;

        let parsed =
            Url::parse(base_url.trim_end_matches('/')).map_err(|e| CatalogError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;
        if parsed.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot serve as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            publishable_key: publishable_key.to_owned(),
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.backend_url,
            &config.publishable_key,
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// The backend base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetches a page of products from `GET /store/products`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Api`] on a non-2xx response.
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ProductsResponse, CatalogError> {
        let url = self.products_url(query);
        let body = self.request_text(&url).await?;
        parse_body(&body, "GET /store/products")
    }

    /// Fetches products belonging to a collection.
    ///
    /// Delegates to [`CatalogClient::list_products`] with the collection
    /// filter set, overriding any filter already present in `query`.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::list_products`].
    pub async fn products_in_collection(
        &self,
        collection_id: &str,
        query: &ProductQuery,
    ) -> Result<ProductsResponse, CatalogError> {
        let mut query = query.clone();
        query.collection_id = Some(collection_id.to_owned());
        self.list_products(&query).await
    }

    /// Fetches a single product by handle from `GET /store/products/{handle}`.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::list_products`]; an unknown handle surfaces
    /// as [`CatalogError::Api`] with status 404.
    pub async fn retrieve_product(&self, handle: &str) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["store", "products", handle]);
        let body = self.request_text(&url).await?;
        let envelope: ProductResponse = parse_body(&body, &format!("GET /store/products/{handle}"))?;
        Ok(envelope.product)
    }

    /// Fetches a page of collections from `GET /store/collections`.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::list_products`].
    pub async fn list_collections(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<CollectionsResponse, CatalogError> {
        let mut url = self.endpoint(&["store", "collections"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("offset", &offset.to_string());
        }
        let body = self.request_text(&url).await?;
        parse_body(&body, "GET /store/collections")
    }

    /// Fetches a single collection by handle.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::retrieve_product`].
    pub async fn retrieve_collection(&self, handle: &str) -> Result<Collection, CatalogError> {
        let url = self.endpoint(&["store", "collections", handle]);
        let body = self.request_text(&url).await?;
        let envelope: CollectionResponse =
            parse_body(&body, &format!("GET /store/collections/{handle}"))?;
        Ok(envelope.collection)
    }

    /// Probes backend liveness via `GET /health` (no auth header).
    ///
    /// Returns the HTTP status code on success. A probe reports the current
    /// state, so the retry policy is deliberately not applied.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Api`] on a non-2xx response.
    /// - [`CatalogError::Http`] on network failure.
    pub async fn health(&self) -> Result<u16, CatalogError> {
        let url = self.endpoint(&["health"]);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }
        Ok(status.as_u16())
    }

    /// Builds the product list URL with defaults applied and all values
    /// percent-encoded via [`Url::query_pairs_mut`].
    fn products_url(&self, query: &ProductQuery) -> Url {
        let mut url = self.endpoint(&["store", "products"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.unwrap_or(DEFAULT_LIMIT).to_string());
            pairs.append_pair("offset", &query.offset.unwrap_or(0).to_string());
            let currency = query
                .currency_code
                .as_deref()
                .unwrap_or(DEFAULT_CURRENCY)
                .to_lowercase();
            pairs.append_pair("currency_code", &currency);
            if let Some(collection_id) = &query.collection_id {
                pairs.append_pair("collection_id", collection_id);
            }
            if let Some(region_id) = &query.region_id {
                pairs.append_pair("region_id", region_id);
            }
            if let Some(term) = &query.q {
                pairs.append_pair("q", term);
            }
        }
        url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The constructor rejects cannot-be-a-base URLs, so this branch is
        // always taken for a constructed client.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    /// Sends an authenticated GET request with the retry policy applied and
    /// returns the raw response body on a 2xx status.
    async fn request_text(&self, url: &Url) -> Result<String, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url)
                    .header(PUBLISHABLE_KEY_HEADER, &self.publishable_key)
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(CatalogError::Api {
                        status: status.as_u16(),
                        message: extract_error_message(&body),
                    });
                }
                Ok(response.text().await?)
            }
        })
        .await
    }
}

/// Parses a response body into `T`, attaching the request context on failure.
fn parse_body<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Best-effort extraction of a human-readable message from an error body.
///
/// The backend reports errors as `{"message": "...", "type": "..."}`; when
/// the body is not that shape the raw text is used, truncated so a long
/// HTML error page does not flood the logs.
fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(serde_json::Value::as_str) {
            return message.to_owned();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no error body".to_owned();
    }
    let mut message: String = trimmed.chars().take(200).collect();
    if message.len() < trimmed.len() {
        message.push('…');
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CatalogClient {
        CatalogClient::new(base_url, "pk_test", 30, 0, 0)
            .expect("client construction should not fail")
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = CatalogClient::new("not a url", "pk", 30, 0, 0);
        assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn endpoint_joins_segments_and_strips_trailing_slash() {
        let client = test_client("http://localhost:9000/");
        let url = client.endpoint(&["store", "products"]);
        assert_eq!(url.as_str(), "http://localhost:9000/store/products");
    }

    #[test]
    fn endpoint_percent_encodes_handles() {
        let client = test_client("http://localhost:9000");
        let url = client.endpoint(&["store", "products", "caña dulce"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/store/products/ca%C3%B1a%20dulce"
        );
    }

    #[test]
    fn products_url_applies_defaults() {
        let client = test_client("http://localhost:9000");
        let url = client.products_url(&ProductQuery::default());
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/store/products?limit=10&offset=0&currency_code=usd"
        );
    }

    #[test]
    fn products_url_includes_optional_filters() {
        let client = test_client("http://localhost:9000");
        let query = ProductQuery {
            limit: Some(24),
            offset: Some(48),
            collection_id: Some("pcol_01".to_owned()),
            region_id: Some("reg_01".to_owned()),
            currency_code: Some("EUR".to_owned()),
            q: Some("camiseta".to_owned()),
        };
        let url = client.products_url(&query);
        let rendered = url.as_str();
        assert!(rendered.contains("limit=24"));
        assert!(rendered.contains("offset=48"));
        assert!(rendered.contains("currency_code=eur"), "{rendered}");
        assert!(rendered.contains("collection_id=pcol_01"));
        assert!(rendered.contains("region_id=reg_01"));
        assert!(rendered.contains("q=camiseta"));
    }

    #[test]
    fn extract_error_message_prefers_json_message() {
        let body = r#"{"message": "Publishable key required", "type": "not_allowed"}"#;
        assert_eq!(extract_error_message(body), "Publishable key required");
    }

    #[test]
    fn extract_error_message_falls_back_to_raw_body() {
        assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn extract_error_message_handles_empty_body() {
        assert_eq!(extract_error_message("   "), "no error body");
    }

    #[test]
    fn extract_error_message_truncates_long_bodies() {
        let body = "x".repeat(500);
        let message = extract_error_message(&body);
        assert!(message.chars().count() <= 201);
        assert!(message.ends_with('…'));
    }
}
