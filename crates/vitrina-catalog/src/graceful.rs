//! Catch-and-log fetch wrappers for rendering call sites.
//!
//! The storefront never crashes on a failed backend call: every failure is
//! logged and converted to `None`, and the caller renders an empty grid or
//! the fallback text instead. Code that needs the error itself (e.g. the
//! diagnostics command) calls the [`crate::client::CatalogClient`] methods
//! directly.

use crate::client::{CatalogClient, ProductQuery};
use crate::types::{Collection, CollectionsResponse, Product, ProductsResponse};

/// Fetches a page of products, or `None` on any failure.
pub async fn get_products(
    client: &CatalogClient,
    query: &ProductQuery,
) -> Option<ProductsResponse> {
    match client.list_products(query).await {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(error = %e, "error fetching products");
            None
        }
    }
}

/// Fetches a single product by handle, or `None` on any failure.
pub async fn get_product(client: &CatalogClient, handle: &str) -> Option<Product> {
    match client.retrieve_product(handle).await {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(handle, error = %e, "error fetching product");
            None
        }
    }
}

/// Fetches a page of collections, or `None` on any failure.
pub async fn get_collections(
    client: &CatalogClient,
    limit: u32,
    offset: u32,
) -> Option<CollectionsResponse> {
    match client.list_collections(limit, offset).await {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(error = %e, "error fetching collections");
            None
        }
    }
}

/// Fetches a single collection by handle, or `None` on any failure.
pub async fn get_collection(client: &CatalogClient, handle: &str) -> Option<Collection> {
    match client.retrieve_collection(handle).await {
        Ok(collection) => Some(collection),
        Err(e) => {
            tracing::warn!(handle, error = %e, "error fetching collection");
            None
        }
    }
}

/// Fetches products belonging to a collection, or `None` on any failure.
pub async fn get_products_by_collection(
    client: &CatalogClient,
    collection_id: &str,
    query: &ProductQuery,
) -> Option<ProductsResponse> {
    match client.products_in_collection(collection_id, query).await {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(collection_id, error = %e, "error fetching collection products");
            None
        }
    }
}

/// Searches the catalog by free text, or `None` on any failure.
pub async fn search_products(
    client: &CatalogClient,
    term: &str,
    query: &ProductQuery,
) -> Option<ProductsResponse> {
    let mut query = query.clone();
    query.q = Some(term.to_owned());
    match client.list_products(&query).await {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(term, error = %e, "error searching products");
            None
        }
    }
}
