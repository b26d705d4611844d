//! Commerce backend response types.
//!
//! All entities are owned and defined by the external backend; this crate
//! only consumes read-only projections of them. List endpoints wrap their
//! payload in a counted envelope (`products`/`collections` plus `count`,
//! `offset`, `limit`); retrieve endpoints wrap the single resource in a
//! keyed object (`{ "product": … }`).

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Lifecycle status assigned to a product in the backend admin.
///
/// The storefront only renders `published` products; `draft` is surfaced in
/// diagnostics. `proposed` and `rejected` exist in the backend's lifecycle
/// and are decoded so an unexpected status never fails a whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Proposed,
    Published,
    Rejected,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Draft => write!(f, "draft"),
            ProductStatus::Proposed => write!(f, "proposed"),
            ProductStatus::Published => write!(f, "published"),
            ProductStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A product as returned by `/store/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    /// URL-safe slug identifying the product.
    pub handle: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub status: ProductStatus,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub collection: Option<Collection>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A purchasable configuration of a product, carrying its own price.
#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Region-resolved price, present on current backend versions.
    #[serde(default)]
    pub calculated_price: Option<CalculatedPrice>,
    /// Flat price list, present on the legacy response shape.
    #[serde(default)]
    pub prices: Vec<Price>,
}

/// Price resolved by the backend for the requested region/currency.
/// The amount is an integer in minor currency units (e.g. cents).
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatedPrice {
    pub calculated_amount: i64,
    pub currency_code: String,
}

/// Entry of the legacy flat price list, also in minor units.
#[derive(Debug, Clone, Deserialize)]
pub struct Price {
    pub amount: i64,
    pub currency_code: String,
}

/// A curated set of products as returned by `/store/collections`.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Counted envelope for the product list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub count: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Counted envelope for the collection list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsResponse {
    pub collections: Vec<Collection>,
    pub count: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Wrapper for the single-product retrieve endpoint: `{ "product": { … } }`.
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Wrapper for the single-collection retrieve endpoint.
#[derive(Debug, Deserialize)]
pub struct CollectionResponse {
    pub collection: Collection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_status_decodes_lowercase_wire_values() {
        let status: ProductStatus = serde_json::from_str("\"published\"").expect("valid status");
        assert_eq!(status, ProductStatus::Published);
        let status: ProductStatus = serde_json::from_str("\"draft\"").expect("valid status");
        assert_eq!(status, ProductStatus::Draft);
    }

    #[test]
    fn product_decodes_with_absent_optionals() {
        let json = serde_json::json!({
            "id": "prod_01",
            "title": "Camiseta",
            "handle": "camiseta",
            "status": "published"
        });
        let product: Product = serde_json::from_value(json).expect("minimal product");
        assert!(product.variants.is_empty());
        assert!(product.description.is_none());
        assert!(product.thumbnail.is_none());
        assert!(product.created_at.is_none());
    }

    #[test]
    fn variant_decodes_both_price_shapes() {
        let json = serde_json::json!({
            "id": "variant_01",
            "title": "S",
            "calculated_price": { "calculated_amount": 1999, "currency_code": "usd" },
            "prices": [{ "amount": 2499, "currency_code": "eur" }]
        });
        let variant: Variant = serde_json::from_value(json).expect("variant");
        assert_eq!(
            variant
                .calculated_price
                .as_ref()
                .map(|p| p.calculated_amount),
            Some(1999)
        );
        assert_eq!(variant.prices[0].amount, 2499);
    }

    #[test]
    fn products_response_decodes_envelope() {
        let json = serde_json::json!({
            "products": [],
            "count": 0,
            "offset": 0,
            "limit": 10
        });
        let response: ProductsResponse = serde_json::from_value(json).expect("envelope");
        assert_eq!(response.count, 0);
        assert_eq!(response.limit, 10);
    }
}
