//! Normalization of raw backend products into presentable storefront items.
//!
//! The backend reports prices in two shapes (`calculated_price` on current
//! versions, a flat `prices` list on the legacy one) and products in every
//! lifecycle state. This module is the single place where a variant is
//! chosen, a price is extracted and formatted, and non-published products
//! are filtered out.

use vitrina_core::money::format_minor_units;

use crate::types::{Product, ProductStatus, Variant};

/// Fixed placeholder shown when no price can be resolved for a product.
pub const DEFAULT_PRICE_TEXT: &str = "Precio no disponible";

/// Empty-state text for a catalog with no products at all.
pub const EMPTY_CATALOG_TEXT: &str = "No hay productos disponibles";

/// Extracts `(amount_in_minor_units, currency_code)` from a variant.
///
/// `calculated_price` is authoritative; the first entry of the legacy
/// `prices` list is honoured only when it is absent. Both shapes carry
/// minor units — conversion to major units happens in the formatting
/// layer, never here.
#[must_use]
pub fn effective_price(variant: &Variant) -> Option<(i64, &str)> {
    if let Some(calculated) = &variant.calculated_price {
        return Some((
            calculated.calculated_amount,
            calculated.currency_code.as_str(),
        ));
    }
    variant
        .prices
        .first()
        .map(|p| (p.amount, p.currency_code.as_str()))
}

/// Deterministically selects the variant to display for a product.
///
/// A caller-supplied `preferred` id wins regardless of price ordering.
/// Otherwise the variant with the lowest effective price is chosen;
/// variants without a resolvable price sort last, and ties keep the first
/// variant in backend order. Returns `None` only for a product with zero
/// variants.
#[must_use]
pub fn select_variant<'a>(product: &'a Product, preferred: Option<&str>) -> Option<&'a Variant> {
    if let Some(id) = preferred {
        if let Some(variant) = product.variants.iter().find(|v| v.id == id) {
            return Some(variant);
        }
    }
    product
        .variants
        .iter()
        .enumerate()
        .min_by_key(|(i, v)| (effective_price(v).map_or(i64::MAX, |(amount, _)| amount), *i))
        .map(|(_, v)| v)
}

/// Formats the display price for a product, or the fixed fallback text.
///
/// `region_currency` overrides the variant's own currency code when the
/// caller renders for a specific region.
#[must_use]
pub fn price_label(
    product: &Product,
    preferred: Option<&str>,
    region_currency: Option<&str>,
) -> String {
    let Some(variant) = select_variant(product, preferred) else {
        return DEFAULT_PRICE_TEXT.to_owned();
    };
    let Some((amount, variant_currency)) = effective_price(variant) else {
        return DEFAULT_PRICE_TEXT.to_owned();
    };
    let currency = region_currency.unwrap_or(variant_currency);
    format_minor_units(amount, currency)
}

/// Filters a listing down to products with status exactly `published`,
/// preserving relative order.
#[must_use]
pub fn published_only(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.status == ProductStatus::Published)
        .collect()
}

/// Resolves a thumbnail reference to an absolute URL.
///
/// Absolute URLs pass through untouched; relative paths are joined onto
/// the backend base URL.
#[must_use]
pub fn resolve_image_url(base_url: &str, thumbnail: &str) -> String {
    if thumbnail.starts_with("http") {
        return thumbnail.to_owned();
    }
    let base = base_url.trim_end_matches('/');
    if thumbnail.starts_with('/') {
        format!("{base}{thumbnail}")
    } else {
        format!("{base}/{thumbnail}")
    }
}

/// Truncates text to `max_chars` characters, appending an ellipsis.
///
/// Operates on characters, not bytes, so multibyte text never splits a
/// code point.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

/// A product projected for rendering: resolved image, formatted price,
/// truncated description.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_label: String,
}

impl ProductCard {
    /// Maximum description length shown on a card.
    const DESCRIPTION_CHARS: usize = 100;

    #[must_use]
    pub fn from_product(product: &Product, base_url: &str, region_currency: Option<&str>) -> Self {
        Self::with_variant(product, base_url, None, region_currency)
    }

    /// Builds a card with a caller-selected variant driving the price.
    #[must_use]
    pub fn with_variant(
        product: &Product,
        base_url: &str,
        preferred_variant: Option<&str>,
        region_currency: Option<&str>,
    ) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            handle: product.handle.clone(),
            description: product
                .description
                .as_deref()
                .map(|d| truncate_text(d, Self::DESCRIPTION_CHARS)),
            image_url: product
                .thumbnail
                .as_deref()
                .map(|t| resolve_image_url(base_url, t)),
            price_label: price_label(product, preferred_variant, region_currency),
        }
    }
}

/// A product listing with its two distinct empty states.
///
/// An empty grid means something different depending on whether the
/// catalog had no products at all or had products that are all
/// unpublished; the storefront shows a different message for each.
#[derive(Debug, Clone)]
pub enum Listing {
    /// The backend returned zero products.
    Empty,
    /// Products were found but none has status `published`.
    NonePublished { found: usize },
    /// Published products, projected for rendering.
    Published(Vec<ProductCard>),
}

impl Listing {
    #[must_use]
    pub fn from_products(
        products: &[Product],
        base_url: &str,
        region_currency: Option<&str>,
    ) -> Self {
        if products.is_empty() {
            return Listing::Empty;
        }
        let published = published_only(products);
        if published.is_empty() {
            return Listing::NonePublished {
                found: products.len(),
            };
        }
        Listing::Published(
            published
                .into_iter()
                .map(|p| ProductCard::from_product(p, base_url, region_currency))
                .collect(),
        )
    }

    /// The message to show instead of the grid, or `None` when there are
    /// products to render.
    #[must_use]
    pub fn empty_state_message(&self) -> Option<String> {
        match self {
            Listing::Empty => Some(EMPTY_CATALOG_TEXT.to_owned()),
            Listing::NonePublished { found } => Some(format!(
                "Se encontraron {found} producto(s), pero ninguno está publicado"
            )),
            Listing::Published(_) => None,
        }
    }
}

/// Counts of products per lifecycle status, for connection diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
}

impl StatusBreakdown {
    #[must_use]
    pub fn tally(products: &[Product]) -> Self {
        Self {
            total: products.len(),
            published: products
                .iter()
                .filter(|p| p.status == ProductStatus::Published)
                .count(),
            draft: products
                .iter()
                .filter(|p| p.status == ProductStatus::Draft)
                .count(),
        }
    }
}
