//! Text rendering for the storefront views.
//!
//! Every function builds a `String` so the output is unit-testable; `main`
//! only decides what to fetch and prints the result.

use vitrina_catalog::display::{effective_price, price_label, select_variant};
use vitrina_catalog::types::{Collection, Product, ProductsResponse};
use vitrina_catalog::{CatalogError, Listing, StatusBreakdown};
use vitrina_core::money::format_minor_units;

/// Renders the product grid, or the listing's empty-state message.
pub fn product_grid(listing: &Listing) -> String {
    match listing {
        Listing::Published(cards) => {
            let mut out = String::new();
            for card in cards {
                out.push_str(&format!("• {} — {}\n", card.title, card.price_label));
                out.push_str(&format!("  /products/{}\n", card.handle));
                if let Some(description) = &card.description {
                    out.push_str(&format!("  {description}\n"));
                }
            }
            out
        }
        other => {
            let message = other
                .empty_state_message()
                .unwrap_or_default();
            format!("{message}\n")
        }
    }
}

/// Renders the home view: featured collections strip above the grid.
pub fn home(collections: &[Collection], listing: &Listing) -> String {
    let mut out = String::from("== Nuestros Productos ==\n\n");
    if !collections.is_empty() {
        out.push_str("Colecciones destacadas:\n");
        for collection in collections {
            out.push_str(&format!(
                "  {} (/collections/{})\n",
                collection.title, collection.handle
            ));
        }
        out.push('\n');
    }
    out.push_str(&product_grid(listing));
    out
}

/// Renders the collections index.
pub fn collections_list(collections: &[Collection]) -> String {
    if collections.is_empty() {
        return "No hay colecciones disponibles\n".to_owned();
    }
    let mut out = String::new();
    for collection in collections {
        out.push_str(&format!(
            "• {} (/collections/{})\n",
            collection.title, collection.handle
        ));
        if let Some(description) = &collection.description {
            out.push_str(&format!("  {description}\n"));
        }
    }
    out
}

/// Renders a single product with its variant price list.
///
/// `preferred_variant` drives which variant's price heads the view; each
/// variant is listed with its own resolved price.
pub fn product_detail(
    product: &Product,
    preferred_variant: Option<&str>,
    region_currency: Option<&str>,
) -> String {
    let mut out = format!(
        "{}\n{}\n",
        product.title,
        price_label(product, preferred_variant, region_currency)
    );
    if let Some(description) = &product.description {
        out.push_str(&format!("\n{description}\n"));
    }
    if !product.variants.is_empty() {
        out.push_str("\nVariantes:\n");
        let selected = select_variant(product, preferred_variant).map(|v| v.id.clone());
        for variant in &product.variants {
            let price = effective_price(variant).map_or_else(
                || vitrina_catalog::display::DEFAULT_PRICE_TEXT.to_owned(),
                |(amount, currency)| {
                    format_minor_units(amount, region_currency.unwrap_or(currency))
                },
            );
            let marker = if selected.as_deref() == Some(variant.id.as_str()) {
                "*"
            } else {
                " "
            };
            out.push_str(&format!("  {marker} {} — {price}\n", variant.title));
        }
    }
    out
}

/// Renders a collection header plus the grid of its member products.
pub fn collection_detail(
    collection: &Collection,
    base_url: &str,
    region_currency: Option<&str>,
) -> String {
    let mut out = format!("== {} ==\n", collection.title);
    if let Some(description) = &collection.description {
        out.push_str(&format!("{description}\n"));
    }
    out.push('\n');
    let listing = Listing::from_products(&collection.products, base_url, region_currency);
    out.push_str(&product_grid(&listing));
    out
}

/// Message for a product or collection the backend does not know.
pub fn not_found(kind: &str, handle: &str) -> String {
    format!("{kind} \"{handle}\" no encontrado\n")
}

/// Renders the connection diagnostic: configured endpoints, health probe
/// result, and the publication-status breakdown of the first product page.
pub fn doctor_report(
    backend_url: &str,
    health: &Result<u16, CatalogError>,
    products: &Result<ProductsResponse, CatalogError>,
) -> String {
    let base = backend_url.trim_end_matches('/');
    let mut out = String::from("== Diagnóstico de conexión ==\n");
    out.push_str(&format!("Backend URL:   {base}\n"));
    out.push_str(&format!("Products API:  {base}/store/products\n"));
    out.push_str(&format!("Health check:  {base}/health\n\n"));

    match health {
        Ok(status) => out.push_str(&format!("Conexión:      OK (HTTP {status})\n")),
        Err(e) => out.push_str(&format!("Conexión:      FALLO ({e})\n")),
    }

    match products {
        Ok(response) => {
            let breakdown = StatusBreakdown::tally(&response.products);
            out.push_str(&format!(
                "Productos:     {} en total, {} publicados, {} en borrador\n",
                breakdown.total, breakdown.published, breakdown.draft
            ));
            if breakdown.total > 0 && breakdown.published == 0 {
                out.push_str(
                    "Aviso:         hay productos, pero ninguno está publicado en el admin\n",
                );
            }
        }
        Err(e) => out.push_str(&format!("Productos:     FALLO ({e})\n")),
    }

    out
}
