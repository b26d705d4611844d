pub mod client;
pub mod display;
pub mod error;
pub mod graceful;
mod retry;
pub mod types;

pub use client::{CatalogClient, ProductQuery};
pub use display::{Listing, ProductCard, StatusBreakdown};
pub use error::CatalogError;
pub use types::{Collection, CollectionsResponse, Product, ProductStatus, ProductsResponse, Variant};
