mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrina_catalog::{graceful, CatalogClient, Listing, ProductQuery};
use vitrina_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "vitrina")]
#[command(about = "Terminal storefront over a Medusa-style commerce backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Home view: featured collections plus the product grid.
    Home,
    /// List published products.
    Products {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Filter by collection id.
        #[arg(long)]
        collection: Option<String>,
        /// ISO 4217 currency code for prices.
        #[arg(long)]
        currency: Option<String>,
        /// Free-text search term.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product by handle.
    Product {
        handle: String,
        /// Variant id to price the product by.
        #[arg(long)]
        variant: Option<String>,
    },
    /// List collections.
    Collections,
    /// Show one collection and its products.
    Collection { handle: String },
    /// Check backend connectivity and product publication status.
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vitrina_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let client = CatalogClient::from_config(&config)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Home => home(&client, &config).await,
        Commands::Products {
            limit,
            offset,
            collection,
            currency,
            search,
        } => {
            products(
                &client,
                &config,
                limit,
                offset,
                collection.as_deref(),
                currency.as_deref(),
                search.as_deref(),
            )
            .await;
        }
        Commands::Product { handle, variant } => {
            product(&client, &config, &handle, variant.as_deref()).await;
        }
        Commands::Collections => collections(&client, &config).await,
        Commands::Collection { handle } => collection(&client, &config, &handle).await,
        Commands::Doctor => doctor(&client).await,
    }

    Ok(())
}

/// Default product query carrying the configured page size and currency.
fn default_query(config: &AppConfig) -> ProductQuery {
    ProductQuery {
        limit: Some(config.page_size),
        offset: Some(0),
        currency_code: Some(config.currency_code.clone()),
        ..ProductQuery::default()
    }
}

/// The products and collections fetches are independent, so they are
/// issued concurrently and awaited jointly.
async fn home(client: &CatalogClient, config: &AppConfig) {
    let query = default_query(config);
    let (products, collections) = tokio::join!(
        graceful::get_products(client, &query),
        graceful::get_collections(client, 4, 0),
    );

    let products = products.map(|r| r.products).unwrap_or_default();
    let collections = collections.map(|r| r.collections).unwrap_or_default();
    let listing = Listing::from_products(
        &products,
        &config.backend_url,
        Some(&config.currency_code),
    );
    print!("{}", render::home(&collections, &listing));
}

async fn products(
    client: &CatalogClient,
    config: &AppConfig,
    limit: Option<u32>,
    offset: Option<u32>,
    collection: Option<&str>,
    currency: Option<&str>,
    search: Option<&str>,
) {
    let mut query = default_query(config);
    if let Some(limit) = limit {
        query.limit = Some(limit);
    }
    if let Some(offset) = offset {
        query.offset = Some(offset);
    }
    if let Some(currency) = currency {
        query.currency_code = Some(currency.to_lowercase());
    }

    let response = match (collection, search) {
        (Some(collection_id), _) => {
            graceful::get_products_by_collection(client, collection_id, &query).await
        }
        (None, Some(term)) => graceful::search_products(client, term, &query).await,
        (None, None) => graceful::get_products(client, &query).await,
    };

    let fetched = response.map(|r| r.products).unwrap_or_default();
    let region_currency = query.currency_code.clone();
    let listing = Listing::from_products(
        &fetched,
        &config.backend_url,
        region_currency.as_deref(),
    );
    print!("{}", render::product_grid(&listing));
}

async fn product(
    client: &CatalogClient,
    config: &AppConfig,
    handle: &str,
    variant: Option<&str>,
) {
    match graceful::get_product(client, handle).await {
        Some(product) => print!(
            "{}",
            render::product_detail(&product, variant, Some(&config.currency_code))
        ),
        None => print!("{}", render::not_found("Producto", handle)),
    }
}

async fn collections(client: &CatalogClient, config: &AppConfig) {
    let fetched = graceful::get_collections(client, config.page_size, 0)
        .await
        .map(|r| r.collections)
        .unwrap_or_default();
    print!("{}", render::collections_list(&fetched));
}

async fn collection(client: &CatalogClient, config: &AppConfig, handle: &str) {
    match graceful::get_collection(client, handle).await {
        Some(collection) => print!(
            "{}",
            render::collection_detail(
                &collection,
                &config.backend_url,
                Some(&config.currency_code)
            )
        ),
        None => print!("{}", render::not_found("Colección", handle)),
    }
}

/// Diagnostics call the typed client directly: the point is to show the
/// errors the graceful layer would swallow.
async fn doctor(client: &CatalogClient) {
    let health = client.health().await;
    let products = client.list_products(&ProductQuery::default()).await;
    print!(
        "{}",
        render::doctor_report(client.base_url(), &health, &products)
    );
}
