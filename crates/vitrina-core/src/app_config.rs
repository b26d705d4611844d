#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Storefront configuration, sourced from environment variables.
///
/// The backend base URL and publishable key identify the commerce backend
/// this storefront reads from; everything else tunes the HTTP client and
/// presentation defaults.
#[derive(Clone)]
pub struct AppConfig {
    pub backend_url: String,
    /// Public, low-privilege API credential sent as `x-publishable-api-key`.
    pub publishable_key: String,
    pub env: Environment,
    pub log_level: String,
    /// BCP 47 locale tag used to pick presentation text (e.g. `es-ES`).
    pub locale: String,
    /// Default ISO 4217 currency code for product listings, lowercase.
    pub currency_code: String,
    pub request_timeout_secs: u64,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Default page size for product and collection listings.
    pub page_size: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend_url", &self.backend_url)
            .field("publishable_key", &"[redacted]")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("locale", &self.locale)
            .field("currency_code", &self.currency_code)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("page_size", &self.page_size)
            .finish()
    }
}
