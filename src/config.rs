use crate::import::ViewKey;

/// Default per-view item budget when the host doesn't configure one.
pub const DEFAULT_MAX_ITEMS_PER_VIEW: usize = 50;

/// Connection settings for the remote catalog client.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Base URL of the catalog API.
    pub base_url: String,
    /// Bearer token obtained by the host's sign-in flow.
    pub access_token: String,
    /// Preferred content language, passed through as a query parameter.
    pub language: String,
    /// Preferred content region, passed through as a query parameter.
    pub region: String,
}

impl CatalogConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            access_token: access_token.into(),
            language: "en".to_string(),
            region: "US".to_string(),
        }
    }

    /// Load configuration from environment variables.
    /// In debug builds a `.env` file is loaded first when present.
    pub fn from_env() -> Self {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                tracing::info!("Config: Dev mode activated - loaded .env file");
            } else {
                tracing::debug!("Config: No .env file found");
            }
        }

        let mut config = Self::new(std::env::var("TUBER_ACCESS_TOKEN").unwrap_or_default());

        if let Ok(base_url) = std::env::var("TUBER_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(language) = std::env::var("TUBER_LANGUAGE") {
            config.language = language;
        }
        if let Ok(region) = std::env::var("TUBER_REGION") {
            config.region = region;
        }

        config
    }
}

/// Per-run import settings, supplied by the host as plain values.
/// Reading and validating the host's settings storage is not done here.
#[derive(Clone, Debug)]
pub struct ImportSettings {
    /// The views the user selected for import, in configured order.
    pub view_keys: Vec<ViewKey>,
    /// Item budget applied independently to every view.
    pub max_items_per_view: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            view_keys: Vec::new(),
            max_items_per_view: DEFAULT_MAX_ITEMS_PER_VIEW,
        }
    }
}
