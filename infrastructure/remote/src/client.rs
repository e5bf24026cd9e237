use std::time::Duration;

use reqwest::{Client, Url};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum RemoteConfigError {
    #[error("remote.missing_variable: {0}")]
    MissingVariable(&'static str),
    #[error("remote.invalid_url")]
    InvalidUrl,
    #[error("remote.client_build_failed")]
    ClientBuild(#[source] reqwest::Error),
}

/// Connection settings for the remote cart API.
#[derive(Debug, Clone)]
pub struct RemoteCartConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl RemoteCartConfig {
    pub fn new(base_url: &str) -> Result<Self, RemoteConfigError> {
        let base_url = Url::parse(base_url).map_err(|_| RemoteConfigError::InvalidUrl)?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteConfigError::InvalidUrl);
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Environment variables:
    /// - CART_API_URL: base URL of the cart API (required)
    /// - CART_API_TIMEOUT_SECS: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, RemoteConfigError> {
        let base_url = std::env::var("CART_API_URL")
            .map_err(|_| RemoteConfigError::MissingVariable("CART_API_URL"))?;
        let mut config = Self::new(&base_url)?;
        if let Some(secs) = std::env::var("CART_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// Shared HTTP client for the cart API, bound to one shopper's access token.
pub struct RemoteClient {
    pub client: Client,
    pub base_url: Url,
    access_token: String,
}

impl RemoteClient {
    pub fn new(
        config: &RemoteCartConfig,
        access_token: impl Into<String>,
    ) -> Result<Self, RemoteConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteConfigError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            access_token: access_token.into(),
        })
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// `{base}/users/{user_id}/cart/items[/{product_id}]`, with each segment
    /// percent-encoded.
    pub fn cart_items_url(&self, user_id: &str, product_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", user_id, "cart", "items"]);
            if let Some(product_id) = product_id {
                segments.push(product_id);
            }
        }
        url
    }
}
