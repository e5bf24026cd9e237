use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use business::domain::shared::value_objects::UserId;
use persistence::guest_cart::file_store::DEFAULT_GUEST_CART_PATH;
use remote::client::{RemoteCartConfig, RemoteConfigError};

/// Fireworks storefront cart
///
/// Works on the guest cart file while signed out. Pass `--user-id` and an
/// access token to work on the shopper's remote cart instead.
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Fireworks storefront cart", long_about = None)]
pub struct Cli {
    /// Signed-in shopper; omit to use the guest cart
    #[arg(long, env = "STOREFRONT_USER_ID")]
    pub user_id: Option<String>,

    /// Access token for the remote cart API
    #[arg(long, env = "STOREFRONT_ACCESS_TOKEN", hide_env_values = true, default_value = "")]
    pub access_token: String,

    /// Base URL of the remote cart API
    #[arg(long, env = "CART_API_URL", default_value = "http://127.0.0.1:8080")]
    pub cart_api_url: String,

    /// Remote request timeout in seconds
    #[arg(long, env = "CART_API_TIMEOUT_SECS", default_value_t = 30)]
    pub cart_api_timeout_secs: u64,

    /// Guest cart slot
    #[arg(long, env = "GUEST_CART_PATH", default_value = DEFAULT_GUEST_CART_PATH)]
    pub guest_cart_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List the cart lines and totals
    Show,
    /// Add a product, or raise its quantity when already in the cart
    Add(AddArgs),
    /// Remove a product line
    Remove {
        product_id: String,
    },
    /// Set the quantity of a line; zero or less removes it
    SetQuantity {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct AddArgs {
    pub product_id: String,
    #[arg(long)]
    pub name: String,
    /// Price label as shown in the catalog, e.g. "₹1,200"
    #[arg(long)]
    pub price: String,
    #[arg(long, default_value = "")]
    pub image: String,
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,
    #[arg(long, default_value = "")]
    pub unit: String,
}

impl Cli {
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();
        Self::try_parse()
    }

    /// Blank ids count as signed out.
    pub fn identity(&self) -> Option<UserId> {
        self.user_id.as_deref().and_then(UserId::parse)
    }

    pub fn remote_config(&self) -> Result<RemoteCartConfig, RemoteConfigError> {
        let mut config = RemoteCartConfig::new(&self.cart_api_url)?;
        config.timeout = Duration::from_secs(self.cart_api_timeout_secs);
        Ok(config)
    }
}
