use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use business::application::cart::manager::CartManager;
use logger::{TracingLogger, TracingNotifier};
use persistence::guest_cart::file_store::JsonFileGuestCartStore;
use remote::cart_repository::CartRepositoryHttp;
use remote::client::RemoteClient;

mod cli;
mod commands;

use cli::Cli;

/// Storefront cart entry point
///
/// Loads the cart for the given identity, applies one command and prints
/// the resulting cart. Failures are also reported through the notifier.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::load().unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let remote_client = RemoteClient::new(&cli.remote_config()?, cli.access_token.clone())?;
    let manager = CartManager::new(
        Arc::new(CartRepositoryHttp::new(remote_client)),
        Arc::new(JsonFileGuestCartStore::new(&cli.guest_cart_path)),
        Arc::new(TracingNotifier),
        Arc::new(TracingLogger),
    );

    if let Err(e) = manager.set_identity(cli.identity()).await {
        eprintln!("{e}");
        process::exit(1);
    }

    match commands::execute(&manager, cli.command).await {
        Ok(out) => {
            print!("{out}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
