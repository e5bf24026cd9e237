use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use business::domain::cart::guest_store::{GuestCartError, GuestCartStore};
use business::domain::cart::model::CartItem;

pub const DEFAULT_GUEST_CART_PATH: &str = ".storefront/cart.json";

/// Guest cart slot backed by a single JSON file holding the serialized
/// array of cart items.
pub struct JsonFileGuestCartStore {
    path: PathBuf,
}

impl JsonFileGuestCartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Environment variables:
    /// - GUEST_CART_PATH: location of the slot (default: ".storefront/cart.json")
    pub fn from_env() -> Self {
        let path = std::env::var("GUEST_CART_PATH")
            .unwrap_or_else(|_| DEFAULT_GUEST_CART_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl GuestCartStore for JsonFileGuestCartStore {
    async fn load(&self) -> Result<Option<Vec<CartItem>>, GuestCartError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str::<Vec<CartItem>>(&raw)
            .map(Some)
            .map_err(|_| GuestCartError::Corrupt)
    }

    async fn save(&self, items: &[CartItem]) -> Result<(), GuestCartError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec(items).map_err(|_| GuestCartError::Corrupt)?;

        // Write beside the slot and rename over it so readers never see a
        // half-written array.
        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!(path = %self.path.display(), items = items.len(), "Saved guest cart");
        Ok(())
    }
}
