use async_trait::async_trait;

use super::model::CartItem;

#[derive(Debug, thiserror::Error)]
pub enum GuestCartError {
    #[error("guest_cart.corrupt")]
    Corrupt,
    #[error("guest_cart.io")]
    Io(#[from] std::io::Error),
}

/// The single local slot holding a signed-out shopper's cart as a JSON array.
#[async_trait]
pub trait GuestCartStore: Send + Sync {
    /// `Ok(None)` when nothing was ever saved.
    async fn load(&self) -> Result<Option<Vec<CartItem>>, GuestCartError>;
    /// Overwrites the slot with the full list.
    async fn save(&self, items: &[CartItem]) -> Result<(), GuestCartError>;
}
