use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::cart::model::CartRecord;

#[derive(Debug, Clone, Object)]
pub struct CreateCartItemRequest {
    /// Catalog product identifier (cannot be empty)
    pub product_id: String,
    /// Product name at the time it was added
    pub name: String,
    /// Localized price label, e.g. "₹1,200"
    pub price: String,
    /// Product image reference
    #[oai(default)]
    pub image: String,
    /// Number of units (at least 1)
    pub quantity: u32,
    /// Packaging label, e.g. "Box"
    #[oai(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCartItemQuantityRequest {
    /// New number of units (at least 1)
    pub quantity: u32,
}

#[derive(Debug, Clone, Object)]
pub struct CartItemResponse {
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
    pub unit: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<CartRecord> for CartItemResponse {
    fn from(record: CartRecord) -> Self {
        Self {
            product_id: record.item.id,
            name: record.item.name,
            price: record.item.price,
            image: record.item.image,
            quantity: record.item.quantity,
            unit: record.item.unit,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ClearCartResponse {
    /// Number of cart rows removed
    pub count: u64,
}
