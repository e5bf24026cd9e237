use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::cart::model::{CartItem, CartRecord};
use business::domain::shared::value_objects::UserId;

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub user_id: String,
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItemEntity {
    /// Rows with a non-positive quantity map to zero and are dropped when
    /// the cart is assembled.
    pub fn into_domain(self) -> CartRecord {
        let item = CartItem {
            id: self.product_id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: u32::try_from(self.quantity).unwrap_or(0),
            unit: self.unit,
        };
        CartRecord::from_repository(
            UserId::new(self.user_id),
            item,
            self.created_at,
            self.updated_at,
        )
    }
}
