use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use business::domain::cart::model::{CartItem, CartRecord};
use business::domain::shared::value_objects::UserId;

/// Body of `POST /users/{user_id}/cart/items`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCartItemBody<'a> {
    pub product_id: &'a str,
    pub name: &'a str,
    pub price: &'a str,
    pub image: &'a str,
    pub quantity: u32,
    pub unit: &'a str,
}

impl<'a> From<&'a CartItem> for CreateCartItemBody<'a> {
    fn from(item: &'a CartItem) -> Self {
        Self {
            product_id: &item.id,
            name: &item.name,
            price: &item.price,
            image: &item.image,
            quantity: item.quantity,
            unit: &item.unit,
        }
    }
}

/// Body of `PUT /users/{user_id}/cart/items/{product_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateQuantityBody {
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemPayload {
    pub product_id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItemPayload {
    pub fn into_record(self, user_id: &UserId) -> CartRecord {
        CartRecord::from_repository(
            user_id.clone(),
            CartItem {
                id: self.product_id,
                name: self.name,
                price: self.price,
                image: self.image,
                quantity: self.quantity,
                unit: self.unit,
            },
            self.created_at,
            self.updated_at,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClearCartPayload {
    pub count: u64,
}
