use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartRecord;
use crate::domain::shared::value_objects::UserId;

pub struct CreateCartItemParams {
    pub user_id: UserId,
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
    pub unit: String,
}

#[async_trait]
pub trait CreateCartItemUseCase: Send + Sync {
    async fn execute(&self, params: CreateCartItemParams) -> Result<CartRecord, CartError>;
}
