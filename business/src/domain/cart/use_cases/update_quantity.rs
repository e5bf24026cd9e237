use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartRecord;
use crate::domain::shared::value_objects::UserId;

pub struct UpdateCartItemQuantityParams {
    pub user_id: UserId,
    pub product_id: String,
    pub quantity: u32,
}

#[async_trait]
pub trait UpdateCartItemQuantityUseCase: Send + Sync {
    async fn execute(&self, params: UpdateCartItemQuantityParams)
    -> Result<CartRecord, CartError>;
}
