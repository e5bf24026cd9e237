use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartRecord;
use crate::domain::shared::value_objects::UserId;

pub struct GetCartItemParams {
    pub user_id: UserId,
    pub product_id: String,
}

#[async_trait]
pub trait GetCartItemUseCase: Send + Sync {
    async fn execute(&self, params: GetCartItemParams) -> Result<CartRecord, CartError>;
}
