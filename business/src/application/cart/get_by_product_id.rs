use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartRecord;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_by_product_id::{GetCartItemParams, GetCartItemUseCase};
use crate::domain::logger::Logger;

pub struct GetCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartItemUseCase for GetCartItemUseCaseImpl {
    async fn execute(&self, params: GetCartItemParams) -> Result<CartRecord, CartError> {
        self.logger
            .debug(&format!("Getting cart item {}", params.product_id));
        self.repository
            .find_by_product_id(&params.product_id, &params.user_id)
            .await?
            .ok_or(CartError::NotFound)
    }
}
