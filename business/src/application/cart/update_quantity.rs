use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartRecord, MAX_QUANTITY};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};
use crate::domain::logger::Logger;

pub struct UpdateCartItemQuantityUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCartItemQuantityUseCase for UpdateCartItemQuantityUseCaseImpl {
    async fn execute(
        &self,
        params: UpdateCartItemQuantityParams,
    ) -> Result<CartRecord, CartError> {
        self.logger.info(&format!(
            "Updating quantity of cart item {} to {}",
            params.product_id, params.quantity
        ));

        if params.quantity == 0 || params.quantity > MAX_QUANTITY {
            return Err(CartError::InvalidQuantity);
        }

        let existing = self
            .repository
            .find_by_product_id(&params.product_id, &params.user_id)
            .await?
            .ok_or(CartError::NotFound)?;

        self.repository
            .update_quantity(&params.product_id, &params.user_id, params.quantity)
            .await?;

        let mut item = existing.item;
        item.quantity = params.quantity;
        let updated = CartRecord::from_repository(
            existing.user_id,
            item,
            existing.created_at,
            chrono::Utc::now(),
        );

        self.logger
            .info(&format!("Cart item updated: {}", updated.product_id()));
        Ok(updated)
    }
}
