use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartItem, CartRecord};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::create::{CreateCartItemParams, CreateCartItemUseCase};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

pub struct CreateCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateCartItemUseCase for CreateCartItemUseCaseImpl {
    async fn execute(&self, params: CreateCartItemParams) -> Result<CartRecord, CartError> {
        self.logger.info(&format!(
            "Creating cart item {} for {}",
            params.product_id, params.user_id
        ));

        let item = CartItem::new(
            params.product_id,
            params.name,
            params.price,
            params.image,
            params.quantity,
            params.unit,
        )?;

        if self
            .repository
            .find_by_product_id(&item.id, &params.user_id)
            .await?
            .is_some()
        {
            self.logger
                .warn(&format!("Cart item {} already exists", item.id));
            return Err(CartError::AlreadyExists);
        }

        let record = CartRecord::new(params.user_id, item);
        self.repository
            .insert(&record)
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicated => CartError::AlreadyExists,
                other => CartError::Repository(other),
            })?;

        self.logger
            .info(&format!("Cart item created: {}", record.product_id()));
        Ok(record)
    }
}
