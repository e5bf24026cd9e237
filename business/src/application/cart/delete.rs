use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::delete::{DeleteCartItemParams, DeleteCartItemUseCase};
use crate::domain::logger::Logger;

pub struct DeleteCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteCartItemUseCase for DeleteCartItemUseCaseImpl {
    async fn execute(&self, params: DeleteCartItemParams) -> Result<(), CartError> {
        self.logger
            .info(&format!("Deleting cart item: {}", params.product_id));

        // Verify it exists
        self.repository
            .find_by_product_id(&params.product_id, &params.user_id)
            .await?
            .ok_or(CartError::NotFound)?;

        self.repository
            .delete(&params.product_id, &params.user_id)
            .await?;

        self.logger
            .info(&format!("Cart item deleted: {}", params.product_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::test_support::{MockCartRepo, cart_record, mock_logger, test_user_id};

    #[tokio::test]
    async fn should_delete_existing_cart_item() {
        let existing = cart_record(&test_user_id(), "p1", "₹100", 1);
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_find_by_product_id()
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_repo
            .expect_delete()
            .withf(|product_id, user_id| product_id == "p1" && user_id.as_str() == "test-user-id")
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = DeleteCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteCartItemParams {
                user_id: test_user_id(),
                product_id: "p1".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_nonexistent() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_find_by_product_id()
            .returning(|_, _| Ok(None));

        let use_case = DeleteCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteCartItemParams {
                user_id: test_user_id(),
                product_id: "p1".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::NotFound));
    }

    #[tokio::test]
    async fn should_surface_repository_failure() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_find_by_product_id()
            .returning(|_, _| Err(RepositoryError::Unreachable));

        let use_case = DeleteCartItemUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteCartItemParams {
                user_id: test_user_id(),
                product_id: "p1".to_string(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::Repository(RepositoryError::Unreachable)
        ));
    }
}
