use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartRecord;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
use crate::domain::logger::Logger;

pub struct GetCartItemsUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartItemsUseCase for GetCartItemsUseCaseImpl {
    async fn execute(&self, params: GetCartItemsParams) -> Result<Vec<CartRecord>, CartError> {
        self.logger
            .info(&format!("Getting cart items for {}", params.user_id));
        let records = self.repository.get_all(&params.user_id).await?;
        self.logger
            .info(&format!("Retrieved {} cart items", records.len()));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::test_support::{MockCartRepo, cart_record, mock_logger, test_user_id};

    #[tokio::test]
    async fn should_return_all_cart_items_of_user() {
        let user_id = test_user_id();
        let rows = vec![
            cart_record(&user_id, "p1", "₹100", 1),
            cart_record(&user_id, "p2", "₹35", 4),
        ];
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_all()
            .withf(|user_id| user_id.as_str() == "test-user-id")
            .returning(move |_| Ok(rows.clone()));

        let use_case = GetCartItemsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(GetCartItemsParams { user_id }).await;

        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_propagate_repository_failure() {
        let mut mock_repo = MockCartRepo::new();
        mock_repo
            .expect_get_all()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let use_case = GetCartItemsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(GetCartItemsParams {
                user_id: test_user_id(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::Repository(RepositoryError::DatabaseError)
        ));
    }
}
