use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::CartRecord;

/// Remote cart table, one row per `(user_id, product_id)`.
///
/// `update_quantity` and `delete` on a missing row are no-ops; callers that
/// care check with `find_by_product_id` first.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CartRecord>, RepositoryError>;
    async fn find_by_product_id(
        &self,
        product_id: &str,
        user_id: &UserId,
    ) -> Result<Option<CartRecord>, RepositoryError>;
    async fn insert(&self, record: &CartRecord) -> Result<(), RepositoryError>;
    async fn update_quantity(
        &self,
        product_id: &str,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, product_id: &str, user_id: &UserId) -> Result<(), RepositoryError>;
    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
}
