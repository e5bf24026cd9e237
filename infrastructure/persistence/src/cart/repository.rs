use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::cart::model::CartRecord;
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use super::entity::CartItemEntity;

const SELECT_COLUMNS: &str =
    "SELECT user_id, product_id, name, price, image, quantity, unit, created_at, updated_at FROM cart_items";

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %err, "cart_items query failed");
    RepositoryError::DatabaseError
}

fn to_column_quantity(quantity: u32) -> i32 {
    i32::try_from(quantity).unwrap_or(i32::MAX)
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CartRecord>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = $1 ORDER BY created_at ASC, product_id ASC"
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn find_by_product_id(
        &self,
        product_id: &str,
        user_id: &UserId,
    ) -> Result<Option<CartRecord>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(&format!(
            "{SELECT_COLUMNS} WHERE product_id = $1 AND user_id = $2"
        ))
        .bind(product_id)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn insert(&self, record: &CartRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO cart_items (user_id, product_id, name, price, image, quantity, unit, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(record.user_id.as_str())
        .bind(&record.item.id)
        .bind(&record.item.name)
        .bind(&record.item.price)
        .bind(&record.item.image)
        .bind(to_column_quantity(record.item.quantity))
        .bind(&record.item.unit)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Duplicated
            }
            other => database_error(other),
        })?;

        Ok(())
    }

    async fn update_quantity(
        &self,
        product_id: &str,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE cart_items SET quantity = $1, updated_at = now() WHERE product_id = $2 AND user_id = $3",
        )
        .bind(to_column_quantity(quantity))
        .bind(product_id)
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn delete(&self, product_id: &str, user_id: &UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE product_id = $1 AND user_id = $2")
            .bind(product_id)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
