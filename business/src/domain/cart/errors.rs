#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.product_id_empty")]
    ProductIdEmpty,
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.not_found")]
    NotFound,
    #[error("cart.already_exists")]
    AlreadyExists,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
