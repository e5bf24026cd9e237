use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            CartError::ProductIdEmpty => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "cart.product_id_empty",
            ),
            CartError::InvalidQuantity => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "cart.invalid_quantity",
            ),
            CartError::NotFound => (StatusCode::NOT_FOUND, "NotFound", "cart.not_found"),
            CartError::AlreadyExists => (StatusCode::CONFLICT, "Conflict", "cart.already_exists"),
            CartError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "Cart request failed");
        }

        (status, Json(ErrorResponse::new(name, message)))
    }
}
