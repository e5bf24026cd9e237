use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::create::{CreateCartItemParams, CreateCartItemUseCase};
use business::domain::cart::use_cases::delete::{DeleteCartItemParams, DeleteCartItemUseCase};
use business::domain::cart::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
use business::domain::cart::use_cases::get_by_product_id::{
    GetCartItemParams, GetCartItemUseCase,
};
use business::domain::cart::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};

use crate::api::cart::dto::{
    CartItemResponse, ClearCartResponse, CreateCartItemRequest, UpdateCartItemQuantityRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::JwtBearer;
use crate::api::tags::ApiTags;

pub struct CartApi {
    get_all_use_case: Arc<dyn GetCartItemsUseCase>,
    get_item_use_case: Arc<dyn GetCartItemUseCase>,
    create_use_case: Arc<dyn CreateCartItemUseCase>,
    update_quantity_use_case: Arc<dyn UpdateCartItemQuantityUseCase>,
    delete_use_case: Arc<dyn DeleteCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
}

impl CartApi {
    pub fn new(
        get_all_use_case: Arc<dyn GetCartItemsUseCase>,
        get_item_use_case: Arc<dyn GetCartItemUseCase>,
        create_use_case: Arc<dyn CreateCartItemUseCase>,
        update_quantity_use_case: Arc<dyn UpdateCartItemQuantityUseCase>,
        delete_use_case: Arc<dyn DeleteCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
    ) -> Self {
        Self {
            get_all_use_case,
            get_item_use_case,
            create_use_case,
            update_quantity_use_case,
            delete_use_case,
            clear_use_case,
        }
    }
}

/// Shopper cart API
///
/// Remote cart rows keyed by shopper and product. Every endpoint requires a
/// bearer token issued to the shopper named in the path.
#[OpenApi]
impl CartApi {
    /// List cart items
    ///
    /// Returns the shopper's cart rows, oldest first.
    #[oai(path = "/users/:user_id/cart/items", method = "get", tag = "ApiTags::Cart")]
    async fn get_all(&self, auth: JwtBearer, user_id: Path<String>) -> GetCartItemsResponse {
        let Some(user_id) = auth.authorize(&user_id.0) else {
            return GetCartItemsResponse::Forbidden(ErrorResponse::forbidden());
        };

        match self
            .get_all_use_case
            .execute(GetCartItemsParams { user_id })
            .await
        {
            Ok(records) => {
                let responses: Vec<CartItemResponse> =
                    records.into_iter().map(|r| r.into()).collect();
                GetCartItemsResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetCartItemsResponse::InternalError(json)
            }
        }
    }

    /// Get a cart item
    #[oai(
        path = "/users/:user_id/cart/items/:product_id",
        method = "get",
        tag = "ApiTags::Cart"
    )]
    async fn get_item(
        &self,
        auth: JwtBearer,
        user_id: Path<String>,
        product_id: Path<String>,
    ) -> GetCartItemResponse {
        let Some(user_id) = auth.authorize(&user_id.0) else {
            return GetCartItemResponse::Forbidden(ErrorResponse::forbidden());
        };

        match self
            .get_item_use_case
            .execute(GetCartItemParams {
                user_id,
                product_id: product_id.0,
            })
            .await
        {
            Ok(record) => GetCartItemResponse::Ok(Json(record.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetCartItemResponse::NotFound(json),
                    _ => GetCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Add a cart item
    ///
    /// Inserts a new row carrying the product's display fields. Fails with
    /// 409 when the product is already in the cart; raise its quantity with
    /// PUT instead.
    #[oai(path = "/users/:user_id/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn create(
        &self,
        auth: JwtBearer,
        user_id: Path<String>,
        body: Json<CreateCartItemRequest>,
    ) -> CreateCartItemResponse {
        let Some(user_id) = auth.authorize(&user_id.0) else {
            return CreateCartItemResponse::Forbidden(ErrorResponse::forbidden());
        };

        let params = CreateCartItemParams {
            user_id,
            product_id: body.0.product_id,
            name: body.0.name,
            price: body.0.price,
            image: body.0.image,
            quantity: body.0.quantity,
            unit: body.0.unit,
        };

        match self.create_use_case.execute(params).await {
            Ok(record) => CreateCartItemResponse::Created(Json(record.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateCartItemResponse::BadRequest(json),
                    409 => CreateCartItemResponse::Conflict(json),
                    _ => CreateCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Set a cart item quantity
    #[oai(
        path = "/users/:user_id/cart/items/:product_id",
        method = "put",
        tag = "ApiTags::Cart"
    )]
    async fn update_quantity(
        &self,
        auth: JwtBearer,
        user_id: Path<String>,
        product_id: Path<String>,
        body: Json<UpdateCartItemQuantityRequest>,
    ) -> UpdateCartItemQuantityResponse {
        let Some(user_id) = auth.authorize(&user_id.0) else {
            return UpdateCartItemQuantityResponse::Forbidden(ErrorResponse::forbidden());
        };

        let params = UpdateCartItemQuantityParams {
            user_id,
            product_id: product_id.0,
            quantity: body.0.quantity,
        };

        match self.update_quantity_use_case.execute(params).await {
            Ok(record) => UpdateCartItemQuantityResponse::Ok(Json(record.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateCartItemQuantityResponse::BadRequest(json),
                    404 => UpdateCartItemQuantityResponse::NotFound(json),
                    _ => UpdateCartItemQuantityResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove a cart item
    #[oai(
        path = "/users/:user_id/cart/items/:product_id",
        method = "delete",
        tag = "ApiTags::Cart"
    )]
    async fn delete(
        &self,
        auth: JwtBearer,
        user_id: Path<String>,
        product_id: Path<String>,
    ) -> DeleteCartItemResponse {
        let Some(user_id) = auth.authorize(&user_id.0) else {
            return DeleteCartItemResponse::Forbidden(ErrorResponse::forbidden());
        };

        match self
            .delete_use_case
            .execute(DeleteCartItemParams {
                user_id,
                product_id: product_id.0,
            })
            .await
        {
            Ok(()) => DeleteCartItemResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteCartItemResponse::NotFound(json),
                    _ => DeleteCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Clear the cart
    ///
    /// Removes every row of the shopper's cart.
    #[oai(path = "/users/:user_id/cart/items", method = "delete", tag = "ApiTags::Cart")]
    async fn clear(&self, auth: JwtBearer, user_id: Path<String>) -> ClearCartItemsResponse {
        let Some(user_id) = auth.authorize(&user_id.0) else {
            return ClearCartItemsResponse::Forbidden(ErrorResponse::forbidden());
        };

        match self.clear_use_case.execute(ClearCartParams { user_id }).await {
            Ok(count) => ClearCartItemsResponse::Ok(Json(ClearCartResponse { count })),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ClearCartItemsResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartItemsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<CartItemResponse>>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartItemResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateCartItemResponse {
    #[oai(status = 201)]
    Created(Json<CartItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateCartItemQuantityResponse {
    #[oai(status = 200)]
    Ok(Json<CartItemResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteCartItemResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCartItemsResponse {
    #[oai(status = 200)]
    Ok(Json<ClearCartResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
