use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};

use business::domain::cart::model::CartRecord;
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use crate::client::RemoteClient;
use crate::dto::{CartItemPayload, ClearCartPayload, CreateCartItemBody, UpdateQuantityBody};

/// Remote cart table reached through the cart REST API. The API enforces
/// that the bearer token belongs to the user in the path.
pub struct CartRepositoryHttp {
    client: RemoteClient,
}

impl CartRepositoryHttp {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RepositoryError> {
        request
            .header("Authorization", self.client.auth_header())
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Cart API unreachable");
                RepositoryError::Unreachable
            })
    }
}

pub(crate) fn status_error(status: StatusCode) -> RepositoryError {
    match status {
        StatusCode::NOT_FOUND => RepositoryError::NotFound,
        StatusCode::CONFLICT => RepositoryError::Duplicated,
        _ => RepositoryError::DatabaseError,
    }
}

/// Updates and deletes of absent rows are no-ops for the repository port.
pub(crate) fn accept_missing(status: StatusCode) -> Result<(), RepositoryError> {
    if status.is_success() || status == StatusCode::NOT_FOUND {
        Ok(())
    } else {
        Err(status_error(status))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
    response.json::<T>().await.map_err(|err| {
        tracing::warn!(error = %err, "Malformed cart API response");
        RepositoryError::DatabaseError
    })
}

#[async_trait]
impl CartRepository for CartRepositoryHttp {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CartRecord>, RepositoryError> {
        let url = self.client.cart_items_url(user_id.as_str(), None);
        let response = self.send(self.client.client.get(url)).await?;
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let payloads: Vec<CartItemPayload> = decode(response).await?;
        Ok(payloads
            .into_iter()
            .map(|p| p.into_record(user_id))
            .collect())
    }

    async fn find_by_product_id(
        &self,
        product_id: &str,
        user_id: &UserId,
    ) -> Result<Option<CartRecord>, RepositoryError> {
        let url = self
            .client
            .cart_items_url(user_id.as_str(), Some(product_id));
        let response = self.send(self.client.client.get(url)).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let payload: CartItemPayload = decode(response).await?;
                Ok(Some(payload.into_record(user_id)))
            }
            status => Err(status_error(status)),
        }
    }

    async fn insert(&self, record: &CartRecord) -> Result<(), RepositoryError> {
        let url = self.client.cart_items_url(record.user_id.as_str(), None);
        let body = CreateCartItemBody::from(&record.item);
        let response = self.send(self.client.client.post(url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }
        Ok(())
    }

    async fn update_quantity(
        &self,
        product_id: &str,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let url = self
            .client
            .cart_items_url(user_id.as_str(), Some(product_id));
        let response = self
            .send(
                self.client
                    .client
                    .put(url)
                    .json(&UpdateQuantityBody { quantity }),
            )
            .await?;
        accept_missing(response.status())
    }

    async fn delete(&self, product_id: &str, user_id: &UserId) -> Result<(), RepositoryError> {
        let url = self
            .client
            .cart_items_url(user_id.as_str(), Some(product_id));
        let response = self.send(self.client.client.delete(url)).await?;
        accept_missing(response.status())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let url = self.client.cart_items_url(user_id.as_str(), None);
        let response = self.send(self.client.client.delete(url)).await?;
        if !response.status().is_success() {
            return Err(status_error(response.status()));
        }

        let payload: ClearCartPayload = decode(response).await?;
        Ok(payload.count)
    }
}
