//! HTTP carts service.

use async_trait::async_trait;
use reqwest::Method;
use tracing::Span;

use crate::{
    api::{
        ApiClient, ApiError,
        payloads::{
            AddItemRequest, CartPayload, PromoCodeRequest, RemoveItemRequest, UpdateItemRequest,
        },
    },
    domain::carts::{
        CartsService, CartsServiceError,
        models::{AppliedPromotion, CartItemId, CartSnapshot, NewCartItem},
    },
};

#[derive(Debug, Clone)]
pub struct HttpCartsService {
    client: ApiClient,
}

impl HttpCartsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    #[tracing::instrument(
        name = "carts.http.get_cart",
        skip(self),
        fields(line_count = tracing::field::Empty),
        err
    )]
    async fn get_cart(&self) -> Result<CartSnapshot, CartsServiceError> {
        let payload: CartPayload = self.client.get("/cart/").await?;
        let snapshot = payload.into_snapshot(self.client.currency())?;

        Span::current().record("line_count", snapshot.items.len());

        Ok(snapshot)
    }

    #[tracing::instrument(name = "carts.http.add_item", skip(self), err)]
    async fn add_item(&self, item: NewCartItem) -> Result<(), CartsServiceError> {
        self.client
            .execute(
                Method::POST,
                "/cart/add_item/",
                Some(&AddItemRequest::from(item)),
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.http.update_item", skip(self), err)]
    async fn update_item(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<(), CartsServiceError> {
        self.client
            .execute(
                Method::PATCH,
                "/cart/update_item/",
                Some(&UpdateItemRequest {
                    item_id: item,
                    quantity,
                }),
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.http.remove_item", skip(self), err)]
    async fn remove_item(&self, item: CartItemId) -> Result<(), CartsServiceError> {
        self.client
            .execute(
                Method::DELETE,
                "/cart/remove_item/",
                Some(&RemoveItemRequest {
                    item_id: item,
                }),
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.http.clear", skip(self), err)]
    async fn clear(&self) -> Result<(), CartsServiceError> {
        self.client
            .execute::<()>(Method::POST, "/cart/clear/", None)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.http.apply_promo", skip(self), err)]
    async fn apply_promo(&self, code: String) -> Result<AppliedPromotion, CartsServiceError> {
        let payload: CartPayload = self
            .client
            .post("/cart/apply_promo/", &PromoCodeRequest { code })
            .await
            .map_err(promo_error)?;

        payload
            .into_promotion(self.client.currency())?
            .ok_or_else(|| {
                CartsServiceError::Transport(ApiError::UnexpectedResponse(
                    "cart returned without the applied promo code".to_string(),
                ))
            })
    }

    #[tracing::instrument(name = "carts.http.remove_promo", skip(self), err)]
    async fn remove_promo(&self) -> Result<(), CartsServiceError> {
        self.client
            .execute::<()>(Method::POST, "/cart/remove_promo/", None)
            .await?;

        Ok(())
    }
}

/// Unknown (404) and unusable (400) codes are both promo code rejections.
fn promo_error(error: ApiError) -> CartsServiceError {
    match CartsServiceError::from(error) {
        CartsServiceError::NotFound(message) | CartsServiceError::Rejected(message) => {
            CartsServiceError::InvalidPromoCode(message)
        }
        error => error,
    }
}
