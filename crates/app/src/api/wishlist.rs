//! HTTP wishlist service.

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::{
        ApiClient,
        payloads::{ProductRequest, TogglePayload, WishlistPayload},
    },
    domain::{
        products::ProductId,
        wishlist::{
            WishlistService, WishlistServiceError,
            models::{WishlistEntry, WishlistEntryId},
        },
    },
};

#[derive(Debug, Clone)]
pub struct HttpWishlistService {
    client: ApiClient,
}

impl HttpWishlistService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WishlistService for HttpWishlistService {
    #[tracing::instrument(name = "wishlist.http.get_wishlist", skip(self), err)]
    async fn get_wishlist(&self) -> Result<Vec<WishlistEntry>, WishlistServiceError> {
        let payload: WishlistPayload = self.client.get("/wishlist/").await?;

        Ok(payload.into_entries(self.client.currency())?)
    }

    #[tracing::instrument(name = "wishlist.http.add", skip(self), err)]
    async fn add(&self, product: ProductId) -> Result<(), WishlistServiceError> {
        self.client
            .execute(
                Method::POST,
                "/wishlist/",
                Some(&ProductRequest {
                    product_id: product,
                }),
            )
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "wishlist.http.remove", skip(self), err)]
    async fn remove(&self, entry: WishlistEntryId) -> Result<(), WishlistServiceError> {
        self.client
            .execute::<()>(Method::DELETE, &format!("/wishlist/{entry}/"), None)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "wishlist.http.toggle", skip(self), err)]
    async fn toggle(&self, product: ProductId) -> Result<bool, WishlistServiceError> {
        let payload: TogglePayload = self
            .client
            .post(
                "/wishlist/toggle/",
                &ProductRequest {
                    product_id: product,
                },
            )
            .await?;

        Ok(payload.in_wishlist)
    }

    #[tracing::instrument(name = "wishlist.http.clear", skip(self), err)]
    async fn clear(&self) -> Result<(), WishlistServiceError> {
        self.client
            .execute::<()>(Method::DELETE, "/wishlist/clear/", None)
            .await?;

        Ok(())
    }
}
