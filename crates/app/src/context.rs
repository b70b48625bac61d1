//! Storefront session
//!
//! One signed-in shopper's stores and bearer token. Built once, [`StorefrontSession::init`] on
//! session start and [`StorefrontSession::teardown`] on logout.

use std::sync::Arc;

use storefront::shipping::ShippingPolicy;
use thiserror::Error;
use tracing::info;

use crate::{
    api::{ApiClient, ApiError, HttpCartsService, HttpWishlistService},
    auth::{AuthSession, TokenSession},
    config::{ClientConfig, ConfigError},
    domain::{
        StoreError,
        carts::{CartStore, CartsService},
        transfer::TransferCoordinator,
        wishlist::{WishlistService, WishlistStore},
    },
};

/// Which stores a command reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stores {
    Cart,
    Wishlist,
    Both,
}

impl Stores {
    fn cart(self) -> bool {
        matches!(self, Self::Cart | Self::Both)
    }

    fn wishlist(self) -> bool {
        matches!(self, Self::Wishlist | Self::Both)
    }
}

/// Failure to build a session from configuration.
#[derive(Debug, Error)]
pub enum SessionInitError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("failed to build API client")]
    Api(#[from] ApiError),
}

/// The shopper's token together with their cart and wishlist stores.
#[derive(Debug)]
pub struct StorefrontSession {
    token: Arc<TokenSession>,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl StorefrontSession {
    /// Build a session against the configured storefront API.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the HTTP client cannot be built.
    pub fn connect(config: &ClientConfig) -> Result<Self, SessionInitError> {
        let token = Arc::new(TokenSession::new());

        if let Some(access_token) = config.access_token.as_deref() {
            token.sign_in(access_token);
        }

        let client = ApiClient::new(
            config.api_url.clone(),
            Arc::clone(&token),
            config.currency()?,
            config.request_timeout()?,
        )?;

        Ok(Self::from_services(
            token,
            Arc::new(HttpCartsService::new(client.clone())),
            Arc::new(HttpWishlistService::new(client)),
            config.shipping_policy()?,
        ))
    }

    #[must_use]
    pub fn from_services(
        token: Arc<TokenSession>,
        carts: Arc<dyn CartsService>,
        wishlist: Arc<dyn WishlistService>,
        shipping: ShippingPolicy<'static>,
    ) -> Self {
        let auth: Arc<dyn AuthSession> = token.clone();

        Self {
            cart: CartStore::new(carts, Arc::clone(&auth), shipping),
            wishlist: WishlistStore::new(wishlist, auth),
            token,
        }
    }

    /// Load both stores. Both loads are attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] without a token, or the load failure.
    pub async fn init(&mut self) -> Result<(), StoreError> {
        self.load(Stores::Both).await
    }

    /// Load only the requested stores, so a failing endpoint does not block the other store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] without a token, or the first load failure.
    #[tracing::instrument(name = "session.load", skip(self))]
    pub async fn load(&mut self, stores: Stores) -> Result<(), StoreError> {
        let cart = if stores.cart() {
            self.cart.load().await
        } else {
            Ok(())
        };

        let wishlist = if stores.wishlist() {
            self.wishlist.load().await
        } else {
            Ok(())
        };

        info!(
            cart_lines = self.cart.items().len(),
            wishlist_entries = self.wishlist.len(),
            "session initialised"
        );

        cart.and(wishlist)
    }

    /// Sign out and forget all cached state.
    pub fn teardown(&mut self) {
        self.token.sign_out();
        self.cart.reset();
        self.wishlist.reset();

        info!("session torn down");
    }

    /// Replace the bearer token.
    pub fn sign_in(&self, token: impl Into<String>) {
        self.token.sign_in(token);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_authenticated()
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// Borrow both stores for a wishlist to cart transfer.
    pub fn transfer(&mut self) -> TransferCoordinator<'_> {
        TransferCoordinator::new(&mut self.cart, &mut self.wishlist)
    }
}
