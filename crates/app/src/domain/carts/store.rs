//! Cart store.
//!
//! Owns the session's cart. Local state is never updated optimistically: every mutation goes to
//! the remote cart service and is followed by a full reload before it counts as done, so totals
//! are always derived from server-confirmed data.

use std::{fmt, sync::Arc};

use storefront::{
    items::LineItem,
    pricing::{CartTotals, PricingError, compute_totals},
    receipt::{CartReceipt, ReceiptLine},
    shipping::ShippingPolicy,
};
use tracing::{debug, info, warn};

use crate::{
    auth::AuthSession,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{AppliedPromotion, CartItemId, CartLineItem, NewCartItem, money},
            service::CartsService,
        },
        errors::StoreError,
        products::{ColorId, ProductId, SizeId},
    },
};

const LOAD_FAILED: &str = "Failed to load cart";
const ADD_FAILED: &str = "Failed to add item to cart";
const UPDATE_FAILED: &str = "Failed to update cart item";
const REMOVE_FAILED: &str = "Failed to remove cart item";
const CLEAR_FAILED: &str = "Failed to clear cart";
const PROMO_REQUIRED: &str = "Promo code is required";
const PROMO_INVALID: &str = "Invalid promo code";
const PROMO_REMOVE_FAILED: &str = "Failed to remove promo code";
const RELOAD_FAILED: &str = "Cart was updated but could not be reloaded; it may be incomplete";

/// Cached view of the shopper's cart, reloaded from the service after every change.
pub struct CartStore {
    service: Arc<dyn CartsService>,
    auth: Arc<dyn AuthSession>,
    shipping: ShippingPolicy<'static>,
    items: Vec<CartLineItem>,
    promotion: Option<AppliedPromotion>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("shipping", &self.shipping)
            .field("items", &self.items)
            .field("promotion", &self.promotion)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// An empty store priced with `shipping`; call [`CartStore::load`] to fill it.
    #[must_use]
    pub fn new(
        service: Arc<dyn CartsService>,
        auth: Arc<dyn AuthSession>,
        shipping: ShippingPolicy<'static>,
    ) -> Self {
        Self {
            service,
            auth,
            shipping,
            items: Vec::new(),
            promotion: None,
        }
    }

    /// Fetch the authoritative cart.
    ///
    /// On failure the local cart is emptied rather than left stale.
    #[tracing::instrument(name = "carts.store.load", skip(self), err)]
    pub async fn load(&mut self) -> Result<(), StoreError> {
        if !self.auth.is_authenticated() {
            self.reset();
            return Err(StoreError::NotAuthenticated);
        }

        match self.service.get_cart().await {
            Ok(snapshot) => {
                self.items = snapshot.items;
                self.promotion = snapshot.promotion;

                debug!(lines = self.items.len(), "cart loaded");

                Ok(())
            }
            Err(error) => {
                warn!(%error, "failed to load cart");
                self.reset();

                Err(remote_failure(&error, LOAD_FAILED))
            }
        }
    }

    /// Add `quantity` units of a product, optionally in a specific variant.
    ///
    /// A [`StoreError::StaleRead`] here means the service accepted the item.
    #[tracing::instrument(name = "carts.store.add_item", skip(self), err)]
    pub async fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        color: Option<ColorId>,
        size: Option<SizeId>,
    ) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        if quantity < 1 {
            return Err(StoreError::InvalidQuantity(quantity));
        }

        self.service
            .add_item(NewCartItem {
                product_id,
                quantity,
                color,
                size,
            })
            .await
            .map_err(|error| remote_failure(&error, ADD_FAILED))?;

        self.reload_after_mutation().await?;

        info!(%product_id, quantity, "added item to cart");

        Ok(())
    }

    /// Set a line's quantity. Quantities below one are rejected without contacting the service.
    #[tracing::instrument(name = "carts.store.update_quantity", skip(self), err)]
    pub async fn update_quantity(
        &mut self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        if quantity < 1 {
            return Err(StoreError::InvalidQuantity(quantity));
        }

        self.ensure_authenticated()?;

        self.service
            .update_item(item, quantity)
            .await
            .map_err(|error| remote_failure(&error, UPDATE_FAILED))?;

        self.reload_after_mutation().await
    }

    /// Remove a line. Removing a line the service no longer knows is treated as done.
    #[tracing::instrument(name = "carts.store.remove_item", skip(self), err)]
    pub async fn remove_item(&mut self, item: CartItemId) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        match self.service.remove_item(item).await {
            Ok(()) => {}
            Err(CartsServiceError::NotFound(_)) => {
                debug!(%item, "cart item already absent");
            }
            Err(error) => return Err(remote_failure(&error, REMOVE_FAILED)),
        }

        self.reload_after_mutation().await
    }

    /// Empty the cart and drop the applied promotion.
    #[tracing::instrument(name = "carts.store.clear", skip(self), err)]
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        self.service
            .clear()
            .await
            .map_err(|error| remote_failure(&error, CLEAR_FAILED))?;

        self.reset();

        info!("cart cleared");

        Ok(())
    }

    /// Apply a promo code. A rejected code leaves the cart untouched.
    #[tracing::instrument(name = "carts.store.apply_promo_code", skip(self), err)]
    pub async fn apply_promo_code(&mut self, code: &str) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        let code = code.trim();

        if code.is_empty() {
            return Err(StoreError::InvalidPromoCode(PROMO_REQUIRED.to_string()));
        }

        let promotion = self
            .service
            .apply_promo(code.to_string())
            .await
            .map_err(|error| promo_failure(&error))?;

        self.reload_after_mutation().await?;

        info!(code = %promotion.code, "promo code applied");

        self.promotion = Some(promotion);

        Ok(())
    }

    /// Drop the applied promotion.
    #[tracing::instrument(name = "carts.store.remove_promo_code", skip(self), err)]
    pub async fn remove_promo_code(&mut self) -> Result<(), StoreError> {
        self.ensure_authenticated()?;

        self.service
            .remove_promo()
            .await
            .map_err(|error| remote_failure(&error, PROMO_REMOVE_FAILED))?;

        self.reload_after_mutation().await?;

        self.promotion = None;

        Ok(())
    }

    /// Cached lines from the last successful load
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Promotion the service reports as applied.
    #[must_use]
    pub fn promotion(&self) -> Option<&AppliedPromotion> {
        self.promotion.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shipping rules used for totals.
    #[must_use]
    pub fn shipping(&self) -> &ShippingPolicy<'static> {
        &self.shipping
    }

    /// Derive totals from the cached, server-confirmed cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if an amount overflows or the promotion cannot be evaluated.
    pub fn totals(&self) -> Result<CartTotals<'static>, PricingError> {
        let items = self.priced_items()?;

        let promotion = self
            .promotion
            .as_ref()
            .map(|promotion| promotion.to_promotion(self.shipping.currency()))
            .transpose()?;

        compute_totals(&items, promotion.as_ref(), &self.shipping)
    }

    /// Printable receipt for the cached cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if totals cannot be derived.
    pub fn receipt(&self) -> Result<CartReceipt<'static>, PricingError> {
        let totals = self.totals()?;

        let lines = self
            .items
            .iter()
            .zip(self.priced_items()?)
            .map(|(item, priced)| {
                let line = ReceiptLine::new(item.product.name.clone(), priced);

                match item.variant_label() {
                    Some(variant) => line.with_variant(variant),
                    None => line,
                }
            })
            .collect();

        let receipt = CartReceipt::new(lines, totals);

        Ok(match &self.promotion {
            Some(promotion) => receipt.with_promotion_code(promotion.code.clone()),
            None => receipt,
        })
    }

    /// Forget all cached state, e.g. on sign-out.
    pub fn reset(&mut self) {
        self.items.clear();
        self.promotion = None;
    }

    fn priced_items(&self) -> Result<Vec<LineItem<'static>>, PricingError> {
        let currency = self.shipping.currency();

        self.items
            .iter()
            .map(|item| {
                money(item.product.price, currency).map(|price| LineItem::new(price, item.quantity))
            })
            .collect()
    }

    fn ensure_authenticated(&self) -> Result<(), StoreError> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(StoreError::NotAuthenticated)
        }
    }

    /// Re-read the cart after a confirmed mutation. A failed read empties the local cart.
    async fn reload_after_mutation(&mut self) -> Result<(), StoreError> {
        match self.service.get_cart().await {
            Ok(snapshot) => {
                self.items = snapshot.items;
                self.promotion = snapshot.promotion;

                Ok(())
            }
            Err(error) => {
                warn!(%error, "cart reload failed after mutation");
                self.reset();

                Err(StoreError::StaleRead(
                    error.message().unwrap_or(RELOAD_FAILED).to_string(),
                ))
            }
        }
    }
}

fn remote_failure(error: &CartsServiceError, fallback: &str) -> StoreError {
    match error {
        CartsServiceError::Unauthorized => StoreError::NotAuthenticated,
        error => StoreError::RemoteOperationFailed(error.message().unwrap_or(fallback).to_string()),
    }
}

fn promo_failure(error: &CartsServiceError) -> StoreError {
    match error {
        CartsServiceError::InvalidPromoCode(message)
        | CartsServiceError::NotFound(message)
        | CartsServiceError::Rejected(message) => {
            StoreError::InvalidPromoCode(message.as_deref().unwrap_or(PROMO_INVALID).to_string())
        }
        error => remote_failure(error, PROMO_INVALID),
    }
}
