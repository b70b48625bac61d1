//! Carts service.
//!
//! The remote cart collaborator. Implementations talk to the order API; stores only see this
//! contract.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::carts::{
    errors::CartsServiceError,
    models::{AppliedPromotion, CartItemId, CartSnapshot, NewCartItem},
};

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the signed-in shopper's cart with any applied promotion.
    async fn get_cart(&self) -> Result<CartSnapshot, CartsServiceError>;

    /// Add a product, merging with an existing line for the same variant.
    async fn add_item(&self, item: NewCartItem) -> Result<(), CartsServiceError>;

    /// Set the quantity of an existing line.
    async fn update_item(&self, item: CartItemId, quantity: u32)
    -> Result<(), CartsServiceError>;

    /// Remove a line.
    async fn remove_item(&self, item: CartItemId) -> Result<(), CartsServiceError>;

    /// Remove every line and the applied promotion.
    async fn clear(&self) -> Result<(), CartsServiceError>;

    /// Apply a promo code, returning the promotion now attached to the cart.
    async fn apply_promo(&self, code: String) -> Result<AppliedPromotion, CartsServiceError>;

    /// Detach the applied promo code.
    async fn remove_promo(&self) -> Result<(), CartsServiceError>;
}
