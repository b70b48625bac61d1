//! Wishlist service.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    products::ProductId,
    wishlist::{
        errors::WishlistServiceError,
        models::{WishlistEntry, WishlistEntryId},
    },
};

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Retrieve the signed-in shopper's saved products.
    async fn get_wishlist(&self) -> Result<Vec<WishlistEntry>, WishlistServiceError>;

    /// Save a product. The backend rejects duplicates.
    async fn add(&self, product: ProductId) -> Result<(), WishlistServiceError>;

    /// Remove an entry by its own id.
    async fn remove(&self, entry: WishlistEntryId) -> Result<(), WishlistServiceError>;

    /// Flip membership, returning whether the product is now saved.
    async fn toggle(&self, product: ProductId) -> Result<bool, WishlistServiceError>;

    async fn clear(&self) -> Result<(), WishlistServiceError>;
}
