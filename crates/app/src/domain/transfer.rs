//! Wishlist to cart transfer.
//!
//! A product only leaves the wishlist once the cart service has confirmed it. Batch moves run strictly one
//! product at a time so each add, reload, and removal settles before the next product starts.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    carts::CartStore,
    errors::StoreError,
    products::{Product, ProductId},
    wishlist::WishlistStore,
};

/// Why a product did not cleanly move from the wishlist to the cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    /// The cart refused the product; the wishlist entry was kept.
    #[error("could not add product to cart")]
    CartAdd(#[source] StoreError),

    /// The product moved, but the cart could not be re-read afterwards and is shown empty.
    #[error("product moved to cart but the cart could not be reloaded")]
    CartReload(#[source] StoreError),

    /// The product is in the cart but is still in the wishlist.
    #[error("product added to cart but could not be removed from wishlist")]
    WishlistRemove(#[source] StoreError),
}

impl TransferError {
    /// The underlying store failure.
    #[must_use]
    pub fn store_error(&self) -> &StoreError {
        match self {
            Self::CartAdd(error) | Self::CartReload(error) | Self::WishlistRemove(error) => error,
        }
    }

    /// Whether the cart service accepted the product despite the failure.
    #[must_use]
    pub fn reached_cart(&self) -> bool {
        !matches!(self, Self::CartAdd(_))
    }
}

/// What happened to one product in a batch move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// In the cart and out of the wishlist.
    Moved(ProductId),

    /// See [`TransferError::reached_cart`] for whether the cart has it.
    Failed {
        product: ProductId,
        error: TransferError,
    },
}

/// Per-product outcomes of a batch move, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    outcomes: SmallVec<[TransferOutcome; 8]>,
}

impl TransferReport {
    /// Every outcome, in input order.
    #[must_use]
    pub fn outcomes(&self) -> &[TransferOutcome] {
        &self.outcomes
    }

    /// Products that moved cleanly.
    pub fn moved(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TransferOutcome::Moved(product) => Some(*product),
            TransferOutcome::Failed { .. } => None,
        })
    }

    /// Products with a failure, alongside it.
    pub fn failed(&self) -> impl Iterator<Item = (ProductId, &TransferError)> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TransferOutcome::Failed { product, error } => Some((*product, error)),
            TransferOutcome::Moved(_) => None,
        })
    }

    /// True when nothing failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Moves products from the wishlist into the cart.
#[derive(Debug)]
pub struct TransferCoordinator<'s> {
    cart: &'s mut CartStore,
    wishlist: &'s mut WishlistStore,
}

impl<'s> TransferCoordinator<'s> {
    /// Borrow both stores for the length of the transfer.
    pub fn new(cart: &'s mut CartStore, wishlist: &'s mut WishlistStore) -> Self {
        Self { cart, wishlist }
    }

    /// Add one unit of `product` in its default variant, then drop it from the wishlist.
    ///
    /// # Errors
    ///
    /// [`TransferError::CartAdd`] leaves the wishlist untouched. [`TransferError::CartReload`]
    /// means the add was confirmed and the wishlist entry removed, but the cart view is empty until
    /// the next load. [`TransferError::WishlistRemove`] means the product is now in both.
    #[tracing::instrument(name = "transfer.move_to_cart", skip_all, fields(product = %product.id), err)]
    pub async fn move_to_cart(&mut self, product: &Product) -> Result<(), TransferError> {
        let added = self
            .cart
            .add_item(
                product.id,
                1,
                product.default_color(),
                product.default_size(),
            )
            .await;

        // A stale read still means the cart service took the product.
        let stale_cart = match added {
            Ok(()) => None,
            Err(error @ StoreError::StaleRead(_)) => {
                warn!(%error, "cart not reloaded after add");
                Some(error)
            }
            Err(error) => return Err(TransferError::CartAdd(error)),
        };

        self.wishlist
            .remove(product.id)
            .await
            .map_err(TransferError::WishlistRemove)?;

        if let Some(error) = stale_cart {
            return Err(TransferError::CartReload(error));
        }

        info!("moved product to cart");

        Ok(())
    }

    /// Move every product in order. A failure is recorded and the batch continues.
    #[tracing::instrument(name = "transfer.move_all_to_cart", skip_all, fields(products = products.len()))]
    pub async fn move_all_to_cart(&mut self, products: &[Product]) -> TransferReport {
        let mut report = TransferReport::default();

        for product in products {
            let outcome = match self.move_to_cart(product).await {
                Ok(()) => TransferOutcome::Moved(product.id),
                Err(error) => {
                    warn!(product = %product.id, %error, "transfer failed");

                    TransferOutcome::Failed {
                        product: product.id,
                        error,
                    }
                }
            };

            report.outcomes.push(outcome);
        }

        report
    }
}
