//! Store errors.
//!
//! Every store operation returns one of these instead of failing hard, so callers can show the
//! message inline.

use thiserror::Error;

pub(crate) const NOT_AUTHENTICATED_MESSAGE: &str = "Please login to continue";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A mutation was attempted without a signed-in shopper. Nothing was sent.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The remote service rejected a promo code.
    #[error("invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Any other remote failure, with the best message the payload offered.
    #[error("remote operation failed: {0}")]
    RemoteOperationFailed(String),

    /// The mutation succeeded but re-reading authoritative state did not; the local view was
    /// emptied and may be incomplete.
    #[error("state reload failed after a successful change: {0}")]
    StaleRead(String),

    /// Quantities below one are rejected locally.
    #[error("invalid quantity {0}")]
    InvalidQuantity(u32),
}

impl StoreError {
    /// Display-ready text for the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotAuthenticated => NOT_AUTHENTICATED_MESSAGE.to_string(),
            Self::InvalidPromoCode(message)
            | Self::RemoteOperationFailed(message)
            | Self::StaleRead(message) => message.clone(),
            Self::InvalidQuantity(_) => "Quantity must be at least 1".to_string(),
        }
    }
}
