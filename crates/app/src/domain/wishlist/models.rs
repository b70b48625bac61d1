//! Wishlist Models

use jiff::Timestamp;

use crate::{domain::products::Product, ids::TypedId};

/// Wishlist Entry Id
pub type WishlistEntryId = TypedId<WishlistEntry>;

/// A saved product. Entries are addressed remotely by their own id, not the product's.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistEntry {
    pub id: WishlistEntryId,
    pub product: Product,
    pub added_at: Option<Timestamp>,
}
