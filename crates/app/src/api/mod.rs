//! Remote storefront API.
//!
//! reqwest-backed implementations of the cart and wishlist services.

mod carts;
mod client;
mod payloads;
mod wishlist;

pub use carts::HttpCartsService;
pub use client::{ApiClient, ApiError};
pub use wishlist::HttpWishlistService;
