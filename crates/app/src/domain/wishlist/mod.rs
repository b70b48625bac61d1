//! Wishlist

pub mod errors;
pub mod models;
pub mod service;
mod store;

pub use errors::WishlistServiceError;
pub use service::*;
pub use store::WishlistStore;
