//! Storefront Domain Concerns

pub mod carts;
pub mod errors;
pub mod products;
pub mod transfer;
pub mod wishlist;

pub use errors::StoreError;
