//! Storefront client core: session-scoped cart and wishlist stores, the remote services they talk
//! to, and the wishlist to cart transfer.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;

mod ids;
