//! Storefront
//!
//! Storefront is the cart pricing and promotion engine behind the merchandise shop client:
//! line items, promo code discounts, shipping and derived cart totals.

pub mod discounts;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod receipt;
pub mod shipping;
