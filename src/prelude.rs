//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DiscountError, PromotionDiscount},
    items::LineItem,
    pricing::{CartTotals, PricingError, compute_totals},
    promotions::Promotion,
    receipt::{CartReceipt, ReceiptError, ReceiptLine},
    shipping::ShippingPolicy,
};
