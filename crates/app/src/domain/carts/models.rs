//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use storefront::{discounts::PromotionDiscount, pricing::PricingError, promotions::Promotion};

use crate::{
    domain::products::{ColorId, Product, ProductId, SizeId},
    ids::TypedId,
};

/// Cart Item Id
pub type CartItemId = TypedId<CartLineItem>;

/// One cart entry: a product, a quantity, and the chosen variant
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
    pub color: Option<ColorId>,
    pub size: Option<SizeId>,
    pub added_at: Option<Timestamp>,
}

impl CartLineItem {
    /// Human-readable variant, e.g. `"Navy / XL"`, from the product's variant names.
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        let color = self.color.and_then(|id| {
            self.product
                .colors
                .iter()
                .find(|color| color.id == id)
                .map(|color| color.name.as_str())
        });

        let size = self.size.and_then(|id| {
            self.product
                .sizes
                .iter()
                .find(|size| size.id == id)
                .map(|size| size.name.as_str())
        });

        match (color, size) {
            (Some(color), Some(size)) => Some(format!("{color} / {size}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

/// Authoritative cart state as returned by the remote cart service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub promotion: Option<AppliedPromotion>,
}

/// Request to add a product to the cart
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub color: Option<ColorId>,
    pub size: Option<SizeId>,
}

/// A promo code applied to the cart, amounts in minor units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedPromotion {
    pub code: String,
    pub description: Option<String>,
    /// Percent points, e.g. `10` for 10%.
    pub discount_percentage: Option<Decimal>,
    pub discount_fixed: Option<u64>,
    pub max_discount: Option<u64>,
    pub min_order_amount: Option<u64>,
}

impl AppliedPromotion {
    /// Price this promotion in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if an amount does not fit into minor units.
    pub fn to_promotion<'a>(&self, currency: &'a Currency) -> Result<Promotion<'a>, PricingError> {
        let discount = PromotionDiscount::from_parts(
            self.discount_percentage,
            self.discount_fixed.map(|amount| money(amount, currency)).transpose()?,
            self.max_discount.map(|amount| money(amount, currency)).transpose()?,
        );

        let mut promotion = Promotion::new(self.code.clone(), discount);

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            promotion = promotion.with_description(description);
        }

        if let Some(minimum) = self.min_order_amount.filter(|amount| *amount > 0) {
            promotion = promotion.with_min_order_amount(money(minimum, currency)?);
        }

        Ok(promotion)
    }
}

/// Wrap a minor unit amount as money.
pub(crate) fn money(amount: u64, currency: &Currency) -> Result<Money<'_, Currency>, PricingError> {
    let amount = i64::try_from(amount).map_err(|_err| PricingError::Overflow)?;

    Ok(Money::from_minor(amount, currency))
}
