//! Pricing
//!
//! Derives cart totals from line items, an optional applied promotion and the shipping policy.
//! Everything here is pure: the same inputs always produce the same totals.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::DiscountError,
    items::{LineItem, item_count},
    promotions::Promotion,
    shipping::ShippingPolicy,
};

/// Errors that can occur while calculating cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line item's currency differs from the totals currency (index, item currency, totals currency).
    #[error("line item {0} has currency {1}, but totals are priced in {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// The subtotal currency differs from the shipping policy currency.
    #[error("subtotal has currency {0}, but shipping is priced in {1}")]
    ShippingCurrency(&'static str, &'static str),

    /// A monetary amount did not fit into minor units.
    #[error("monetary amount overflowed")]
    Overflow,

    /// Errors bubbled up from evaluating the promotion.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Totals derived from a cart. Never persisted; recomputed from authoritative cart state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals<'a> {
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    shipping: Money<'a, Currency>,
    total: Money<'a, Currency>,
    item_count: u64,
}

impl<'a> CartTotals<'a> {
    /// Sum of base unit price times quantity over every line
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Promotion discount
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Shipping fee
    #[must_use]
    pub fn shipping(&self) -> Money<'a, Currency> {
        self.shipping
    }

    /// Amount due: subtotal minus discount plus shipping, floored at zero
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Total number of units in the cart
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Currency all amounts are expressed in
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.total.currency()
    }
}

/// Calculates the subtotal of a set of line items in the given currency.
///
/// The subtotal uses each line's base unit price; per-product listing discounts are not applied.
///
/// # Errors
///
/// - [`PricingError::CurrencyMismatch`]: a line is priced in a different currency.
/// - [`PricingError::Overflow`]: the sum does not fit into minor units.
pub fn subtotal<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = items
        .iter()
        .enumerate()
        .try_fold(0_i64, |acc, (idx, item)| {
            let item_currency = item.unit_price().currency();

            if item_currency != currency {
                return Err(PricingError::CurrencyMismatch(
                    idx,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            item.total_minor()
                .and_then(|line| acc.checked_add(line))
                .ok_or(PricingError::Overflow)
        })?;

    Ok(Money::from_minor(minor, currency))
}

/// Computes the full set of cart totals.
///
/// 1. subtotal is the sum of unit price times quantity
/// 2. discount comes from the promotion, if any, and is zero below its minimum order amount
/// 3. shipping is decided by the shipping policy
/// 4. total is `subtotal - discount + shipping`, never below zero
///
/// An empty cart produces all-zero totals.
///
/// # Errors
///
/// Returns a [`PricingError`] on currency mismatches, overflow, or a promotion that cannot be
/// evaluated.
pub fn compute_totals<'a>(
    items: &[LineItem<'a>],
    promotion: Option<&Promotion<'a>>,
    shipping: &ShippingPolicy<'a>,
) -> Result<CartTotals<'a>, PricingError> {
    let currency = shipping.currency();
    let subtotal = subtotal(items, currency)?;

    let discount = match promotion {
        Some(promotion) => promotion.discount_for(&subtotal)?,
        None => Money::from_minor(0, currency),
    };

    let shipping_fee = shipping.fee_for(&subtotal)?;

    let total_minor = subtotal
        .to_minor_units()
        .checked_sub(discount.to_minor_units())
        .and_then(|amount| amount.checked_add(shipping_fee.to_minor_units()))
        .ok_or(PricingError::Overflow)?
        .max(0);

    Ok(CartTotals {
        subtotal,
        discount,
        shipping: shipping_fee,
        total: Money::from_minor(total_minor, currency),
        item_count: item_count(items),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{UZS, USD};
    use testresult::TestResult;

    use crate::discounts::PromotionDiscount;

    use super::*;

    fn uzs(major: i64) -> Money<'static, Currency> {
        Money::from_major(major, UZS)
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let items = [
            LineItem::new(uzs(50_000), 2),
            LineItem::new(uzs(30_000), 1),
        ];

        assert_eq!(subtotal(&items, UZS)?, uzs(130_000));

        Ok(())
    }

    #[test]
    fn subtotal_of_no_items_is_zero() -> TestResult {
        assert_eq!(subtotal(&[], UZS)?, uzs(0));

        Ok(())
    }

    #[test]
    fn subtotal_currency_mismatch_errors() {
        let items = [
            LineItem::new(uzs(100), 1),
            LineItem::new(Money::from_minor(100, USD), 1),
        ];

        assert_eq!(
            subtotal(&items, UZS),
            Err(PricingError::CurrencyMismatch(
                1,
                USD.iso_alpha_code,
                UZS.iso_alpha_code
            ))
        );
    }

    #[test]
    fn subtotal_overflow_errors() {
        let items = [
            LineItem::new(Money::from_minor(i64::MAX, UZS), 1),
            LineItem::new(Money::from_minor(1, UZS), 1),
        ];

        assert_eq!(subtotal(&items, UZS), Err(PricingError::Overflow));
    }

    #[test]
    fn empty_cart_has_all_zero_totals() -> TestResult {
        let totals = compute_totals(&[], None, &ShippingPolicy::default())?;

        assert_eq!(totals.subtotal(), uzs(0));
        assert_eq!(totals.discount(), uzs(0));
        assert_eq!(totals.shipping(), uzs(0));
        assert_eq!(totals.total(), uzs(0));
        assert_eq!(totals.item_count(), 0);

        Ok(())
    }

    #[test]
    fn empty_cart_with_promotion_has_no_discount() -> TestResult {
        let promotion = Promotion::new(
            "WELCOME",
            PromotionDiscount::FixedAmount(uzs(10_000)),
        );

        let totals = compute_totals(&[], Some(&promotion), &ShippingPolicy::default())?;

        assert_eq!(totals.discount(), uzs(0));
        assert_eq!(totals.total(), uzs(0));

        Ok(())
    }

    #[test]
    fn total_is_never_negative() -> TestResult {
        let items = [LineItem::new(uzs(10_000), 1)];

        // 150% off is nonsense, but must still not produce a negative amount due.
        let promotion = Promotion::new(
            "BROKEN",
            PromotionDiscount::Percentage(Decimal::from(150)),
        );

        let shipping = ShippingPolicy::from_major(UZS, 200_000, 0);
        let totals = compute_totals(&items, Some(&promotion), &shipping)?;

        assert_eq!(totals.discount(), uzs(15_000));
        assert_eq!(totals.total(), uzs(0));

        Ok(())
    }

    #[test]
    fn totals_currency_comes_from_shipping_policy() -> TestResult {
        let shipping = ShippingPolicy::from_major(USD, 100, 5);
        let totals = compute_totals(&[], None, &shipping)?;

        assert_eq!(totals.currency(), USD);

        Ok(())
    }
}
