//! Promotions
//!
//! A promotion is an applied promo code: a discount shape plus an optional minimum order amount.
//! Below the minimum the promotion stays applied but is worth nothing.

use rusty_money::{Money, iso::Currency};

use crate::discounts::{DiscountError, PromotionDiscount, ensure_same_currency};

/// An applied promo code
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion<'a> {
    code: String,
    description: Option<String>,
    discount: PromotionDiscount<'a>,
    min_order_amount: Option<Money<'a, Currency>>,
}

impl<'a> Promotion<'a> {
    /// Create a promotion with no description and no minimum order amount.
    pub fn new(code: impl Into<String>, discount: PromotionDiscount<'a>) -> Self {
        Self {
            code: code.into(),
            description: None,
            discount,
            min_order_amount: None,
        }
    }

    /// Set a human-readable description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Require the subtotal to reach `amount` before the discount applies
    #[must_use]
    pub fn with_min_order_amount(mut self, amount: Money<'a, Currency>) -> Self {
        self.min_order_amount = Some(amount);
        self
    }

    /// The promo code as entered
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The discount shape
    pub fn discount(&self) -> &PromotionDiscount<'a> {
        &self.discount
    }

    /// Minimum order amount, if any
    pub fn min_order_amount(&self) -> Option<&Money<'a, Currency>> {
        self.min_order_amount.as_ref()
    }

    /// Whether the subtotal meets the minimum order amount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::CurrencyMismatch`] if the minimum is in another currency.
    pub fn is_eligible(&self, subtotal: &Money<'a, Currency>) -> Result<bool, DiscountError> {
        let Some(minimum) = &self.min_order_amount else {
            return Ok(true);
        };

        ensure_same_currency(minimum, subtotal)?;

        Ok(subtotal.to_minor_units() >= minimum.to_minor_units())
    }

    /// The discount this promotion grants on `subtotal`; zero when below the minimum order amount.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be evaluated.
    pub fn discount_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        if !self.is_eligible(subtotal)? {
            return Ok(Money::from_minor(0, subtotal.currency()));
        }

        self.discount.amount_off(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{UZS, USD};
    use testresult::TestResult;

    use super::*;

    fn uzs(major: i64) -> Money<'static, Currency> {
        Money::from_major(major, UZS)
    }

    #[test]
    fn accessors_return_builder_values() {
        let promotion = Promotion::new("SPRING", PromotionDiscount::Unspecified)
            .with_description("Spring sale")
            .with_min_order_amount(uzs(100_000));

        assert_eq!(promotion.code(), "SPRING");
        assert_eq!(promotion.description(), Some("Spring sale"));
        assert_eq!(promotion.discount(), &PromotionDiscount::Unspecified);
        assert_eq!(promotion.min_order_amount(), Some(&uzs(100_000)));
    }

    #[test]
    fn below_minimum_order_discount_is_zero() -> TestResult {
        let promotion = Promotion::new("BIG", PromotionDiscount::Percentage(Decimal::from(20)))
            .with_min_order_amount(uzs(100_000));

        assert!(!promotion.is_eligible(&uzs(50_000))?);
        assert_eq!(promotion.discount_for(&uzs(50_000))?, uzs(0));

        Ok(())
    }

    #[test]
    fn at_minimum_order_discount_applies() -> TestResult {
        let promotion = Promotion::new("BIG", PromotionDiscount::Percentage(Decimal::from(20)))
            .with_min_order_amount(uzs(100_000));

        assert!(promotion.is_eligible(&uzs(100_000))?);
        assert_eq!(promotion.discount_for(&uzs(100_000))?, uzs(20_000));

        Ok(())
    }

    #[test]
    fn minimum_in_other_currency_errors() {
        let promotion = Promotion::new("BIG", PromotionDiscount::Unspecified)
            .with_min_order_amount(Money::from_major(10, USD));

        assert!(matches!(
            promotion.is_eligible(&uzs(100_000)),
            Err(DiscountError::CurrencyMismatch(_, _))
        ));
    }
}
