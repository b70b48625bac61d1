//! Shipping

use rusty_money::{Money, iso::Currency};

use crate::pricing::PricingError;

/// Subtotal above which shipping is free, in major UZS units.
pub const FREE_SHIPPING_THRESHOLD_UZS: i64 = 200_000;

/// Flat shipping fee charged below the free shipping threshold, in major UZS units.
pub const FLAT_SHIPPING_FEE_UZS: i64 = 15_000;

/// Flat-fee shipping with a free shipping threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingPolicy<'a> {
    free_threshold: Money<'a, Currency>,
    flat_fee: Money<'a, Currency>,
}

impl<'a> ShippingPolicy<'a> {
    /// Create a policy from major unit amounts in `currency`.
    pub fn from_major(currency: &'a Currency, free_threshold: i64, flat_fee: i64) -> Self {
        Self {
            free_threshold: Money::from_major(free_threshold, currency),
            flat_fee: Money::from_major(flat_fee, currency),
        }
    }

    /// Create a policy from minor unit amounts in `currency`.
    pub fn from_minor(currency: &'a Currency, free_threshold: i64, flat_fee: i64) -> Self {
        Self {
            free_threshold: Money::from_minor(free_threshold, currency),
            flat_fee: Money::from_minor(flat_fee, currency),
        }
    }

    /// Currency the policy is priced in
    pub fn currency(&self) -> &'a Currency {
        self.flat_fee.currency()
    }

    /// Subtotal that must be exceeded for free shipping
    pub fn free_threshold(&self) -> Money<'a, Currency> {
        self.free_threshold
    }

    /// Fee charged at or below the threshold
    pub fn flat_fee(&self) -> Money<'a, Currency> {
        self.flat_fee
    }

    /// Shipping fee for an order subtotal.
    ///
    /// Empty orders ship for nothing; orders strictly above the threshold ship free.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ShippingCurrency`] if `subtotal` is in another currency.
    pub fn fee_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PricingError> {
        let currency = self.currency();

        if subtotal.currency() != currency {
            return Err(PricingError::ShippingCurrency(
                subtotal.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        let subtotal_minor = subtotal.to_minor_units();

        if subtotal_minor == 0 || subtotal_minor > self.free_threshold.to_minor_units() {
            return Ok(Money::from_minor(0, currency));
        }

        Ok(self.flat_fee)
    }
}

impl Default for ShippingPolicy<'static> {
    fn default() -> Self {
        Self::from_major(
            rusty_money::iso::UZS,
            FREE_SHIPPING_THRESHOLD_UZS,
            FLAT_SHIPPING_FEE_UZS,
        )
    }
}
