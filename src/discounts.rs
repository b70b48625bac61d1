//! Discounts

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// A promotion amount is priced in a different currency than the order (promotion, order).
    #[error("promotion amount has currency {0}, but the order is priced in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// The discount a promotion grants. Exactly one shape applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromotionDiscount<'a> {
    /// Percentage of the subtotal, in percent points (e.g., `10` for "10% off").
    Percentage(Decimal),

    /// Fixed amount off the subtotal (e.g., "20,000 UZS off"). Never more than the subtotal.
    FixedAmount(Money<'a, Currency>),

    /// Percentage of the subtotal, limited to `cap`.
    CappedPercentage {
        /// Percent points
        percentage: Decimal,

        /// Maximum discount amount
        cap: Money<'a, Currency>,
    },

    /// Neither a percentage nor an amount was configured; contributes nothing.
    Unspecified,
}

impl<'a> PromotionDiscount<'a> {
    /// Pick the discount shape from the raw promotion settings.
    ///
    /// Zero or negative values count as unset. A percentage wins over a fixed amount; a
    /// percentage with a cap becomes [`PromotionDiscount::CappedPercentage`].
    pub fn from_parts(
        percentage: Option<Decimal>,
        fixed: Option<Money<'a, Currency>>,
        cap: Option<Money<'a, Currency>>,
    ) -> Self {
        let percentage = percentage.filter(|pct| *pct > Decimal::ZERO);
        let fixed = fixed.filter(|amount| amount.to_minor_units() > 0);
        let cap = cap.filter(|amount| amount.to_minor_units() > 0);

        match (percentage, cap, fixed) {
            (Some(percentage), Some(cap), _) => Self::CappedPercentage { percentage, cap },
            (Some(percentage), None, _) => Self::Percentage(percentage),
            (None, _, Some(fixed)) => Self::FixedAmount(fixed),
            (None, _, None) => Self::Unspecified,
        }
    }

    /// Calculates the discount amount for an order subtotal.
    ///
    /// Minimum order thresholds are not considered here; see
    /// [`Promotion::discount_for`](crate::promotions::Promotion::discount_for).
    ///
    /// # Errors
    ///
    /// - [`DiscountError::CurrencyMismatch`]: a fixed amount or cap is in another currency.
    /// - [`DiscountError::PercentConversion`]: the percentage cannot be represented in minor units.
    pub fn amount_off(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let subtotal_minor = subtotal.to_minor_units();

        let discount_minor = match self {
            Self::Percentage(percentage) => percent_of_minor(*percentage, subtotal_minor)?,
            Self::CappedPercentage { percentage, cap } => {
                ensure_same_currency(cap, subtotal)?;

                percent_of_minor(*percentage, subtotal_minor)?.min(cap.to_minor_units())
            }
            Self::FixedAmount(amount) => {
                ensure_same_currency(amount, subtotal)?;

                amount.to_minor_units().min(subtotal_minor)
            }
            Self::Unspecified => 0,
        };

        Ok(Money::from_minor(discount_minor.max(0), subtotal.currency()))
    }
}

/// Return `CurrencyMismatch` unless both amounts share a currency.
pub(crate) fn ensure_same_currency(
    amount: &Money<'_, Currency>,
    order: &Money<'_, Currency>,
) -> Result<(), DiscountError> {
    if amount.currency() == order.currency() {
        Ok(())
    } else {
        Err(DiscountError::CurrencyMismatch(
            amount.currency().iso_alpha_code,
            order.currency().iso_alpha_code,
        ))
    }
}

/// Calculate `percent`% of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result does not fit into `i64`.
pub fn percent_of_minor(percent: Decimal, minor: i64) -> Result<i64, DiscountError> {
    let Some(applied) = percent.checked_mul(Decimal::from(minor)) else {
        return Err(DiscountError::PercentConversion);
    };

    let Some(applied) = applied.checked_div(Decimal::ONE_HUNDRED) else {
        return Err(DiscountError::PercentConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_i64() else {
        return Err(DiscountError::PercentConversion);
    };

    Ok(rounded)
}
