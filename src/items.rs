//! Items

use rusty_money::{Money, iso::Currency};

/// A priced cart line: the product's unit price and how many units are in the cart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item with the given unit price and quantity
    pub fn new(unit_price: Money<'a, Currency>, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Returns the unit price of the line
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the number of units on the line
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity, in minor units.
    ///
    /// Returns `None` when the multiplication overflows.
    pub fn total_minor(&self) -> Option<i64> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
    }
}

/// Returns the total number of units across all lines
pub fn item_count(items: &[LineItem<'_>]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity())).sum()
}
