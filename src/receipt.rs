//! Receipt
//!
//! Renders a cart as a line-item table followed by a totals summary.

use std::io;

use rusty_money::Money;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{items::LineItem, pricing::CartTotals};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line total did not fit into minor units.
    #[error("line total overflowed for {0}")]
    Overflow(String),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One printable cart line
#[derive(Debug, Clone)]
pub struct ReceiptLine<'a> {
    name: String,
    variant: Option<String>,
    item: LineItem<'a>,
}

impl<'a> ReceiptLine<'a> {
    /// Create a line for the named product.
    pub fn new(name: impl Into<String>, item: LineItem<'a>) -> Self {
        Self {
            name: name.into(),
            variant: None,
            item,
        }
    }

    /// Describe the selected variant, e.g. `"Navy / XL"`.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// A cart ready to print
#[derive(Debug, Clone)]
pub struct CartReceipt<'a> {
    lines: Vec<ReceiptLine<'a>>,
    totals: CartTotals<'a>,
    promotion_code: Option<String>,
}

impl<'a> CartReceipt<'a> {
    /// Create a receipt for the given lines and their totals.
    #[must_use]
    pub fn new(lines: Vec<ReceiptLine<'a>>, totals: CartTotals<'a>) -> Self {
        Self {
            lines,
            totals,
            promotion_code: None,
        }
    }

    /// Show the applied promo code next to the discount line.
    #[must_use]
    pub fn with_promotion_code(mut self, code: impl Into<String>) -> Self {
        self.promotion_code = Some(code.into());
        self
    }

    /// Totals shown in the summary
    #[must_use]
    pub fn totals(&self) -> &CartTotals<'a> {
        &self.totals
    }

    /// Writes the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total overflows or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Variant", "Qty", "Unit Price", "Line Total"]);

        for line in &self.lines {
            let line_total = line
                .item
                .total_minor()
                .ok_or_else(|| ReceiptError::Overflow(line.name.clone()))?;

            let currency = line.item.unit_price().currency();

            builder.push_record([
                line.name.clone(),
                line.variant.clone().unwrap_or_else(|| "-".to_string()),
                line.item.quantity().to_string(),
                line.item.unit_price().to_string(),
                Money::from_minor(line_total, currency).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let totals = &self.totals;

        let discount_label = match &self.promotion_code {
            Some(code) => format!("Discount ({code}):"),
            None => "Discount:".to_string(),
        };

        let ships_free =
            totals.shipping().to_minor_units() == 0 && totals.subtotal().to_minor_units() > 0;

        let shipping = if ships_free {
            "Free".to_string()
        } else {
            totals.shipping().to_string()
        };

        let rows = [
            ("Items:".to_string(), totals.item_count().to_string()),
            ("Subtotal:".to_string(), totals.subtotal().to_string()),
            (discount_label, format!("-{}", totals.discount())),
            ("Shipping:".to_string(), shipping),
            ("Total:".to_string(), totals.total().to_string()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}
