//! Product Models
//!
//! Read-only catalog data. Stores reference products but never mutate them.

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Color Id
pub type ColorId = TypedId<Color>;

/// Size Id
pub type SizeId = TypedId<Size>;

/// Stock at or below this count is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Base unit price in minor units.
    pub price: u64,
    pub discount_percentage: Option<u8>,
    pub colors: Vec<Color>,
    pub sizes: Vec<Size>,
    /// Units on hand, when the listing carries it.
    pub stock: Option<u32>,
    /// Availability flag reported by listings without a stock count.
    pub in_stock: bool,
}

/// Color variant
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    pub hex_code: Option<String>,
}

/// Size variant
#[derive(Debug, Clone, PartialEq)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
    /// Display position, smallest first.
    pub order: u32,
}

impl Product {
    /// Listing price after the product's own discount percentage, in minor units.
    ///
    /// Cart subtotals deliberately use [`Product::price`] instead.
    #[must_use]
    pub fn discounted_price(&self) -> u64 {
        match self.discount_percentage {
            Some(pct) if pct > 0 => {
                let pct = u64::from(pct.min(100));

                self.price - (self.price / 100 * pct + self.price % 100 * pct / 100)
            }
            _ => self.price,
        }
    }

    /// The variant a product is added to the cart with when none was chosen.
    #[must_use]
    pub fn default_color(&self) -> Option<ColorId> {
        self.colors.first().map(|color| color.id)
    }

    /// See [`Product::default_color`].
    #[must_use]
    pub fn default_size(&self) -> Option<SizeId> {
        self.sizes.first().map(|size| size.id)
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock.map_or(self.in_stock, |stock| stock > 0)
    }

    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock
            .is_some_and(|stock| stock > 0 && stock <= LOW_STOCK_THRESHOLD)
    }
}
