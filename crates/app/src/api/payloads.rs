//! Wire payloads.
//!
//! Prices arrive as decimal strings (or numbers) in major units and are converted to minor units
//! of the client currency on the way in.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use crate::{
    api::ApiError,
    domain::{
        carts::models::{AppliedPromotion, CartItemId, CartLineItem, CartSnapshot, NewCartItem},
        products::{Color, ColorId, Product, ProductId, Size, SizeId},
        wishlist::models::{WishlistEntry, WishlistEntryId},
    },
};

#[derive(Debug, Deserialize)]
pub(crate) struct ProductPayload {
    id: ProductId,
    name: String,
    price: Decimal,
    #[serde(default)]
    discount_percentage: Option<u8>,
    #[serde(default)]
    colors: Vec<ColorPayload>,
    #[serde(default)]
    sizes: Vec<SizePayload>,
    #[serde(default)]
    stock: Option<u32>,
    #[serde(default = "available")]
    is_in_stock: bool,
}

fn available() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ColorPayload {
    id: ColorId,
    name: String,
    #[serde(default)]
    hex_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SizePayload {
    id: SizeId,
    name: String,
    #[serde(default)]
    order: u32,
}

impl ProductPayload {
    pub(crate) fn into_product(self, currency: &Currency) -> Result<Product, ApiError> {
        Ok(Product {
            id: self.id,
            name: self.name,
            price: to_minor(self.price, currency)?,
            discount_percentage: self.discount_percentage,
            colors: self
                .colors
                .into_iter()
                .map(|color| Color {
                    id: color.id,
                    name: color.name,
                    hex_code: color.hex_code,
                })
                .collect(),
            sizes: self
                .sizes
                .into_iter()
                .map(|size| Size {
                    id: size.id,
                    name: size.name,
                    order: size.order,
                })
                .collect(),
            stock: self.stock,
            in_stock: self.is_in_stock,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartPayload {
    #[serde(default)]
    items: Vec<CartItemPayload>,
    #[serde(default)]
    promo_code: Option<PromoCodePayload>,
}

#[derive(Debug, Deserialize)]
struct CartItemPayload {
    id: CartItemId,
    product: ProductPayload,
    quantity: u32,
    #[serde(default)]
    color: Option<ColorId>,
    #[serde(default)]
    size: Option<SizeId>,
    #[serde(default)]
    added_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PromoCodePayload {
    code: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    discount_percentage: Option<Decimal>,
    #[serde(default)]
    discount_fixed: Option<Decimal>,
    #[serde(default)]
    max_discount_amount: Option<Decimal>,
    #[serde(default)]
    min_order_amount: Option<Decimal>,
}

impl CartPayload {
    pub(crate) fn into_snapshot(self, currency: &Currency) -> Result<CartSnapshot, ApiError> {
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_line_item(currency))
            .collect::<Result<Vec<_>, ApiError>>()?;

        let promotion = self
            .promo_code
            .map(|promo| promo.into_promotion(currency))
            .transpose()?;

        Ok(CartSnapshot { items, promotion })
    }

    /// The promotion attached to the cart, if any.
    pub(crate) fn into_promotion(
        self,
        currency: &Currency,
    ) -> Result<Option<AppliedPromotion>, ApiError> {
        self.promo_code
            .map(|promo| promo.into_promotion(currency))
            .transpose()
    }
}

impl CartItemPayload {
    fn into_line_item(self, currency: &Currency) -> Result<CartLineItem, ApiError> {
        Ok(CartLineItem {
            id: self.id,
            product: self.product.into_product(currency)?,
            quantity: self.quantity,
            color: self.color,
            size: self.size,
            added_at: self.added_at,
        })
    }
}

impl PromoCodePayload {
    fn into_promotion(self, currency: &Currency) -> Result<AppliedPromotion, ApiError> {
        let minor = |amount: Option<Decimal>| {
            amount
                .map(|amount| to_minor(amount, currency))
                .transpose()
        };

        Ok(AppliedPromotion {
            code: self.code,
            description: self.description.filter(|description| !description.is_empty()),
            discount_percentage: self.discount_percentage,
            discount_fixed: minor(self.discount_fixed)?,
            max_discount: minor(self.max_discount_amount)?,
            min_order_amount: minor(self.min_order_amount)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WishlistEntryPayload {
    id: WishlistEntryId,
    product: ProductPayload,
    #[serde(default)]
    added_at: Option<Timestamp>,
}

impl WishlistEntryPayload {
    fn into_entry(self, currency: &Currency) -> Result<WishlistEntry, ApiError> {
        Ok(WishlistEntry {
            id: self.id,
            product: self.product.into_product(currency)?,
            added_at: self.added_at,
        })
    }
}

/// Wishlist listings are either a plain array or a paginated page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WishlistPayload {
    List(Vec<WishlistEntryPayload>),
    Page { results: Vec<WishlistEntryPayload> },
}

impl WishlistPayload {
    pub(crate) fn into_entries(self, currency: &Currency) -> Result<Vec<WishlistEntry>, ApiError> {
        let entries = match self {
            Self::List(entries) | Self::Page { results: entries } => entries,
        };

        entries
            .into_iter()
            .map(|entry| entry.into_entry(currency))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TogglePayload {
    pub(crate) in_wishlist: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddItemRequest {
    product_id: ProductId,
    quantity: u32,
    color_id: Option<ColorId>,
    size_id: Option<SizeId>,
}

impl From<NewCartItem> for AddItemRequest {
    fn from(item: NewCartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            color_id: item.color,
            size_id: item.size,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateItemRequest {
    pub(crate) item_id: CartItemId,
    pub(crate) quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveItemRequest {
    pub(crate) item_id: CartItemId,
}

#[derive(Debug, Serialize)]
pub(crate) struct PromoCodeRequest {
    pub(crate) code: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProductRequest {
    pub(crate) product_id: ProductId,
}

/// Convert a major unit amount to minor units of `currency`.
fn to_minor(amount: Decimal, currency: &Currency) -> Result<u64, ApiError> {
    let scale = Decimal::from(10_u64.pow(currency.exponent));

    amount
        .checked_mul(scale)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_u64())
        .ok_or_else(|| {
            ApiError::UnexpectedResponse(format!(
                "{amount} is not a valid {} amount",
                currency.iso_alpha_code
            ))
        })
}
