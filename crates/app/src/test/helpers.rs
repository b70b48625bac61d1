//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    auth::MockAuthSession,
    domain::{
        carts::models::{AppliedPromotion, CartItemId, CartLineItem, CartSnapshot},
        products::{Color, ColorId, Product, ProductId, Size, SizeId},
        wishlist::models::{WishlistEntry, WishlistEntryId},
    },
};

/// 250,000.00 UZS hoodie in Navy/White and M/L.
pub(crate) fn hoodie() -> Product {
    Product {
        id: ProductId::new(1),
        name: "University Hoodie".to_string(),
        price: 250_000_00,
        discount_percentage: Some(15),
        colors: vec![
            Color {
                id: ColorId::new(7),
                name: "Navy".to_string(),
                hex_code: Some("#1B2A4A".to_string()),
            },
            Color {
                id: ColorId::new(8),
                name: "White".to_string(),
                hex_code: Some("#FFFFFF".to_string()),
            },
        ],
        sizes: vec![
            Size {
                id: SizeId::new(21),
                name: "M".to_string(),
                order: 2,
            },
            Size {
                id: SizeId::new(22),
                name: "L".to_string(),
                order: 3,
            },
        ],
        stock: Some(25),
        in_stock: true,
    }
}

/// 50,000.00 UZS cap without variants.
pub(crate) fn cap() -> Product {
    Product {
        id: ProductId::new(2),
        name: "Campus Cap".to_string(),
        price: 50_000_00,
        discount_percentage: None,
        colors: Vec::new(),
        sizes: Vec::new(),
        stock: None,
        in_stock: true,
    }
}

/// A cart line using the product's default variant.
pub(crate) fn line_item(id: u64, product: Product, quantity: u32) -> CartLineItem {
    CartLineItem {
        id: CartItemId::new(id),
        color: product.default_color(),
        size: product.default_size(),
        product,
        quantity,
        added_at: None,
    }
}

pub(crate) fn snapshot(items: Vec<CartLineItem>) -> CartSnapshot {
    CartSnapshot {
        items,
        promotion: None,
    }
}

/// `UNI10`: 10% off, capped at 20,000.00.
pub(crate) fn uni10() -> AppliedPromotion {
    AppliedPromotion {
        code: "UNI10".to_string(),
        description: Some("10% off for students".to_string()),
        discount_percentage: Some(Decimal::from(10)),
        max_discount: Some(20_000_00),
        ..AppliedPromotion::default()
    }
}

pub(crate) fn wishlist_entry(id: u64, product: Product) -> WishlistEntry {
    WishlistEntry {
        id: WishlistEntryId::new(id),
        product,
        added_at: None,
    }
}

pub(crate) fn signed_in() -> MockAuthSession {
    let mut auth = MockAuthSession::new();

    auth.expect_is_authenticated().return_const(true);

    auth
}

pub(crate) fn anonymous() -> MockAuthSession {
    let mut auth = MockAuthSession::new();

    auth.expect_is_authenticated().return_const(false);

    auth
}
