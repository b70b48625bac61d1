//! Integration tests for cart totals with promo codes and shipping

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, UZS},
};
use testresult::TestResult;

use storefront::{
    discounts::PromotionDiscount, items::LineItem, pricing::compute_totals,
    promotions::Promotion, shipping::ShippingPolicy,
};

fn uzs(major: i64) -> Money<'static, Currency> {
    Money::from_major(major, UZS)
}

fn carts() -> Vec<Vec<LineItem<'static>>> {
    vec![
        vec![LineItem::new(uzs(1), 1)],
        vec![LineItem::new(uzs(50_000), 1)],
        vec![LineItem::new(uzs(45_000), 2), LineItem::new(uzs(60_000), 1)],
        vec![LineItem::new(uzs(200_000), 1)],
        vec![LineItem::new(uzs(125_000), 2), LineItem::new(uzs(9_999), 3)],
        vec![LineItem::new(uzs(1_500_000), 4)],
    ]
}

#[test]
fn no_promotion_means_no_discount() -> TestResult {
    let shipping = ShippingPolicy::default();

    for items in carts() {
        let totals = compute_totals(&items, None, &shipping)?;

        assert_eq!(totals.discount(), uzs(0));
        assert_eq!(
            totals.total().to_minor_units(),
            totals.subtotal().to_minor_units() + totals.shipping().to_minor_units(),
            "total must be subtotal plus shipping"
        );
    }

    Ok(())
}

#[test]
fn below_minimum_order_amount_discount_is_zero() -> TestResult {
    let shipping = ShippingPolicy::default();

    let shapes = [
        PromotionDiscount::Percentage(Decimal::from(15)),
        PromotionDiscount::FixedAmount(uzs(25_000)),
        PromotionDiscount::CappedPercentage {
            percentage: Decimal::from(30),
            cap: uzs(50_000),
        },
    ];

    for shape in shapes {
        let promotion = Promotion::new("GATED", shape).with_min_order_amount(uzs(500_000));

        for items in carts() {
            let totals = compute_totals(&items, Some(&promotion), &shipping)?;

            if totals.subtotal().to_minor_units() < uzs(500_000).to_minor_units() {
                assert_eq!(totals.discount(), uzs(0), "gated promotion must not discount");
            }
        }
    }

    Ok(())
}

#[test]
fn fixed_amount_discount_never_exceeds_subtotal() -> TestResult {
    let shipping = ShippingPolicy::default();

    for amount in [1, 10_000, 99_999, 250_000, 10_000_000] {
        let promotion = Promotion::new("FIXED", PromotionDiscount::FixedAmount(uzs(amount)));

        for items in carts() {
            let totals = compute_totals(&items, Some(&promotion), &shipping)?;

            assert!(
                totals.discount().to_minor_units() <= totals.subtotal().to_minor_units(),
                "fixed discount exceeded subtotal"
            );
            assert!(totals.total().to_minor_units() >= 0, "total went negative");
        }
    }

    Ok(())
}

#[test]
fn capped_percentage_is_min_of_percentage_and_cap() -> TestResult {
    let shipping = ShippingPolicy::default();

    for (pct, cap) in [(10, 20_000), (25, 100_000), (50, 1)] {
        let promotion = Promotion::new(
            "CAPPED",
            PromotionDiscount::CappedPercentage {
                percentage: Decimal::from(pct),
                cap: uzs(cap),
            },
        );

        for items in carts() {
            let totals = compute_totals(&items, Some(&promotion), &shipping)?;

            let uncapped = totals.subtotal().to_minor_units() * pct / 100;
            let expected = uncapped.min(uzs(cap).to_minor_units());

            assert_eq!(totals.discount().to_minor_units(), expected);
        }
    }

    Ok(())
}

#[test]
fn above_free_shipping_threshold_ships_free() -> TestResult {
    let items = [LineItem::new(uzs(250_000), 1)];

    let totals = compute_totals(&items, None, &ShippingPolicy::default())?;

    assert_eq!(totals.subtotal(), uzs(250_000));
    assert_eq!(totals.shipping(), uzs(0));
    assert_eq!(totals.total(), uzs(250_000));

    Ok(())
}

#[test]
fn below_free_shipping_threshold_pays_flat_fee() -> TestResult {
    let items = [LineItem::new(uzs(75_000), 2)];

    let totals = compute_totals(&items, None, &ShippingPolicy::default())?;

    assert_eq!(totals.subtotal(), uzs(150_000));
    assert_eq!(totals.shipping(), uzs(15_000));
    assert_eq!(totals.total(), uzs(165_000));
    assert_eq!(totals.item_count(), 2);

    Ok(())
}

#[test]
fn ten_percent_capped_at_twenty_thousand() -> TestResult {
    let items = [LineItem::new(uzs(100_000), 3)];

    let promotion = Promotion::new(
        "UNI10",
        PromotionDiscount::CappedPercentage {
            percentage: Decimal::from(10),
            cap: uzs(20_000),
        },
    );

    let totals = compute_totals(&items, Some(&promotion), &ShippingPolicy::default())?;

    assert_eq!(totals.subtotal(), uzs(300_000));
    assert_eq!(totals.discount(), uzs(20_000));
    assert_eq!(totals.shipping(), uzs(0));
    assert_eq!(totals.total(), uzs(280_000));

    Ok(())
}

#[test]
fn minimum_order_not_met_keeps_full_price() -> TestResult {
    let items = [LineItem::new(uzs(50_000), 1)];

    let promotion = Promotion::new("BIGSPEND", PromotionDiscount::Percentage(Decimal::from(20)))
        .with_min_order_amount(uzs(100_000));

    let totals = compute_totals(&items, Some(&promotion), &ShippingPolicy::default())?;

    assert_eq!(totals.discount(), uzs(0));
    assert_eq!(totals.shipping(), uzs(15_000));
    assert_eq!(totals.total(), uzs(65_000));

    Ok(())
}
