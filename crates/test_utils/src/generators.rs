//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use domain_totals::{Discount, LineItem};
use invoice_kernel::{Currency, Money, TaxRate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Strategy for generating supported currencies
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::EUR),
        Just(Currency::USD),
        Just(Currency::GBP),
        Just(Currency::CHF),
        Just(Currency::JPY),
    ]
}

/// Strategy for non-negative amounts in minor units
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy for non-negative EUR Money values
pub fn eur_money_strategy() -> impl Strategy<Value = Money> {
    amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::EUR))
}

/// Strategy for realistic tax rates: the German brackets plus arbitrary
/// rates up to 30 %
pub fn tax_rate_strategy() -> impl Strategy<Value = TaxRate> {
    prop_oneof![
        Just(TaxRate::new(dec!(0))),
        Just(TaxRate::new(dec!(7))),
        Just(TaxRate::new(dec!(19))),
        (0u32..3000u32).prop_map(|r| TaxRate::new(Decimal::new(r as i64, 2))),
    ]
}

/// Strategy for quantities with up to two decimal places (0.01 to 100.00)
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|q| Decimal::new(q, 2))
}

/// Strategy for valid EUR line items
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (quantity_strategy(), 0i64..1_000_000i64, tax_rate_strategy()).prop_map(
        |(quantity, price_cents, rate)| {
            LineItem::new("generated", Money::from_minor(price_cents, Currency::EUR))
                .with_quantity(quantity)
                .with_tax_rate(rate)
        },
    )
}

/// Strategy for optional document-level discounts that cannot exceed the
/// net total when clamped
pub fn discount_strategy() -> impl Strategy<Value = Option<Discount>> {
    prop_oneof![
        Just(None),
        (0u32..=100u32).prop_map(|p| Some(Discount::Percentage(Decimal::new(p as i64, 0)))),
        (0i64..1_000_000i64).prop_map(|c| Some(Discount::Fixed(Decimal::new(c, 2)))),
    ]
}
