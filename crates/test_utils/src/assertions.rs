//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than standard assertions.

use domain_totals::Totals;
use invoice_kernel::Money;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than `tolerance`.
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts the arithmetic invariants of a computed `Totals`
///
/// # Panics
///
/// Panics when any of these fail:
/// - net after discount equals net total minus discount and is not negative
/// - the per-rate tax amounts sum to the tax total
/// - the per-rate bases sum to the net after discount
/// - gross equals net after discount plus tax total
pub fn assert_totals_consistent(totals: &Totals) {
    assert!(
        !totals.net_after_discount.is_negative(),
        "net after discount is negative: {}",
        totals.net_after_discount.amount()
    );
    assert_eq!(
        totals.net_after_discount.amount(),
        totals.net_total.amount() - totals.discount_amount.amount(),
        "net after discount diverges from net total minus discount"
    );

    let tax_sum: Decimal = totals.tax_amounts.values().map(|m| m.amount()).sum();
    assert_eq!(
        tax_sum,
        totals.tax_total.amount(),
        "per-rate tax amounts do not sum to the tax total"
    );

    let basis_sum: Decimal = totals.tax_bases.values().map(|m| m.amount()).sum();
    assert_eq!(
        basis_sum,
        totals.net_after_discount.amount(),
        "per-rate bases do not sum to the net after discount"
    );

    assert_eq!(
        totals.gross_total.amount(),
        totals.net_after_discount.amount() + totals.tax_total.amount(),
        "gross total diverges from net after discount plus tax"
    );
}
