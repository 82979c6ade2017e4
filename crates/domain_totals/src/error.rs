//! Totals domain errors

use invoice_kernel::MoneyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while computing document totals
///
/// Validation errors carry the index of the offending line so the calling
/// surface can point at it instead of reporting a generic failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// Negative quantity or unit price, or an index that does not refer
    /// to an existing line
    #[error("Invalid line item at index {index}: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    /// Negative tax rate
    #[error("Invalid tax rate {rate}% at line index {index}")]
    InvalidTaxRate { index: usize, rate: Decimal },

    /// Negative discount value
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    /// Strict mode only; clamp mode caps the discount at the net total
    #[error("Discount {discount} exceeds net total {net_total}")]
    DiscountExceedsNet {
        discount: Decimal,
        net_total: Decimal,
    },

    /// A line priced in a currency other than the document's
    #[error("Currency mismatch at line index {index}: expected {expected}, found {found}")]
    LineCurrencyMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    /// Internal self-check failure; must never occur for valid input
    #[error("Inconsistent rounding: {0}")]
    InconsistentRounding(String),

    /// Money arithmetic error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
