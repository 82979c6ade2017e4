//! Totals Domain - Document Totals Calculation
//!
//! This crate is the single source of truth for invoice arithmetic. Every
//! surface that shows, stores, or exports monetary totals consumes a
//! [`Totals`] computed here and never re-derives the numbers itself.
//!
//! # Calculation pipeline
//!
//! Line items flow through three stateless components:
//! - position calculation: net/gross per line (first rounding checkpoint)
//! - discount allocation: one document-level discount spread proportionally
//!   across lines so each line's own tax rate still applies
//! - tax bucketing: per-rate basis and tax amounts (second rounding
//!   checkpoint), then gross = net after discount + total tax
//!
//! All computations are pure, synchronous, and linear in the number of
//! lines; callers may invoke them from any number of threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_totals::{compute_totals, Discount, LineItem};
//! use invoice_kernel::{Currency, Money, TaxRate};
//! use rust_decimal_macros::dec;
//!
//! let lines = vec![
//!     LineItem::new("Consulting", Money::new(dec!(90), Currency::EUR))
//!         .with_quantity(dec!(20))
//!         .with_tax_rate(TaxRate::new(dec!(19))),
//! ];
//!
//! let totals = compute_totals(Currency::EUR, &lines, Some(&Discount::Percentage(dec!(10))))?;
//! ```

pub mod document;
pub mod discount;
pub mod error;
pub mod line_item;
pub mod position;
pub mod tax;
pub mod totals;

pub use document::{Document, DocumentKind, DocumentStatus};
pub use discount::{allocate_discount, Discount, DiscountMode};
pub use error::TotalsError;
pub use line_item::LineItem;
pub use position::{position_amounts, PositionAmounts};
pub use tax::{bucketize, TaxBuckets};
pub use totals::{compute_totals, compute_totals_with, Totals};
