//! Invoice Kernel - Foundational types for the invoicing calculation core
//!
//! This crate provides the building blocks shared by the totals and filing
//! domains:
//! - Money with precise decimal arithmetic and a single rounding policy
//! - Tax rate percentages usable as ordered map keys
//! - Date ranges for reporting periods
//! - Strongly-typed document identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Currency, Money, MoneyError, TaxRate};
pub use temporal::{DateRange, TemporalError};
pub use identifiers::{DocumentId, RecipientId};
