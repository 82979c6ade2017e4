//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! invoicing core test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common values
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `conversions`: Bridges between the totals and filing domains

pub mod assertions;
pub mod builders;
pub mod conversions;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use conversions::*;
pub use fixtures::*;
pub use generators::*;
