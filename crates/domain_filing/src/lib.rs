//! Filing Domain - Periodic Tax Summaries
//!
//! Rolls already-settled documents up into the per-rate tax bases and
//! payable tax of a reporting period (typically a calendar quarter).
//!
//! The aggregator works from [`SettlementRecord`]s, the persistence
//! layer's view of a document's cached totals. It never re-derives numbers
//! from raw line items: historical documents may only retain rounded
//! totals and a per-rate tax map. Malformed records degrade to warnings;
//! one broken row must not abort a filing.

pub mod aggregator;
pub mod settlement;

pub use aggregator::{
    compute_period_summary, PeriodAggregation, PeriodSummary, RateSummary, SkipReason,
    SkippedRecord,
};
pub use settlement::SettlementRecord;
