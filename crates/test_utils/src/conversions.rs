//! Bridges between the totals and filing domains
//!
//! The filing aggregator consumes settlement records, not documents; in
//! production the persistence layer produces them from stored totals.
//! Tests use this helper to take the same path.

use domain_filing::SettlementRecord;
use domain_totals::Document;

/// Builds the filing view of a document from its cached totals
///
/// Carries both the per-rate tax map and the stored bases, like a row
/// written by the current engine; legacy rows are modelled with
/// [`SettlementRecord::with_tax_amounts`] alone.
pub fn settlement_from_document(document: &Document) -> SettlementRecord {
    let totals = document.totals();

    SettlementRecord::new(
        document.id,
        document.number.clone(),
        document.date,
        document.is_settled(),
        document.currency,
        totals.net_after_discount,
        totals.gross_total,
    )
    .with_tax_amounts(totals.tax_amounts.clone())
    .with_basis_amounts(totals.tax_bases.clone())
}
