//! Settlement records
//!
//! The persistence layer hands the aggregator one record per candidate
//! document. Optional fields model what legacy rows actually contain:
//! early documents stored only rounded totals and a per-rate tax map,
//! newer ones also store the per-rate bases.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use invoice_kernel::{Currency, DocumentId, Money, TaxRate};

/// A settled document as seen by the filing aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Source document identifier
    pub document_id: DocumentId,
    /// Human-readable document number, used in warnings
    pub number: String,
    /// Document date; `None` marks a malformed legacy row
    pub date: Option<NaiveDate>,
    /// Whether the document is settled (paid or otherwise closed)
    pub settled: bool,
    /// Document currency
    pub currency: Currency,
    /// Net total after discount
    pub net_total: Money,
    /// Gross total
    pub gross_total: Money,
    /// Tax per rate; `None` marks a malformed legacy row
    pub tax_amounts: Option<BTreeMap<TaxRate, Money>>,
    /// Stored per-rate bases; present on documents written by the current
    /// engine, absent on legacy rows that need ratio reconstruction
    pub basis_amounts: Option<BTreeMap<TaxRate, Money>>,
}

impl SettlementRecord {
    /// Creates a record with the mandatory fields; tax and basis maps are
    /// attached with the builder methods
    pub fn new(
        document_id: DocumentId,
        number: impl Into<String>,
        date: NaiveDate,
        settled: bool,
        currency: Currency,
        net_total: Money,
        gross_total: Money,
    ) -> Self {
        Self {
            document_id,
            number: number.into(),
            date: Some(date),
            settled,
            currency,
            net_total,
            gross_total,
            tax_amounts: None,
            basis_amounts: None,
        }
    }

    /// Attaches the per-rate tax map
    pub fn with_tax_amounts(mut self, tax_amounts: BTreeMap<TaxRate, Money>) -> Self {
        self.tax_amounts = Some(tax_amounts);
        self
    }

    /// Attaches stored per-rate bases
    pub fn with_basis_amounts(mut self, basis_amounts: BTreeMap<TaxRate, Money>) -> Self {
        self.basis_amounts = Some(basis_amounts);
        self
    }

    /// Clears the date, as found on some malformed legacy rows
    pub fn without_date(mut self) -> Self {
        self.date = None;
        self
    }
}
