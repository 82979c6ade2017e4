//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use domain_filing::SettlementRecord;
use domain_totals::{Discount, Document, DocumentKind, LineItem};
use invoice_kernel::{Currency, DocumentId, Money, TaxRate};

use crate::fixtures::{PeriodFixtures, RateFixtures};

/// Builder for test documents
///
/// Defaults to a draft EUR invoice dated inside Q1 2025 with a
/// fake-generated recipient and no lines.
pub struct TestDocumentBuilder {
    kind: DocumentKind,
    date: NaiveDate,
    recipient: String,
    currency: Currency,
    lines: Vec<LineItem>,
    discount: Option<Discount>,
    settled: bool,
}

impl Default for TestDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocumentBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            kind: DocumentKind::Invoice,
            date: PeriodFixtures::mid_q1_2025(),
            recipient: CompanyName().fake(),
            currency: Currency::EUR,
            lines: Vec::new(),
            discount: None,
            settled: false,
        }
    }

    /// Sets the document kind
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the document date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Sets the recipient name
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Adds a line item
    pub fn with_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Adds a standard-rate line of `quantity × unit_price`
    pub fn with_standard_line(mut self, quantity: Decimal, unit_price: Decimal) -> Self {
        self.lines.push(
            LineItem::new("Service", Money::new(unit_price, Currency::EUR))
                .with_quantity(quantity)
                .with_tax_rate(RateFixtures::standard()),
        );
        self
    }

    /// Sets the document-level discount
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Marks the document settled after building
    pub fn settled(mut self) -> Self {
        self.settled = true;
        self
    }

    /// Builds the document, computing its totals along the way
    ///
    /// Panics on invalid line items or discounts; builders feed tests,
    /// which want to fail loudly.
    pub fn build(self) -> Document {
        let mut doc = Document::new(self.kind, self.date, self.recipient, self.currency);
        for line in self.lines {
            doc.add_line_item(line).expect("builder line item is valid");
        }
        if self.discount.is_some() {
            doc.set_discount(self.discount)
                .expect("builder discount is valid");
        }
        if self.settled {
            doc.issue();
            doc.settle();
        }
        doc
    }
}

/// Builder for settlement records
///
/// Defaults to a settled EUR record inside Q1 2025 carrying one
/// standard-rate tax entry consistent with its net and gross totals.
pub struct SettlementRecordBuilder {
    number: String,
    date: Option<NaiveDate>,
    settled: bool,
    currency: Currency,
    net_total: Decimal,
    tax_entries: Vec<(TaxRate, Decimal)>,
    basis_entries: Option<Vec<(TaxRate, Decimal)>>,
    omit_tax_amounts: bool,
}

impl Default for SettlementRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SettlementRecordBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            number: "INV-1".to_string(),
            date: Some(PeriodFixtures::mid_q1_2025()),
            settled: true,
            currency: Currency::EUR,
            net_total: dec!(100.00),
            tax_entries: vec![(RateFixtures::standard(), dec!(19.00))],
            basis_entries: None,
            omit_tax_amounts: false,
        }
    }

    /// Sets the document number
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the document date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Clears the date to emulate a malformed legacy row
    pub fn without_date(mut self) -> Self {
        self.date = None;
        self
    }

    /// Marks the record as an unsettled draft
    pub fn draft(mut self) -> Self {
        self.settled = false;
        self
    }

    /// Sets the net total
    pub fn with_net_total(mut self, net_total: Decimal) -> Self {
        self.net_total = net_total;
        self
    }

    /// Replaces the tax entries
    pub fn with_tax_entries(mut self, entries: Vec<(TaxRate, Decimal)>) -> Self {
        self.tax_entries = entries;
        self
    }

    /// Drops the tax map entirely to emulate a malformed legacy row
    pub fn without_tax_amounts(mut self) -> Self {
        self.omit_tax_amounts = true;
        self
    }

    /// Attaches stored per-rate bases
    pub fn with_basis_entries(mut self, entries: Vec<(TaxRate, Decimal)>) -> Self {
        self.basis_entries = Some(entries);
        self
    }

    /// Builds the record; gross is derived as net plus all tax entries
    pub fn build(self) -> SettlementRecord {
        let currency = self.currency;
        let tax_sum: Decimal = self.tax_entries.iter().map(|(_, tax)| *tax).sum();

        let net = Money::new(self.net_total, currency);
        let gross = Money::new(self.net_total + tax_sum, currency);

        let mut record = SettlementRecord::new(
            DocumentId::new_v7(),
            self.number,
            self.date.unwrap_or_else(PeriodFixtures::mid_q1_2025),
            self.settled,
            currency,
            net,
            gross,
        );
        if self.date.is_none() {
            record = record.without_date();
        }

        if !self.omit_tax_amounts {
            let taxes: BTreeMap<TaxRate, Money> = self
                .tax_entries
                .into_iter()
                .map(|(rate, tax)| (rate, Money::new(tax, currency)))
                .collect();
            record = record.with_tax_amounts(taxes);
        }

        if let Some(bases) = self.basis_entries {
            let bases: BTreeMap<TaxRate, Money> = bases
                .into_iter()
                .map(|(rate, basis)| (rate, Money::new(basis, currency)))
                .collect();
            record = record.with_basis_amounts(bases);
        }

        record
    }
}
