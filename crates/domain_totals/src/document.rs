//! Invoices and offers
//!
//! A document owns its line items, its optional discount, and a cached
//! [`Totals`]. Every mutation recomputes the totals through
//! [`compute_totals`] before it is committed, so the cache can never
//! diverge from the lines; persistence layers must store the edit and the
//! recomputed totals in one atomic unit.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use invoice_kernel::{Currency, DocumentId, RecipientId};

use crate::discount::Discount;
use crate::error::TotalsError;
use crate::line_item::LineItem;
use crate::totals::{compute_totals, Totals};

/// Document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    Offer,
}

impl DocumentKind {
    fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Offer => "OFF",
        }
    }
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Being drafted, excluded from any filing
    Draft,
    /// Sent to the recipient
    Issued,
    /// Paid or otherwise closed, eligible for periodic tax filing
    Settled,
    /// Voided
    Cancelled,
}

/// An invoice or offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Kind of document
    pub kind: DocumentKind,
    /// Document number (human-readable)
    pub number: String,
    /// Document date
    pub date: NaiveDate,
    /// Recipient display name
    pub recipient: String,
    /// Link into the external contact system, if known
    pub recipient_id: Option<RecipientId>,
    /// Document currency
    pub currency: Currency,
    /// Ordered line items
    pub line_items: Vec<LineItem>,
    /// Optional document-level discount
    pub discount: Option<Discount>,
    /// Lifecycle status
    pub status: DocumentStatus,
    /// Cached totals, recomputed on every mutation
    pub totals: Totals,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Creates an empty draft document
    pub fn new(
        kind: DocumentKind,
        date: NaiveDate,
        recipient: impl Into<String>,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: DocumentId::new_v7(),
            kind,
            number: generate_document_number(kind),
            date,
            recipient: recipient.into(),
            recipient_id: None,
            currency,
            line_items: Vec::new(),
            discount: None,
            status: DocumentStatus::Draft,
            totals: Totals::zero(currency),
            created_at: now,
            updated_at: now,
        }
    }

    /// Links the recipient to the external contact system
    pub fn with_recipient_id(mut self, recipient_id: RecipientId) -> Self {
        self.recipient_id = Some(recipient_id);
        self
    }

    /// Appends a line item and recomputes the cached totals
    ///
    /// The candidate totals are computed before anything is committed, so
    /// a rejected line leaves the document untouched.
    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), TotalsError> {
        let mut items = self.line_items.clone();
        items.push(item);

        let totals = compute_totals(self.currency, &items, self.discount.as_ref())?;
        self.line_items = items;
        self.commit_totals(totals);
        Ok(())
    }

    /// Replaces the document-level discount and recomputes the totals
    pub fn set_discount(&mut self, discount: Option<Discount>) -> Result<(), TotalsError> {
        let totals = compute_totals(self.currency, &self.line_items, discount.as_ref())?;
        self.discount = discount;
        self.commit_totals(totals);
        Ok(())
    }

    /// Removes the line at `index` and recomputes the totals
    pub fn remove_line_item(&mut self, index: usize) -> Result<(), TotalsError> {
        if index >= self.line_items.len() {
            return Err(TotalsError::InvalidLineItem {
                index,
                reason: "no such line".to_string(),
            });
        }

        let mut items = self.line_items.clone();
        items.remove(index);

        let totals = compute_totals(self.currency, &items, self.discount.as_ref())?;
        self.line_items = items;
        self.commit_totals(totals);
        Ok(())
    }

    /// Marks the document as issued
    pub fn issue(&mut self) {
        self.status = DocumentStatus::Issued;
        self.updated_at = Utc::now();
    }

    /// Marks the document as settled
    pub fn settle(&mut self) {
        self.status = DocumentStatus::Settled;
        self.updated_at = Utc::now();
    }

    /// Voids the document
    pub fn cancel(&mut self) {
        self.status = DocumentStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Returns true if the document is eligible for periodic filing
    pub fn is_settled(&self) -> bool {
        self.status == DocumentStatus::Settled
    }

    /// Returns the cached totals
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    fn commit_totals(&mut self, totals: Totals) {
        self.totals = totals;
        self.updated_at = Utc::now();
    }
}

/// Generates a unique document number
fn generate_document_number(kind: DocumentKind) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}-{}", kind.number_prefix(), duration.as_millis() % 10_000_000_000)
}
