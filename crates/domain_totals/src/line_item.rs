//! Invoice line items

use invoice_kernel::{Money, TaxRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single position on an invoice or offer
///
/// Quantities and prices arrive from the document-editing surface as-is;
/// validation happens when totals are computed so the offending line index
/// can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description shown on the document
    pub description: String,
    /// Quantity (may be fractional, e.g. hours)
    pub quantity: Decimal,
    /// Price per unit, in the document currency
    pub unit_price: Money,
    /// Tax rate applied to this line
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a line item with quantity 1 and a 0 % tax rate
    pub fn new(description: impl Into<String>, unit_price: Money) -> Self {
        Self {
            description: description.into(),
            quantity: Decimal::ONE,
            unit_price,
            tax_rate: TaxRate::new(Decimal::ZERO),
        }
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the tax rate
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}
