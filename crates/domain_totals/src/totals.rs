//! Document totals
//!
//! [`compute_totals`] is the one entry point every caller goes through;
//! rendering, export, and persistence consume the resulting [`Totals`]
//! value and never recompute the arithmetic themselves.

use std::collections::BTreeMap;

use invoice_kernel::{Currency, Money, TaxRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::{allocate_discount, Discount, DiscountMode};
use crate::error::TotalsError;
use crate::line_item::LineItem;
use crate::position::position_amounts;
use crate::tax::bucketize;

/// The canonical monetary totals of one document
///
/// A `Totals` is a pure function of its line items and discount. Callers
/// cache it on the document but must recompute it together with any edit;
/// it is never mutated on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Document currency
    pub currency: Currency,
    /// Sum of all line nets before discount
    pub net_total: Money,
    /// Discount applied at document level
    pub discount_amount: Money,
    /// `net_total − discount_amount`, never negative
    pub net_after_discount: Money,
    /// Post-discount net basis per tax rate, ascending by rate
    ///
    /// Stored so filing summaries can use the basis directly instead of
    /// reconstructing it from the tax ratio.
    pub tax_bases: BTreeMap<TaxRate, Money>,
    /// Tax owed per rate, ascending by rate
    pub tax_amounts: BTreeMap<TaxRate, Money>,
    /// Sum of all per-rate tax amounts
    pub tax_total: Money,
    /// `net_after_discount + tax_total`
    pub gross_total: Money,
}

impl Totals {
    /// All-zero totals of an empty document
    pub fn zero(currency: Currency) -> Self {
        Self {
            currency,
            net_total: Money::zero(currency),
            discount_amount: Money::zero(currency),
            net_after_discount: Money::zero(currency),
            tax_bases: BTreeMap::new(),
            tax_amounts: BTreeMap::new(),
            tax_total: Money::zero(currency),
            gross_total: Money::zero(currency),
        }
    }
}

/// Computes document totals with the default clamping discount mode
pub fn compute_totals(
    currency: Currency,
    items: &[LineItem],
    discount: Option<&Discount>,
) -> Result<Totals, TotalsError> {
    compute_totals_with(currency, items, discount, DiscountMode::Clamp)
}

/// Computes document totals
///
/// Pipeline: per-line position amounts (first rounding checkpoint), net
/// total, discount amount, proportional discount allocation, per-rate tax
/// buckets (second rounding checkpoint), gross total. Fails fast on the
/// first malformed line; never guesses.
pub fn compute_totals_with(
    currency: Currency,
    items: &[LineItem],
    discount: Option<&Discount>,
    mode: DiscountMode,
) -> Result<Totals, TotalsError> {
    if items.is_empty() {
        return Ok(Totals::zero(currency));
    }

    let mut nets = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.unit_price.currency() != currency {
            return Err(TotalsError::LineCurrencyMismatch {
                index,
                expected: currency.to_string(),
                found: item.unit_price.currency().to_string(),
            });
        }
        nets.push(position_amounts(index, item)?.net);
    }

    let mut net_total = Money::zero(currency);
    for net in &nets {
        net_total = net_total.checked_add(net)?;
    }

    let discount_amount = match discount {
        Some(d) => d.amount_against(net_total, mode)?,
        None => Money::zero(currency),
    };
    let net_after_discount = net_total.checked_sub(&discount_amount)?;

    let line_nets_after = allocate_discount(&nets, discount_amount)?;
    let positions: Vec<(TaxRate, Money)> = items
        .iter()
        .map(|item| item.tax_rate)
        .zip(line_nets_after)
        .collect();

    let buckets = bucketize(&positions, currency)?;
    let gross_total = net_after_discount.checked_add(&buckets.tax_total)?;

    let totals = Totals {
        currency,
        net_total,
        discount_amount,
        net_after_discount,
        tax_bases: buckets.bases,
        tax_amounts: buckets.taxes,
        tax_total: buckets.tax_total,
        gross_total,
    };
    verify_consistency(&totals)?;

    Ok(totals)
}

/// One-cent epsilon used by the rounding self-check
const EPSILON_MINOR_UNITS: i64 = 1;

/// Defensive self-check over a freshly computed `Totals`
///
/// The bucket sum and the gross identity hold by construction; a
/// divergence beyond one cent means an engine defect, which is logged and
/// surfaced instead of silently swallowed.
fn verify_consistency(totals: &Totals) -> Result<(), TotalsError> {
    let epsilon = Money::from_minor(EPSILON_MINOR_UNITS, totals.currency).amount();

    let bucket_sum: Decimal = totals.tax_amounts.values().map(|m| m.amount()).sum();
    if (bucket_sum - totals.tax_total.amount()).abs() > epsilon {
        let message = format!(
            "tax buckets sum to {bucket_sum}, declared tax total is {}",
            totals.tax_total.amount()
        );
        tracing::error!(%message, "totals self-check failed");
        return Err(TotalsError::InconsistentRounding(message));
    }

    let expected_gross = totals.net_after_discount.amount() + totals.tax_total.amount();
    if (expected_gross - totals.gross_total.amount()).abs() > epsilon {
        let message = format!(
            "gross total {} diverges from net after discount + tax {expected_gross}",
            totals.gross_total.amount()
        );
        tracing::error!(%message, "totals self-check failed");
        return Err(TotalsError::InconsistentRounding(message));
    }

    Ok(())
}
