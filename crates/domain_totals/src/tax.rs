//! Tax bucketing
//!
//! Tax is computed once per distinct rate over the summed post-discount
//! basis, not per line. Computing per bucket is what keeps many-line
//! documents free of accumulated rounding drift; this is the second of the
//! engine's two rounding checkpoints.

use std::collections::BTreeMap;

use invoice_kernel::{Currency, Money, TaxRate};

use crate::error::TotalsError;

/// Per-rate bases and tax amounts of one document
///
/// `BTreeMap` keys iterate in ascending rate order, which fixes the
/// display and export ordering of the breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBuckets {
    /// Post-discount net basis per rate
    pub bases: BTreeMap<TaxRate, Money>,
    /// Tax owed per rate
    pub taxes: BTreeMap<TaxRate, Money>,
    /// Sum of all per-rate tax amounts
    pub tax_total: Money,
}

/// Groups post-discount line nets by tax rate and computes tax per bucket
pub fn bucketize(
    positions: &[(TaxRate, Money)],
    currency: Currency,
) -> Result<TaxBuckets, TotalsError> {
    let mut bases: BTreeMap<TaxRate, Money> = BTreeMap::new();
    for (rate, net) in positions {
        let entry = bases.entry(*rate).or_insert_with(|| Money::zero(currency));
        *entry = entry.checked_add(net)?;
    }

    let mut taxes = BTreeMap::new();
    let mut tax_total = Money::zero(currency);
    for (rate, basis) in &bases {
        let tax = rate.apply(basis).rounded();
        tax_total = tax_total.checked_add(&tax)?;
        taxes.insert(*rate, tax);
    }

    Ok(TaxBuckets {
        bases,
        taxes,
        tax_total,
    })
}
