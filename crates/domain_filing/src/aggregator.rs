//! Period aggregation
//!
//! Produces the tax-filing summary of a reporting period from settled
//! documents' cached totals. Unsettled and out-of-range documents are
//! excluded silently; malformed records are skipped with a recorded
//! warning so a single broken row never aborts a filing.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use invoice_kernel::{Currency, DateRange, DocumentId, Money, TaxRate};

use crate::settlement::SettlementRecord;

/// Basis and tax of one rate within a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    pub rate: TaxRate,
    /// Net basis the rate was applied to
    pub basis_amount: Money,
    /// Tax owed at this rate
    pub tax_amount: Money,
}

/// The aggregated filing summary of one reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Reporting period, bounds inclusive
    pub period: DateRange,
    /// Filing currency
    pub currency: Currency,
    /// Per-rate breakdown, ascending by rate
    pub rates: Vec<RateSummary>,
    /// Total tax payable across all rates
    pub total_payable: Money,
}

/// Why a record was left out of the summary
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SkipReason {
    #[error("document date is missing")]
    MissingDate,

    #[error("per-rate tax amounts are missing")]
    MissingTaxAmounts,

    #[error("document currency {found} does not match filing currency {expected}")]
    CurrencyMismatch { expected: String, found: String },

    /// Legacy basis reconstruction divides by gross − net; with a nonzero
    /// rate and gross == net the ratio is ill-defined
    #[error("basis for rate {rate}% cannot be reconstructed: gross equals net")]
    UnreconstructibleBasis { rate: Decimal },
}

/// A warning recorded alongside the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub document_id: DocumentId,
    pub number: String,
    pub reason: SkipReason,
}

/// Summary plus the warnings gathered while building it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregation {
    pub summary: PeriodSummary,
    pub skipped: Vec<SkippedRecord>,
}

/// Aggregates settled documents into a period filing summary
///
/// A document contributes iff its date lies inside `period` (bounds
/// inclusive) and it is settled. Degrades gracefully: malformed records
/// are collected into [`PeriodAggregation::skipped`] and logged, and
/// aggregation continues.
pub fn compute_period_summary(
    records: &[SettlementRecord],
    period: DateRange,
    currency: Currency,
) -> PeriodAggregation {
    let mut buckets: BTreeMap<TaxRate, (Money, Money)> = BTreeMap::new();
    let mut skipped = Vec::new();

    let skip = |record: &SettlementRecord, reason: SkipReason, skipped: &mut Vec<SkippedRecord>| {
        tracing::warn!(
            document = %record.number,
            reason = %reason,
            "skipping record during period aggregation"
        );
        skipped.push(SkippedRecord {
            document_id: record.document_id,
            number: record.number.clone(),
            reason,
        });
    };

    for record in records {
        if !record.settled {
            continue;
        }

        let Some(date) = record.date else {
            skip(record, SkipReason::MissingDate, &mut skipped);
            continue;
        };
        if !period.contains(date) {
            continue;
        }

        if record.currency != currency {
            skip(
                record,
                SkipReason::CurrencyMismatch {
                    expected: currency.to_string(),
                    found: record.currency.to_string(),
                },
                &mut skipped,
            );
            continue;
        }

        let Some(tax_amounts) = &record.tax_amounts else {
            skip(record, SkipReason::MissingTaxAmounts, &mut skipped);
            continue;
        };

        for (rate, tax) in tax_amounts {
            match basis_for(record, *rate, *tax) {
                Ok(basis) => {
                    // the record-level filter only sees the header currency;
                    // map entries of a malformed row can still disagree
                    if let Some(found) = [tax.currency(), basis.currency()]
                        .into_iter()
                        .find(|c| *c != currency)
                    {
                        skip(
                            record,
                            SkipReason::CurrencyMismatch {
                                expected: currency.to_string(),
                                found: found.to_string(),
                            },
                            &mut skipped,
                        );
                        continue;
                    }

                    let entry = buckets
                        .entry(*rate)
                        .or_insert_with(|| (Money::zero(currency), Money::zero(currency)));
                    entry.0 = entry.0 + basis;
                    entry.1 = entry.1 + *tax;
                }
                Err(reason) => skip(record, reason, &mut skipped),
            }
        }
    }

    let mut total_payable = Money::zero(currency);
    let rates = buckets
        .into_iter()
        .map(|(rate, (basis_amount, tax_amount))| {
            total_payable = total_payable + tax_amount;
            RateSummary {
                rate,
                basis_amount,
                tax_amount,
            }
        })
        .collect();

    PeriodAggregation {
        summary: PeriodSummary {
            period,
            currency,
            rates,
            total_payable,
        },
        skipped,
    }
}

/// Determines the net basis behind one (rate, tax) pair of a record
///
/// Stored bases are used directly. A 0 % rate contributes the record's
/// whole net total as basis without tax. Everything else takes the legacy
/// reconstruction `net × tax / (gross − net)`, a compatibility shim for
/// rows that predate stored bases.
fn basis_for(record: &SettlementRecord, rate: TaxRate, tax: Money) -> Result<Money, SkipReason> {
    if let Some(bases) = &record.basis_amounts {
        if let Some(basis) = bases.get(&rate) {
            return Ok(*basis);
        }
    }

    if rate.is_zero() {
        return Ok(record.net_total);
    }

    let tax_portion = record
        .gross_total
        .checked_sub(&record.net_total)
        .map_err(|_| SkipReason::CurrencyMismatch {
            expected: record.net_total.currency().to_string(),
            found: record.gross_total.currency().to_string(),
        })?;

    if tax_portion.is_zero() {
        return Err(SkipReason::UnreconstructibleBasis {
            rate: rate.as_percentage(),
        });
    }

    let basis = record
        .net_total
        .multiply(tax.amount())
        .divide(tax_portion.amount())
        .map_err(|_| SkipReason::UnreconstructibleBasis {
            rate: rate.as_percentage(),
        })?;

    Ok(basis.rounded())
}
