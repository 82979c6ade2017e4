//! Document-level discounts and their proportional allocation
//!
//! A discount applies once per document, never per line. So that every
//! line's own tax rate still applies to the reduced amount, the discount is
//! spread across lines proportionally to each line's share of the
//! pre-discount net total before tax is computed.

use invoice_kernel::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TotalsError;

/// A document-level discount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Discount {
    /// Percentage of the net total (10 means 10 %)
    Percentage(Decimal),
    /// Fixed amount in the document currency
    Fixed(Decimal),
}

impl Discount {
    /// Returns the raw discount value
    pub fn value(&self) -> Decimal {
        match self {
            Discount::Percentage(v) | Discount::Fixed(v) => *v,
        }
    }
}

/// How to handle a discount that exceeds the net total
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountMode {
    /// Cap the discount at the net total (the default)
    #[default]
    Clamp,
    /// Reject with [`TotalsError::DiscountExceedsNet`]
    Strict,
}

impl Discount {
    /// Computes the discount amount against a pre-discount net total
    ///
    /// Negative values are always rejected. A discount larger than the net
    /// total is clamped or rejected depending on `mode`; the net after
    /// discount can never go negative.
    pub fn amount_against(
        &self,
        net_total: Money,
        mode: DiscountMode,
    ) -> Result<Money, TotalsError> {
        let value = self.value();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TotalsError::InvalidDiscount(format!(
                "negative discount value {value}"
            )));
        }

        let amount = match self {
            Discount::Percentage(v) => net_total.multiply(*v / dec!(100)).rounded(),
            Discount::Fixed(v) => Money::new(*v, net_total.currency()).rounded(),
        };

        if amount.amount() > net_total.amount() {
            return match mode {
                DiscountMode::Clamp => Ok(net_total),
                DiscountMode::Strict => Err(TotalsError::DiscountExceedsNet {
                    discount: amount.amount(),
                    net_total: net_total.amount(),
                }),
            };
        }

        Ok(amount)
    }
}

/// Distributes a discount across line nets, returning each line's net
/// after discount
///
/// Allocation runs at full precision against the unrounded shares; each
/// resulting line net is rounded except the last, which absorbs the
/// residual cent so the lines sum to `net_total − discount` exactly.
///
/// A document whose lines are all free (`net_total == 0`) is returned
/// unchanged; there is nothing to allocate and the discount is zero by
/// definition.
pub fn allocate_discount(
    nets: &[Money],
    discount_amount: Money,
) -> Result<Vec<Money>, TotalsError> {
    if nets.is_empty() {
        return Ok(Vec::new());
    }

    let mut net_total = Money::zero(discount_amount.currency());
    for net in nets {
        net_total = net_total.checked_add(net)?;
    }

    if net_total.is_zero() || discount_amount.is_zero() {
        return Ok(nets.to_vec());
    }

    let remaining = net_total.checked_sub(&discount_amount)?;
    let weights: Vec<Decimal> = nets.iter().map(|n| n.amount()).collect();

    Ok(remaining.allocate_weighted(&weights)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_kernel::Currency;

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    #[test]
    fn test_percentage_amount() {
        let d = Discount::Percentage(dec!(10));
        assert_eq!(
            d.amount_against(eur(dec!(3075)), DiscountMode::Clamp)
                .unwrap()
                .amount(),
            dec!(307.50)
        );
    }

    #[test]
    fn test_fixed_amount_below_net() {
        let d = Discount::Fixed(dec!(50));
        assert_eq!(
            d.amount_against(eur(dec!(100)), DiscountMode::Clamp)
                .unwrap()
                .amount(),
            dec!(50)
        );
    }

    #[test]
    fn test_fixed_clamps_to_net_total() {
        let d = Discount::Fixed(dec!(500));
        let amount = d
            .amount_against(eur(dec!(100)), DiscountMode::Clamp)
            .unwrap();
        assert_eq!(amount.amount(), dec!(100));
    }

    #[test]
    fn test_fixed_strict_rejects_excess() {
        let d = Discount::Fixed(dec!(500));
        let err = d
            .amount_against(eur(dec!(100)), DiscountMode::Strict)
            .unwrap_err();
        assert!(matches!(err, TotalsError::DiscountExceedsNet { .. }));
    }

    #[test]
    fn test_negative_value_rejected_in_both_modes() {
        for mode in [DiscountMode::Clamp, DiscountMode::Strict] {
            let err = Discount::Percentage(dec!(-5))
                .amount_against(eur(dec!(100)), mode)
                .unwrap_err();
            assert!(matches!(err, TotalsError::InvalidDiscount(_)));
        }
    }

    #[test]
    fn test_allocation_preserves_sum() {
        let nets = vec![eur(dec!(1800)), eur(dec!(1275))];
        let after = allocate_discount(&nets, eur(dec!(307.50))).unwrap();

        assert_eq!(after[0].amount(), dec!(1620.00));
        assert_eq!(after[1].amount(), dec!(1147.50));
    }

    #[test]
    fn test_allocation_residual_cent_goes_to_last_line() {
        let nets = vec![eur(dec!(10)), eur(dec!(10)), eur(dec!(10))];
        let after = allocate_discount(&nets, eur(dec!(10))).unwrap();

        assert_eq!(after[0].amount(), dec!(6.67));
        assert_eq!(after[1].amount(), dec!(6.67));
        assert_eq!(after[2].amount(), dec!(6.66));

        let total: Decimal = after.iter().map(|m| m.amount()).sum();
        assert_eq!(total, dec!(20.00));
    }

    #[test]
    fn test_all_free_items_document() {
        let nets = vec![eur(dec!(0)), eur(dec!(0))];
        let after = allocate_discount(&nets, eur(dec!(0))).unwrap();
        assert_eq!(after, nets);
    }

    #[test]
    fn test_zero_discount_leaves_lines_unchanged() {
        let nets = vec![eur(dec!(99.99)), eur(dec!(0.01))];
        let after = allocate_discount(&nets, eur(dec!(0))).unwrap();
        assert_eq!(after, nets);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Discount::Percentage(dec!(10))).unwrap();
        assert_eq!(json, r#"{"kind":"percentage","value":"10"}"#);
    }
}
