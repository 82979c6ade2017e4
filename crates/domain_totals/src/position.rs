//! Position calculation
//!
//! Computes the net and gross amount of one line item. This is the first of
//! the engine's two rounding checkpoints.

use invoice_kernel::Money;
use serde::{Deserialize, Serialize};

use crate::error::TotalsError;
use crate::line_item::LineItem;

/// Net and gross amount of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAmounts {
    /// quantity × unit price, rounded to the minor unit
    pub net: Money,
    /// net × (1 + rate/100), rounded to the minor unit
    pub gross: Money,
}

/// Computes the amounts for the line at `index`
///
/// Rejects negative quantities, prices, and tax rates before any
/// arithmetic; the index identifies the offending line to the caller.
pub fn position_amounts(index: usize, item: &LineItem) -> Result<PositionAmounts, TotalsError> {
    if item.quantity.is_sign_negative() && !item.quantity.is_zero() {
        return Err(TotalsError::InvalidLineItem {
            index,
            reason: format!("negative quantity {}", item.quantity),
        });
    }
    if item.unit_price.is_negative() {
        return Err(TotalsError::InvalidLineItem {
            index,
            reason: format!("negative unit price {}", item.unit_price.amount()),
        });
    }
    if item.tax_rate.is_negative() {
        return Err(TotalsError::InvalidTaxRate {
            index,
            rate: item.tax_rate.as_percentage(),
        });
    }

    let net = item.unit_price.multiply(item.quantity).rounded();
    let gross = net.multiply(item.tax_rate.gross_factor()).rounded();

    Ok(PositionAmounts { net, gross })
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_kernel::{Currency, TaxRate};
    use rust_decimal_macros::dec;

    fn line(quantity: rust_decimal::Decimal, price: rust_decimal::Decimal, rate: rust_decimal::Decimal) -> LineItem {
        LineItem::new("test", Money::new(price, Currency::EUR))
            .with_quantity(quantity)
            .with_tax_rate(TaxRate::new(rate))
    }

    #[test]
    fn test_net_and_gross() {
        let amounts = position_amounts(0, &line(dec!(20), dec!(90), dec!(19))).unwrap();
        assert_eq!(amounts.net.amount(), dec!(1800.00));
        assert_eq!(amounts.gross.amount(), dec!(2142.00));
    }

    #[test]
    fn test_fractional_quantity_rounds_half_up() {
        // 1.5 × 0.99 = 1.485 -> 1.49
        let amounts = position_amounts(0, &line(dec!(1.5), dec!(0.99), dec!(0))).unwrap();
        assert_eq!(amounts.net.amount(), dec!(1.49));
        assert_eq!(amounts.gross, amounts.net);
    }

    #[test]
    fn test_zero_quantity_is_valid() {
        let amounts = position_amounts(0, &line(dec!(0), dec!(10), dec!(19))).unwrap();
        assert!(amounts.net.is_zero());
        assert!(amounts.gross.is_zero());
    }

    #[test]
    fn test_negative_quantity_rejected_with_index() {
        let err = position_amounts(3, &line(dec!(-1), dec!(10), dec!(19))).unwrap_err();
        assert!(matches!(err, TotalsError::InvalidLineItem { index: 3, .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = position_amounts(0, &line(dec!(1), dec!(-10), dec!(19))).unwrap_err();
        assert!(matches!(err, TotalsError::InvalidLineItem { index: 0, .. }));
    }

    #[test]
    fn test_negative_tax_rate_rejected() {
        let err = position_amounts(1, &line(dec!(1), dec!(10), dec!(-7))).unwrap_err();
        assert_eq!(
            err,
            TotalsError::InvalidTaxRate {
                index: 1,
                rate: dec!(-7)
            }
        );
    }
}
