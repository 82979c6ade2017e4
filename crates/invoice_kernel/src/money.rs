//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//!
//! # Rounding policy
//!
//! Amounts are stored at full precision. Rounding to the currency's minor
//! unit happens only through [`Money::rounded`], which rounds half-up
//! (midpoint away from zero). The totals engine invokes that checkpoint
//! exactly twice: once per line position, once per tax bucket. Intermediate
//! values are never rounded, so long documents cannot accumulate cent drift.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    JPY,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::CHF => "CHF",
            Currency::JPY => "¥",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount with associated currency
///
/// Money keeps the full decimal precision of every operation; callers pick
/// the moment a value becomes a displayable minor-unit amount by calling
/// [`Money::rounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value at full precision
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.currency)
    }

    /// Rounds half-up to the currency's minor unit
    ///
    /// This is the engine's only rounding operation; every displayed amount
    /// passes through it exactly once.
    pub fn rounded(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiplies by a scalar (e.g., a quantity or a rate fraction)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor, self.currency))
    }

    /// Splits this amount proportionally to the given weights
    ///
    /// Every part except the last is rounded to the minor unit; the last
    /// part receives the exact remainder so the parts always sum to the
    /// rounded whole. Weights must be non-negative with a positive sum.
    pub fn allocate_weighted(&self, weights: &[Decimal]) -> Result<Vec<Money>, MoneyError> {
        if weights.is_empty() {
            return Err(MoneyError::InvalidAmount("Empty weights".to_string()));
        }
        if weights.iter().any(|w| w.is_sign_negative() && !w.is_zero()) {
            return Err(MoneyError::InvalidAmount("Negative weight".to_string()));
        }

        let total_weight: Decimal = weights.iter().sum();
        if total_weight.is_zero() {
            return Err(MoneyError::InvalidAmount("Total weight is zero".to_string()));
        }

        let whole = self.rounded();
        let mut allocated = Money::zero(self.currency);
        let mut parts = Vec::with_capacity(weights.len());

        for (i, weight) in weights.iter().enumerate() {
            if i == weights.len() - 1 {
                // Last part absorbs the residual cent so the sum is exact
                parts.push(whole.checked_sub(&allocated)?);
            } else {
                let part = self.multiply(*weight / total_weight).rounded();
                allocated = allocated.checked_add(&part)?;
                parts.push(part);
            }
        }

        Ok(parts)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

/// A tax rate expressed as a percentage (19 means 19 %)
///
/// Ordered and hashable so rates can key a `BTreeMap`; ascending iteration
/// over that map gives the deterministic bucket ordering used everywhere a
/// per-rate breakdown is displayed or exported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a rate from a percentage value (e.g., 19 for 19 %)
    pub fn new(percentage: Decimal) -> Self {
        Self(percentage)
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (e.g., 0.19 for 19 %)
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    /// Returns the gross multiplier (e.g., 1.19 for 19 %)
    pub fn gross_factor(&self) -> Decimal {
        dec!(1) + self.as_fraction()
    }

    /// Returns true for a 0 % rate (tax-exempt)
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true for a negative (malformed) rate
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Applies this rate to an amount, without rounding
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.as_fraction())
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_keeps_full_precision() {
        let m = Money::new(dec!(100.123456789), Currency::EUR);
        assert_eq!(m.amount(), dec!(100.123456789));
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050, Currency::EUR);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_rounded_is_half_up() {
        assert_eq!(
            Money::new(dec!(525.825), Currency::EUR).rounded().amount(),
            dec!(525.83)
        );
        assert_eq!(
            Money::new(dec!(525.824), Currency::EUR).rounded().amount(),
            dec!(525.82)
        );
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::EUR);
        let b = Money::new(dec!(50.00), Currency::EUR);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
        assert_eq!((-a).amount(), dec!(-100.00));
        assert_eq!((a * dec!(0.5)).amount(), dec!(50.00));
        assert_eq!((b - a).abs().amount(), dec!(50.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let eur = Money::new(dec!(100.00), Currency::EUR);
        let usd = Money::new(dec!(100.00), Currency::USD);

        let result = eur.checked_add(&usd);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_divide_by_zero() {
        let m = Money::new(dec!(100.00), Currency::EUR);
        assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_allocate_weighted_sums_to_whole() {
        let m = Money::new(dec!(20.00), Currency::EUR);
        let parts = m
            .allocate_weighted(&[dec!(10), dec!(10), dec!(10)])
            .unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].amount(), dec!(6.67));
        assert_eq!(parts[1].amount(), dec!(6.67));
        // residual cent lands on the last part
        assert_eq!(parts[2].amount(), dec!(6.66));
    }

    #[test]
    fn test_allocate_weighted_rejects_zero_total() {
        let m = Money::new(dec!(10.00), Currency::EUR);
        assert!(m.allocate_weighted(&[dec!(0), dec!(0)]).is_err());
        assert!(m.allocate_weighted(&[]).is_err());
    }

    #[test]
    fn test_tax_rate_apply() {
        let rate = TaxRate::new(dec!(19));
        let net = Money::new(dec!(100.00), Currency::EUR);

        assert_eq!(rate.apply(&net).amount(), dec!(19.00));
        assert_eq!(rate.gross_factor(), dec!(1.19));
    }

    #[test]
    fn test_tax_rate_ordering() {
        assert!(TaxRate::new(dec!(7)) < TaxRate::new(dec!(19)));
        assert_eq!(TaxRate::new(dec!(19.0)), TaxRate::new(dec!(19)));
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::new(dec!(19.0)).to_string(), "19%");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn weighted_allocation_sum_equals_rounded_whole(
            amount in 1i64..1_000_000_000i64,
            weights in proptest::collection::vec(1u32..10_000u32, 1..50)
        ) {
            let money = Money::from_minor(amount, Currency::EUR);
            let weights: Vec<Decimal> =
                weights.into_iter().map(|w| Decimal::new(w as i64, 0)).collect();
            let parts = money.allocate_weighted(&weights).unwrap();

            let total: Decimal = parts.iter().map(|m| m.amount()).sum();
            prop_assert_eq!(total, money.rounded().amount());
        }

        #[test]
        fn money_addition_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a, Currency::EUR);
            let mb = Money::from_minor(b, Currency::EUR);
            let mc = Money::from_minor(c, Currency::EUR);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }
    }
}
