//! Pre-built Test Fixtures
//!
//! Ready-to-use test data shared across the suite; consistent and
//! predictable so expected values can be asserted exactly.

use chrono::NaiveDate;
use invoice_kernel::{Currency, DateRange, Money, TaxRate};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard EUR amount
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }

    /// The net total of the reference consulting invoice
    pub fn eur_consulting_net() -> Money {
        Money::new(dec!(3075.00), Currency::EUR)
    }

    /// A zero amount
    pub fn eur_zero() -> Money {
        Money::zero(Currency::EUR)
    }

    /// A CHF amount for currency mismatch tests
    pub fn chf_100() -> Money {
        Money::new(dec!(100.00), Currency::CHF)
    }
}

/// Fixture for tax rates
pub struct RateFixtures;

impl RateFixtures {
    /// German standard VAT rate
    pub fn standard() -> TaxRate {
        TaxRate::new(dec!(19))
    }

    /// German reduced VAT rate
    pub fn reduced() -> TaxRate {
        TaxRate::new(dec!(7))
    }

    /// Tax-exempt rate
    pub fn exempt() -> TaxRate {
        TaxRate::new(dec!(0))
    }
}

/// Fixture for reporting periods
pub struct PeriodFixtures;

impl PeriodFixtures {
    /// First quarter of 2025
    pub fn q1_2025() -> DateRange {
        DateRange::quarter(2025, 1).expect("valid quarter")
    }

    /// Second quarter of 2025
    pub fn q2_2025() -> DateRange {
        DateRange::quarter(2025, 2).expect("valid quarter")
    }

    /// A date inside Q1 2025
    pub fn mid_q1_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).expect("valid date")
    }

    /// A date outside Q1 2025
    pub fn outside_q1_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid date")
    }
}
