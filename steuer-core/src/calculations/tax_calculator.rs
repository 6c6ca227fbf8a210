//! Combined tax assessment for Kanton Solothurn.
//!
//! The calculator walks the cantonal bracket schedule, looks up the federal
//! tariff, and derives the communal and church amounts from the cantonal
//! base via the municipality Steuerfuss.
//!
//! # Calculation outline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Health-insurance deduction: 1700 (Single/Cohabiting) or 3500 |
//! | 2    | Commuter deduction: min(km × 2 × 220 × 0.7, 7000) |
//! | 3    | Taxable income: max(0, net income − deductions) |
//! | 4    | Cantonal base: bracket walk (flat 11.5% above 310 000) |
//! | 5    | Cantonal tax: base × 1.04 surcharge |
//! | 6    | Communal tax: base × Steuerfuss / 100 |
//! | 7    | Church tax: communal × denominational rate |
//! | 8    | Federal tax: tariff lookup, income splitting for non-singles |
//! | 9    | Total: sum of communal, cantonal, federal, church |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use steuer_core::TaxCalculator;
//! use steuer_core::models::{
//!     MaritalStatus, Religion, TaxpayerProfile, federal_schedule, solothurn_schedule,
//! };
//!
//! let cantonal = solothurn_schedule();
//! let federal = federal_schedule();
//! let calculator = TaxCalculator::new(&cantonal, &federal);
//!
//! let profile = TaxpayerProfile {
//!     net_income: dec!(80000),
//!     marital_status: MaritalStatus::Single,
//!     children: 0,
//!     religion: Religion::RomanCatholic,
//!     commute_km: dec!(10),
//! };
//!
//! let assessment = calculator.calculate(&profile, 110);
//! assert_eq!(assessment.taxable_income, dec!(75220));
//! assert_eq!(assessment.total, dec!(14251.2772));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::floor_at_zero;
use crate::models::{CantonalBracket, FederalBracket, MaritalStatus, TaxpayerProfile};

// Fixed amounts from the Solothurn tariff.

fn cantonal_child_allowance() -> Decimal {
    Decimal::from(9_000)
}

fn federal_child_allowance() -> Decimal {
    Decimal::from(6_600)
}

/// Above this adjusted income the cantonal schedule short-circuits to a flat
/// top rate on the whole amount.
fn cantonal_flat_threshold() -> Decimal {
    Decimal::from(310_000)
}

/// Flat top rate, shared by the cantonal short-circuit and the federal
/// overflow branch.
fn top_rate() -> Decimal {
    Decimal::new(115, 3)
}

/// Lower bound of the first federal bracket; income below it is tax free.
fn federal_first_threshold() -> Decimal {
    Decimal::from(18_500)
}

fn cantonal_surcharge() -> Decimal {
    Decimal::new(104, 2)
}

/// Yearly health-insurance deduction by marital status.
///
/// Singles and cohabiting partners file individually and get the lower
/// amount; married couples and registered partnerships the higher one.
pub fn health_insurance_deduction(status: MaritalStatus) -> Decimal {
    match status {
        MaritalStatus::Single | MaritalStatus::Cohabiting => Decimal::from(1_700),
        MaritalStatus::Married | MaritalStatus::RegisteredPartnership => Decimal::from(3_500),
    }
}

/// Commuter deduction: round trip × 220 working days × 0.70 CHF/km,
/// capped at 7 000 CHF.
pub fn commuter_deduction(commute_km: Decimal) -> Decimal {
    let yearly = commute_km * Decimal::TWO * Decimal::from(220) * Decimal::new(7, 1);
    yearly.min(Decimal::from(7_000))
}

/// Result of a combined tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// Income after health-insurance and commuter deductions.
    pub taxable_income: Decimal,

    pub health_insurance_deduction: Decimal,

    pub commuter_deduction: Decimal,

    /// Communal tax: cantonal base × municipality Steuerfuss.
    pub communal: Decimal,

    /// Cantonal tax: cantonal base × 1.04 surcharge.
    pub cantonal: Decimal,

    /// Federal tax from the simplified tariff.
    pub federal: Decimal,

    /// Church tax: communal tax × denominational rate.
    pub church: Decimal,

    pub total: Decimal,
}

impl TaxAssessment {
    /// Pie-chart slices in display order.
    ///
    /// Zero components are nudged to 0.001 so the chart still renders a
    /// sliver for them.
    pub fn chart_slices(&self) -> [(&'static str, Decimal); 4] {
        [
            ("Gemeinde", Self::sliver(self.communal)),
            ("Kanton", Self::sliver(self.cantonal)),
            ("Bund", Self::sliver(self.federal)),
            ("Kirche", Self::sliver(self.church)),
        ]
    }

    fn sliver(value: Decimal) -> Decimal {
        if value > Decimal::ZERO {
            value
        } else {
            Decimal::new(1, 3)
        }
    }
}

/// Calculator over the cantonal and federal bracket schedules.
///
/// All methods are pure: identical inputs always produce identical amounts,
/// and no method ever returns a negative value.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    cantonal: &'a [CantonalBracket],
    federal: &'a [FederalBracket],
}

impl<'a> TaxCalculator<'a> {
    /// Creates a calculator over the given schedules.
    ///
    /// The cantonal brackets must be in walking order; the federal rows must
    /// be sorted by ascending threshold.
    pub fn new(
        cantonal: &'a [CantonalBracket],
        federal: &'a [FederalBracket],
    ) -> Self {
        Self { cantonal, federal }
    }

    /// Cantonal tax before surcharge and Steuerfuss.
    ///
    /// Deducts 9 000 CHF per child, then either applies the flat top rate to
    /// the whole adjusted income (above 310 000) or walks the bracket
    /// schedule, taxing each consumed segment at its own rate.
    pub fn cantonal_tax(
        &self,
        income: Decimal,
        children: u32,
    ) -> Decimal {
        let adjusted = floor_at_zero(income - Decimal::from(children) * cantonal_child_allowance());

        if adjusted > cantonal_flat_threshold() {
            // Deliberate simplification in the tariff: the flat rate applies
            // to the whole adjusted income, not just the slice above the
            // threshold.
            return adjusted * top_rate();
        }

        let mut remaining = adjusted;
        let mut tax = Decimal::ZERO;
        for bracket in self.cantonal {
            if remaining <= Decimal::ZERO {
                break;
            }
            let slice = remaining.min(bracket.width);
            tax += slice * bracket.rate;
            remaining -= slice;
        }
        tax
    }

    /// Federal tax from the simplified tariff.
    ///
    /// Deducts 6 600 CHF per child. Singles are taxed on the full adjusted
    /// income; every other status halves the base and doubles the resulting
    /// tax (joint-filing splitting). Above the last tariff row the flat top
    /// rate applies to the whole base.
    pub fn federal_tax(
        &self,
        income: Decimal,
        status: MaritalStatus,
        children: u32,
    ) -> Decimal {
        let adjusted = floor_at_zero(income - Decimal::from(children) * federal_child_allowance());
        let base = if status.uses_income_splitting() {
            adjusted / Decimal::TWO
        } else {
            adjusted
        };

        let mut tax = None;
        let mut previous_threshold = federal_first_threshold();
        for bracket in self.federal {
            if base <= bracket.threshold {
                tax = Some(bracket.base_tax + (base - previous_threshold) * bracket.rate);
                break;
            }
            previous_threshold = bracket.threshold;
        }
        // Past the last row the whole base is taxed flat, without
        // subtracting a prior threshold.
        let mut tax = tax.unwrap_or_else(|| base * top_rate());

        if status.uses_income_splitting() {
            tax *= Decimal::TWO;
        }
        floor_at_zero(tax)
    }

    /// Computes the full assessment for a profile and municipality
    /// Steuerfuss (integer percent).
    pub fn calculate(
        &self,
        profile: &TaxpayerProfile,
        steuerfuss_percent: i32,
    ) -> TaxAssessment {
        let health = health_insurance_deduction(profile.marital_status);
        let commuter = commuter_deduction(profile.commute_km);
        let taxable = floor_at_zero(profile.net_income - (health + commuter));

        // The cantonal base feeds both the surcharged cantonal amount and
        // the communal multiple.
        let cantonal_base = self.cantonal_tax(taxable, profile.children);
        let cantonal = cantonal_base * cantonal_surcharge();
        let communal = cantonal_base * (Decimal::from(steuerfuss_percent) / Decimal::ONE_HUNDRED);
        let church = communal * profile.religion.church_tax_rate();
        let federal = self.federal_tax(taxable, profile.marital_status, profile.children);
        let total = cantonal + communal + church + federal;

        TaxAssessment {
            taxable_income: taxable,
            health_insurance_deduction: health,
            commuter_deduction: commuter,
            communal,
            cantonal,
            federal,
            church,
            total,
        }
    }
}
