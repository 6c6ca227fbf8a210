//! Tax calculation logic for the cantonal, federal, communal, and church
//! levels, driven by the progressive bracket schedules in [`crate::models`].

pub mod common;
mod tax_calculator;

pub use tax_calculator::{
    TaxAssessment, TaxCalculator, commuter_deduction, health_insurance_deduction,
};
