pub mod calculations;
pub mod input;
pub mod models;

pub use calculations::{TaxAssessment, TaxCalculator};
pub use models::*;
