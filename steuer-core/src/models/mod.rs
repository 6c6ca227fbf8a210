mod municipality;
mod person;
mod tax_bracket;

pub use municipality::{LookupError, MunicipalityTable};
pub use person::{MaritalStatus, Religion, TaxpayerProfile};
pub use tax_bracket::{CantonalBracket, FederalBracket, federal_schedule, solothurn_schedule};
