pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, TaxEngine};
pub use models::*;
