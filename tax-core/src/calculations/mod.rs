//! Tax calculation modules.
//!
//! Every calculator is a pure function of its inputs and the
//! [`crate::TaxProfile`] it borrows. [`TaxEngine`] bundles them behind one
//! validated profile.

pub mod common;
pub mod components;
pub mod contribution_room;
pub mod engine;
pub mod error;
pub mod optimizer;
pub mod payroll;
pub mod progressive;
pub mod tips;

pub use components::TaxComponentsCalculator;
pub use contribution_room::ContributionRoomCalculator;
pub use engine::TaxEngine;
pub use error::CalculationError;
pub use optimizer::DistributionOptimizer;
pub use payroll::{PayrollDeductions, compute_deduction};
pub use progressive::{ProgressiveTax, compute_tax, marginal_rate};
pub use tips::optimization_tips;
