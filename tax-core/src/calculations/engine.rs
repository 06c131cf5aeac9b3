//! Facade over the calculators for one validated [`TaxProfile`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxEngine;
//! use tax_core::{
//!     BracketTable, ContributionRoomRule, Jurisdiction, OptimizerSettings, TaxBracket,
//!     TaxProfile,
//! };
//!
//! let profile = TaxProfile {
//!     name: "example".to_string(),
//!     tax_year: 2023,
//!     federal_brackets: BracketTable::new(vec![
//!         TaxBracket::new(dec!(0), dec!(0.15)),
//!         TaxBracket::new(dec!(50000), dec!(0.20)),
//!         TaxBracket::new(dec!(100000), dec!(0.26)),
//!     ])
//!     .unwrap(),
//!     provincial_brackets: BracketTable::new(vec![TaxBracket::new(dec!(0), dec!(0.10))]).unwrap(),
//!     payroll_deductions: vec![],
//!     contribution_room: ContributionRoomRule {
//!         percentage_rate: dec!(0.18),
//!         annual_cap: dec!(30780),
//!     },
//!     optimizer: OptimizerSettings {
//!         high_income_threshold: dec!(100000),
//!         grid_start: dec!(0.50),
//!         grid_end: dec!(0.80),
//!         grid_step: dec!(0.05),
//!         deferral_fraction: dec!(0.12),
//!         gross_up_multiplier: dec!(1.38),
//!         secondary_tax_factor: dec!(0.80),
//!     },
//!     tips: vec![],
//! };
//!
//! let engine = TaxEngine::new(profile).unwrap();
//!
//! assert_eq!(engine.compute_tax(dec!(120000), Jurisdiction::Federal).unwrap(), dec!(22700));
//! assert_eq!(engine.compute_room(dec!(200000)).unwrap(), dec!(30780));
//! assert_eq!(engine.optimize(dec!(90000)).unwrap().tax_savings, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::components::TaxComponentsCalculator;
use crate::calculations::contribution_room::ContributionRoomCalculator;
use crate::calculations::error::{CalculationError, ensure_non_negative};
use crate::calculations::optimizer::DistributionOptimizer;
use crate::calculations::progressive::ProgressiveTax;
use crate::calculations::tips::optimization_tips;
use crate::models::{DistributionStrategy, Jurisdiction, TaxComponents, TaxProfile};

/// Owns a validated profile and exposes the engine's operations.
///
/// Immutable after construction, so one engine can serve concurrent
/// requests (e.g. behind an `Arc`).
#[derive(Debug, Clone)]
pub struct TaxEngine {
    profile: TaxProfile,
}

impl TaxEngine {
    /// Validates `profile` and builds an engine around it.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidProfile`] if any rule in the
    /// profile is out of range.
    pub fn new(profile: TaxProfile) -> Result<Self, CalculationError> {
        profile.validate()?;
        debug!(
            profile = %profile.name,
            tax_year = profile.tax_year,
            deductions = profile.payroll_deductions.len(),
            "tax engine ready"
        );
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &TaxProfile {
        &self.profile
    }

    /// Progressive tax on `amount` under one jurisdiction's brackets.
    pub fn compute_tax(
        &self,
        amount: Decimal,
        jurisdiction: Jurisdiction,
    ) -> Result<Decimal, CalculationError> {
        ensure_non_negative("amount", amount)?;
        Ok(ProgressiveTax::new(self.profile.brackets(jurisdiction)).tax_on(amount))
    }

    /// Full breakdown for `gross_income` with `deferred_contribution` set aside.
    pub fn aggregate(
        &self,
        gross_income: Decimal,
        deferred_contribution: Decimal,
    ) -> Result<TaxComponents, CalculationError> {
        TaxComponentsCalculator::new(&self.profile).aggregate(gross_income, deferred_contribution)
    }

    /// Deferred-contribution room earned by `prior_income`.
    pub fn compute_room(
        &self,
        prior_income: Decimal,
    ) -> Result<Decimal, CalculationError> {
        ensure_non_negative("prior_income", prior_income)?;
        Ok(ContributionRoomCalculator::new(&self.profile.contribution_room).compute_room(prior_income))
    }

    /// Lowest-tax income composition for `total_income`.
    pub fn optimize(
        &self,
        total_income: Decimal,
    ) -> Result<DistributionStrategy, CalculationError> {
        DistributionOptimizer::new(&self.profile).optimize(total_income)
    }

    /// Planning tips that apply at `income`.
    pub fn tips(
        &self,
        income: Decimal,
    ) -> Result<Vec<String>, CalculationError> {
        ensure_non_negative("income", income)?;
        Ok(optimization_tips(income, &self.profile.tips))
    }
}
