//! Full tax breakdown for a gross income and deferred contribution.
//!
//! # Breakdown Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Taxable income: gross income − deferred contribution |
//! | 2    | Federal tax on taxable income |
//! | 3    | Provincial tax on taxable income |
//! | 4    | Payroll deductions on **gross** income, one per rule |
//! | 5    | Total deductions: Steps 2 + 3 + 4 + deferred contribution |
//! | 6    | Net income: gross − Step 5 + deferred contribution |
//! | 7    | Average rate: (Steps 2 + 3 + 4) / gross income, 0 at zero income |
//! | 8    | Marginal rate: federal + provincial rate at **gross** income |
//!
//! Step 8 deliberately looks at gross income rather than taxable income; it
//! is a combined-jurisdiction indicator, not the rate on the next dollar of
//! taxable income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxComponentsCalculator;
//! use tax_core::{
//!     BracketTable, ContributionRoomRule, OptimizerSettings, TaxBracket, TaxProfile,
//! };
//!
//! let profile = TaxProfile {
//!     name: "example".to_string(),
//!     tax_year: 2023,
//!     federal_brackets: BracketTable::new(vec![TaxBracket::new(dec!(0), dec!(0.15))]).unwrap(),
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
//! let components = TaxComponentsCalculator::new(&profile)
//!     .aggregate(dec!(60000), dec!(5000))
//!     .unwrap();
//!
//! assert_eq!(components.taxable_income, dec!(55000));
//! assert_eq!(components.income_tax(), dec!(13750));
//! assert_eq!(components.net_income, dec!(46250));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::ratio_or_zero;
use crate::calculations::contribution_room::ContributionRoomCalculator;
use crate::calculations::error::{CalculationError, checked_sum, ensure_non_negative};
use crate::calculations::payroll::PayrollDeductions;
use crate::calculations::progressive::ProgressiveTax;
use crate::models::{TaxComponents, TaxProfile};

/// Aggregates income taxes and payroll deductions into [`TaxComponents`].
#[derive(Debug, Clone, Copy)]
pub struct TaxComponentsCalculator<'a> {
    profile: &'a TaxProfile,
}

impl<'a> TaxComponentsCalculator<'a> {
    /// The profile is assumed valid; [`crate::calculations::TaxEngine`]
    /// validates it once up front.
    pub fn new(profile: &'a TaxProfile) -> Self {
        Self { profile }
    }

    /// Computes the full breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if:
    /// - `gross_income` is negative
    /// - `deferred_contribution` is outside `[0, room(gross_income)]`
    /// - the summed taxes and deductions leave the decimal range
    pub fn aggregate(
        &self,
        gross_income: Decimal,
        deferred_contribution: Decimal,
    ) -> Result<TaxComponents, CalculationError> {
        ensure_non_negative("gross_income", gross_income)?;
        self.check_contribution(gross_income, deferred_contribution)?;

        // Step 1
        let taxable_income = gross_income - deferred_contribution;

        // Steps 2-3
        let federal_tax = ProgressiveTax::new(&self.profile.federal_brackets).tax_on(taxable_income);
        let provincial_tax =
            ProgressiveTax::new(&self.profile.provincial_brackets).tax_on(taxable_income);

        // Step 4
        let payroll_deductions =
            PayrollDeductions::new(&self.profile.payroll_deductions).calculate(gross_income);
        let payroll_total = checked_sum(
            "payroll deductions",
            payroll_deductions.iter().map(|d| d.amount),
        )?;

        let tax_and_payroll = checked_sum(
            "income tax and payroll deductions",
            [federal_tax, provincial_tax, payroll_total],
        )?;

        // Steps 5-6
        let total_deductions =
            checked_sum("total deductions", [tax_and_payroll, deferred_contribution])?;
        let net_income = gross_income - total_deductions + deferred_contribution;

        // Steps 7-8
        let average_tax_rate = self.average_tax_rate(tax_and_payroll, gross_income);
        let marginal_tax_rate = self.marginal_tax_rate(gross_income);

        debug!(
            gross_income = %gross_income,
            taxable_income = %taxable_income,
            federal_tax = %federal_tax,
            provincial_tax = %provincial_tax,
            payroll_total = %payroll_total,
            "aggregated tax components"
        );

        Ok(TaxComponents {
            gross_income,
            deferred_contribution,
            taxable_income,
            federal_tax,
            provincial_tax,
            payroll_deductions,
            total_deductions,
            net_income,
            average_tax_rate,
            marginal_tax_rate,
        })
    }

    /// Rejects a contribution outside `[0, room]` for this income.
    fn check_contribution(
        &self,
        gross_income: Decimal,
        deferred_contribution: Decimal,
    ) -> Result<(), CalculationError> {
        let room =
            ContributionRoomCalculator::new(&self.profile.contribution_room).compute_room(gross_income);

        if deferred_contribution < Decimal::ZERO || deferred_contribution > room {
            warn!(
                deferred_contribution = %deferred_contribution,
                room = %room,
                "deferred contribution outside available room"
            );
            return Err(CalculationError::ContributionOutOfRange {
                contribution: deferred_contribution,
                room,
            });
        }
        Ok(())
    }

    fn average_tax_rate(
        &self,
        tax_and_payroll: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income.is_zero() {
            warn!("gross income is zero; average tax rate reported as 0");
        }
        ratio_or_zero(tax_and_payroll, gross_income)
    }

    /// Sum of each table's marginal rate at gross income.
    fn marginal_tax_rate(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        ProgressiveTax::new(&self.profile.federal_brackets).marginal_rate_at(gross_income)
            + ProgressiveTax::new(&self.profile.provincial_brackets).marginal_rate_at(gross_income)
    }
}
