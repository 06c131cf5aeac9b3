//! Income-distribution search.
//!
//! Splits a fixed total income between primary (employment) income and
//! secondary (dividend-style) income, defers part of the primary share, and
//! keeps the split with the lowest estimated income tax.
//!
//! # Search Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Baseline: all income primary, nothing deferred, tax on the full total |
//! | 2    | At or below the high-income threshold, return the baseline |
//! | 3    | For each grid fraction `f`: primary = total × f, secondary = the rest |
//! | 4    | Deferred = min(room(primary), primary × deferral fraction) |
//! | 5    | Primary tax: federal + provincial on primary − deferred |
//! | 6    | Secondary tax: federal + provincial on secondary × gross-up, × secondary tax factor |
//! | 7    | Keep the candidate with strictly lower tax; ties keep the earlier one |
//! | 8    | Savings: baseline tax − best tax |
//!
//! The grid is coarse and fixed by [`OptimizerSettings`]; this is not a
//! continuous optimizer.
//!
//! [`OptimizerSettings`]: crate::OptimizerSettings

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::contribution_room::ContributionRoomCalculator;
use crate::calculations::error::{CalculationError, checked_sum, ensure_non_negative, overflow};
use crate::calculations::progressive::ProgressiveTax;
use crate::models::{DistributionStrategy, TaxProfile};

#[derive(Debug, Clone, Copy)]
pub struct DistributionOptimizer<'a> {
    profile: &'a TaxProfile,
}

impl<'a> DistributionOptimizer<'a> {
    pub fn new(profile: &'a TaxProfile) -> Self {
        Self { profile }
    }

    /// Finds the lowest-tax composition of `total_income` on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NegativeAmount`] for a negative total and
    /// [`CalculationError::Overflow`] when a grossed-up amount or a tax sum
    /// leaves the decimal range.
    pub fn optimize(
        &self,
        total_income: Decimal,
    ) -> Result<DistributionStrategy, CalculationError> {
        ensure_non_negative("total_income", total_income)?;

        let settings = &self.profile.optimizer;
        let baseline_tax = self.combined_tax(total_income)?;
        let baseline = DistributionStrategy::baseline(total_income, baseline_tax);

        if total_income <= settings.high_income_threshold {
            debug!(
                total_income = %total_income,
                threshold = %settings.high_income_threshold,
                "income at or below optimization threshold; keeping baseline"
            );
            return Ok(baseline);
        }

        let best = settings.grid().try_fold(baseline, |best, fraction| {
            let candidate = self.candidate(total_income, fraction)?;
            Ok::<_, CalculationError>(if candidate.estimated_tax < best.estimated_tax {
                candidate
            } else {
                best
            })
        })?;

        let tax_savings = baseline_tax - best.estimated_tax;
        debug!(
            total_income = %total_income,
            primary_income = %best.primary_income,
            baseline_tax = %baseline_tax,
            best_tax = %best.estimated_tax,
            tax_savings = %tax_savings,
            "distribution search complete"
        );

        Ok(DistributionStrategy {
            tax_savings,
            ..best
        })
    }

    /// Evaluates one grid point (Steps 3-6).
    ///
    /// Fractions, the deferral share and the secondary tax factor are all
    /// within `[0, 1]`; only the gross-up and the tax sums can overflow.
    fn candidate(
        &self,
        total_income: Decimal,
        primary_fraction: Decimal,
    ) -> Result<DistributionStrategy, CalculationError> {
        let settings = &self.profile.optimizer;

        let primary_income = total_income * primary_fraction;
        let secondary_income = total_income - primary_income;

        let room =
            ContributionRoomCalculator::new(&self.profile.contribution_room).compute_room(primary_income);
        let deferred_contribution = room.min(primary_income * settings.deferral_fraction);

        let primary_tax = self.combined_tax(primary_income - deferred_contribution)?;
        let grossed_up = secondary_income
            .checked_mul(settings.gross_up_multiplier)
            .ok_or_else(|| overflow("secondary income gross-up"))?;
        let secondary_tax = self.combined_tax(grossed_up)? * settings.secondary_tax_factor;
        let estimated_tax = checked_sum("estimated tax", [primary_tax, secondary_tax])?;

        debug!(
            fraction = %primary_fraction,
            primary_income = %primary_income,
            deferred_contribution = %deferred_contribution,
            estimated_tax = %estimated_tax,
            "evaluated distribution candidate"
        );

        Ok(DistributionStrategy {
            primary_income,
            secondary_income,
            deferred_contribution,
            estimated_tax,
            tax_savings: Decimal::ZERO,
        })
    }

    /// Federal plus provincial tax on `amount`.
    fn combined_tax(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, CalculationError> {
        checked_sum(
            "combined income tax",
            [
                ProgressiveTax::new(&self.profile.federal_brackets).tax_on(amount),
                ProgressiveTax::new(&self.profile.provincial_brackets).tax_on(amount),
            ],
        )
    }
}
