use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of grid points a profile may ask the search to evaluate.
pub const MAX_GRID_POINTS: u32 = 1000;

/// Errors raised by [`OptimizerSettings::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptimizerSettingsError {
    #[error("high-income threshold must be non-negative, got {0}")]
    NegativeThreshold(Decimal),

    #[error("grid step must be positive, got {0}")]
    NonPositiveGridStep(Decimal),

    #[error("grid bounds must satisfy 0 <= start <= end <= 1, got {start}..={end}")]
    InvalidGridBounds { start: Decimal, end: Decimal },

    #[error("grid would visit {points} points; at most {max} are allowed", max = MAX_GRID_POINTS)]
    GridTooLarge { points: Decimal },

    #[error("deferral fraction must be between 0 and 1, got {0}")]
    DeferralFractionOutOfRange(Decimal),

    #[error("gross-up multiplier must be positive, got {0}")]
    NonPositiveGrossUp(Decimal),

    #[error("secondary tax factor must be between 0 and 1, got {0}")]
    SecondaryTaxFactorOutOfRange(Decimal),
}

/// Parameters of the income-distribution grid search.
///
/// The grid is expressed as primary-income fractions of the total income
/// target; `grid_start..=grid_end` is walked in `grid_step` increments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Optimization only runs for totals strictly above this amount.
    pub high_income_threshold: Decimal,

    pub grid_start: Decimal,
    pub grid_end: Decimal,
    pub grid_step: Decimal,

    /// Share of primary income put toward the deferred contribution,
    /// limited by the contribution room.
    pub deferral_fraction: Decimal,

    /// Multiplier applied to secondary income before it is taxed.
    pub gross_up_multiplier: Decimal,

    /// Multiplier applied to the tax on grossed-up secondary income to
    /// approximate the preferential credit.
    pub secondary_tax_factor: Decimal,
}

impl OptimizerSettings {
    /// # Errors
    ///
    /// Returns [`OptimizerSettingsError`] for the first out-of-range value.
    pub fn validate(&self) -> Result<(), OptimizerSettingsError> {
        if self.high_income_threshold < Decimal::ZERO {
            return Err(OptimizerSettingsError::NegativeThreshold(
                self.high_income_threshold,
            ));
        }
        if self.grid_step <= Decimal::ZERO {
            return Err(OptimizerSettingsError::NonPositiveGridStep(self.grid_step));
        }
        if self.grid_start < Decimal::ZERO
            || self.grid_start > self.grid_end
            || self.grid_end > Decimal::ONE
        {
            return Err(OptimizerSettingsError::InvalidGridBounds {
                start: self.grid_start,
                end: self.grid_end,
            });
        }
        let points = self.grid_points();
        if points > Decimal::from(MAX_GRID_POINTS) {
            return Err(OptimizerSettingsError::GridTooLarge { points });
        }
        if self.deferral_fraction < Decimal::ZERO || self.deferral_fraction > Decimal::ONE {
            return Err(OptimizerSettingsError::DeferralFractionOutOfRange(
                self.deferral_fraction,
            ));
        }
        if self.gross_up_multiplier <= Decimal::ZERO {
            return Err(OptimizerSettingsError::NonPositiveGrossUp(
                self.gross_up_multiplier,
            ));
        }
        if self.secondary_tax_factor < Decimal::ZERO || self.secondary_tax_factor > Decimal::ONE {
            return Err(OptimizerSettingsError::SecondaryTaxFactorOutOfRange(
                self.secondary_tax_factor,
            ));
        }
        Ok(())
    }

    /// Number of points `grid()` yields for a positive step and ordered
    /// bounds.
    fn grid_points(&self) -> Decimal {
        ((self.grid_end - self.grid_start) / self.grid_step).floor() + Decimal::ONE
    }

    /// Primary-income fractions visited by the search, in ascending order.
    ///
    /// Decimal arithmetic keeps the end point exact, so `0.50..=0.80` by
    /// `0.05` yields seven points. Yields nothing for a non-positive step.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::OptimizerSettings;
    ///
    /// let settings = OptimizerSettings {
    ///     high_income_threshold: dec!(100000),
    ///     grid_start: dec!(0.50),
    ///     grid_end: dec!(0.80),
    ///     grid_step: dec!(0.05),
    ///     deferral_fraction: dec!(0.12),
    ///     gross_up_multiplier: dec!(1.38),
    ///     secondary_tax_factor: dec!(0.80),
    /// };
    ///
    /// let grid: Vec<_> = settings.grid().collect();
    /// assert_eq!(grid.len(), 7);
    /// assert_eq!(grid[0], dec!(0.50));
    /// assert_eq!(grid[6], dec!(0.80));
    /// ```
    pub fn grid(&self) -> impl Iterator<Item = Decimal> + use<> {
        let (start, end, step) = (self.grid_start, self.grid_end, self.grid_step);

        std::iter::successors((step > Decimal::ZERO).then_some(start), move |fraction| {
            fraction.checked_add(step)
        })
        .take_while(move |fraction| *fraction <= end)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_settings() -> OptimizerSettings {
        OptimizerSettings {
            high_income_threshold: dec!(100000),
            grid_start: dec!(0.50),
            grid_end: dec!(0.80),
            grid_step: dec!(0.05),
            deferral_fraction: dec!(0.12),
            gross_up_multiplier: dec!(1.38),
            secondary_tax_factor: dec!(0.80),
        }
    }

    #[test]
    fn validate_accepts_reference_settings() {
        assert_eq!(test_settings().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_step() {
        let settings = OptimizerSettings {
            grid_step: dec!(0),
            ..test_settings()
        };

        assert_eq!(
            settings.validate(),
            Err(OptimizerSettingsError::NonPositiveGridStep(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let settings = OptimizerSettings {
            grid_start: dec!(0.90),
            grid_end: dec!(0.50),
            ..test_settings()
        };

        assert_eq!(
            settings.validate(),
            Err(OptimizerSettingsError::InvalidGridBounds {
                start: dec!(0.90),
                end: dec!(0.50),
            })
        );
    }

    #[test]
    fn validate_rejects_end_above_one() {
        let settings = OptimizerSettings {
            grid_end: dec!(1.10),
            ..test_settings()
        };

        assert!(matches!(
            settings.validate(),
            Err(OptimizerSettingsError::InvalidGridBounds { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_gross_up() {
        let settings = OptimizerSettings {
            gross_up_multiplier: dec!(0),
            ..test_settings()
        };

        assert_eq!(
            settings.validate(),
            Err(OptimizerSettingsError::NonPositiveGrossUp(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_secondary_factor_above_one() {
        let settings = OptimizerSettings {
            secondary_tax_factor: dec!(1.5),
            ..test_settings()
        };

        assert_eq!(
            settings.validate(),
            Err(OptimizerSettingsError::SecondaryTaxFactorOutOfRange(dec!(1.5)))
        );
    }

    #[test]
    fn validate_rejects_oversized_grid() {
        let settings = OptimizerSettings {
            grid_step: dec!(0.0000001),
            ..test_settings()
        };

        assert_eq!(
            settings.validate(),
            Err(OptimizerSettingsError::GridTooLarge {
                points: dec!(3000001),
            })
        );
    }

    #[test]
    fn validate_accepts_grid_at_point_limit() {
        let settings = OptimizerSettings {
            grid_start: dec!(0),
            grid_end: dec!(0.999),
            grid_step: dec!(0.001),
            ..test_settings()
        };

        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.grid().count(), 1000);
    }

    #[test]
    fn grid_walks_bounds_inclusively() {
        let grid: Vec<Decimal> = test_settings().grid().collect();

        assert_eq!(
            grid,
            vec![
                dec!(0.50),
                dec!(0.55),
                dec!(0.60),
                dec!(0.65),
                dec!(0.70),
                dec!(0.75),
                dec!(0.80),
            ]
        );
    }

    #[test]
    fn grid_with_single_point() {
        let settings = OptimizerSettings {
            grid_start: dec!(0.60),
            grid_end: dec!(0.60),
            ..test_settings()
        };

        assert_eq!(settings.grid().collect::<Vec<_>>(), vec![dec!(0.60)]);
    }

    #[test]
    fn grid_stops_before_overshooting_end() {
        let settings = OptimizerSettings {
            grid_start: dec!(0.50),
            grid_end: dec!(0.62),
            grid_step: dec!(0.05),
            ..test_settings()
        };

        assert_eq!(
            settings.grid().collect::<Vec<_>>(),
            vec![dec!(0.50), dec!(0.55), dec!(0.60)]
        );
    }

    #[test]
    fn grid_is_empty_for_non_positive_step() {
        let settings = OptimizerSettings {
            grid_step: dec!(-0.05),
            ..test_settings()
        };

        assert_eq!(settings.grid().next(), None);
    }
}
