use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a bracket schedule violates the table invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// A table needs at least one bracket.
    #[error("bracket table is empty")]
    Empty,

    /// The lowest bracket must start at zero.
    #[error("first bracket threshold must be 0, got {0}")]
    FirstThresholdNotZero(Decimal),

    /// Thresholds must strictly increase from one bracket to the next.
    #[error("bracket thresholds must strictly increase, got {previous} then {next}")]
    ThresholdsNotIncreasing { previous: Decimal, next: Decimal },

    /// Every marginal rate must be a fraction in [0, 1].
    #[error("bracket rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    /// Marginal rates must not decrease as thresholds rise.
    #[error("bracket rates must not regress, got {previous} then {next}")]
    RegressingRate { previous: Decimal, next: Decimal },
}

/// A single `(threshold, rate)` pair: income above `threshold` is taxed at
/// `rate` until the next bracket begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// Ordered, validated marginal-rate schedule for one jurisdiction.
///
/// A table can only be obtained through [`BracketTable::new`] (or serde,
/// which routes through the same checks), so every instance satisfies:
///
/// - at least one bracket, the first starting at 0
/// - strictly increasing thresholds
/// - rates in [0, 1] that never decrease
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{BracketTable, TaxBracket};
///
/// let table = BracketTable::new(vec![
///     TaxBracket::new(dec!(0), dec!(0.15)),
///     TaxBracket::new(dec!(50000), dec!(0.20)),
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.top_rate(), dec!(0.20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates `brackets` and wraps them in an immutable table.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] describing the first invariant the
    /// schedule breaks.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        let first = brackets.first().ok_or(BracketTableError::Empty)?;
        if first.threshold != Decimal::ZERO {
            return Err(BracketTableError::FirstThresholdNotZero(first.threshold));
        }

        for bracket in &brackets {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange(bracket.rate));
            }
        }

        for pair in brackets.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.threshold <= lower.threshold {
                return Err(BracketTableError::ThresholdsNotIncreasing {
                    previous: lower.threshold,
                    next: upper.threshold,
                });
            }
            if upper.rate < lower.rate {
                return Err(BracketTableError::RegressingRate {
                    previous: lower.rate,
                    next: upper.rate,
                });
            }
        }

        Ok(Self { brackets })
    }

    /// Brackets in ascending threshold order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Whether the table holds no brackets. Never true for a table built
    /// through [`BracketTable::new`].
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Rate applied to all income above the highest threshold.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map_or(Decimal::ZERO, |bracket| bracket.rate)
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = BracketTableError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        threshold: Decimal,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket::new(threshold, rate)
    }

    #[test]
    fn new_accepts_valid_schedule() {
        let table = BracketTable::new(vec![
            bracket(dec!(0), dec!(0.15)),
            bracket(dec!(50000), dec!(0.20)),
            bracket(dec!(100000), dec!(0.26)),
        ])
        .expect("valid table");

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.brackets()[1].threshold, dec!(50000));
        assert_eq!(table.top_rate(), dec!(0.26));
    }

    #[test]
    fn new_accepts_flat_rates_across_brackets() {
        let result = BracketTable::new(vec![
            bracket(dec!(0), dec!(0.15)),
            bracket(dec!(40000), dec!(0.15)),
        ]);

        assert!(result.is_ok());
    }

    #[test]
    fn new_rejects_empty_schedule() {
        assert_eq!(BracketTable::new(vec![]), Err(BracketTableError::Empty));
    }

    #[test]
    fn new_rejects_nonzero_first_threshold() {
        let result = BracketTable::new(vec![bracket(dec!(1000), dec!(0.15))]);

        assert_eq!(
            result,
            Err(BracketTableError::FirstThresholdNotZero(dec!(1000)))
        );
    }

    #[test]
    fn new_rejects_duplicate_thresholds() {
        let result = BracketTable::new(vec![
            bracket(dec!(0), dec!(0.15)),
            bracket(dec!(50000), dec!(0.20)),
            bracket(dec!(50000), dec!(0.26)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::ThresholdsNotIncreasing {
                previous: dec!(50000),
                next: dec!(50000),
            })
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let result = BracketTable::new(vec![bracket(dec!(0), dec!(1.5))]);

        assert_eq!(result, Err(BracketTableError::RateOutOfRange(dec!(1.5))));
    }

    #[test]
    fn new_rejects_negative_rate() {
        let result = BracketTable::new(vec![bracket(dec!(0), dec!(-0.1))]);

        assert_eq!(result, Err(BracketTableError::RateOutOfRange(dec!(-0.1))));
    }

    #[test]
    fn new_rejects_regressing_rate() {
        let result = BracketTable::new(vec![
            bracket(dec!(0), dec!(0.20)),
            bracket(dec!(50000), dec!(0.15)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::RegressingRate {
                previous: dec!(0.20),
                next: dec!(0.15),
            })
        );
    }

    #[test]
    fn try_from_routes_through_validation() {
        let result = BracketTable::try_from(vec![bracket(dec!(5), dec!(0.1))]);

        assert_eq!(result, Err(BracketTableError::FirstThresholdNotZero(dec!(5))));
    }
}
