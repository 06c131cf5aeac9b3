use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ProfileError;

/// Invalid input rejected at a calculation boundary.
///
/// Calculators check their inputs before computing anything; a call either
/// returns a complete result or one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// An income or amount argument was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The deferred contribution is outside `[0, room]`.
    #[error("deferred contribution {contribution} is outside the allowed range [0, {room}]")]
    ContributionOutOfRange { contribution: Decimal, room: Decimal },

    /// An intermediate amount exceeded the range of [`Decimal`].
    #[error("amount overflowed while computing {operation}")]
    Overflow { operation: &'static str },

    /// The profile handed to the engine breaks one of its rules.
    #[error("invalid tax profile: {0}")]
    InvalidProfile(#[from] ProfileError),
}

/// Rejects a negative `value` for the argument named `field`.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), CalculationError> {
    if value < Decimal::ZERO {
        tracing::warn!(field, value = %value, "rejecting negative amount");
        return Err(CalculationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Adds `terms`, failing with [`CalculationError::Overflow`] instead of
/// panicking when the total leaves the [`Decimal`] range.
pub(crate) fn checked_sum(
    operation: &'static str,
    terms: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, CalculationError> {
    terms
        .into_iter()
        .try_fold(Decimal::ZERO, |total, term| total.checked_add(term))
        .ok_or_else(|| overflow(operation))
}

pub(crate) fn overflow(operation: &'static str) -> CalculationError {
    tracing::warn!(operation, "decimal overflow");
    CalculationError::Overflow { operation }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ensure_non_negative_passes_zero_through() {
        assert_eq!(ensure_non_negative("income", dec!(0)), Ok(()));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(
            ensure_non_negative("income", dec!(-0.01)),
            Err(CalculationError::NegativeAmount {
                field: "income",
                value: dec!(-0.01),
            })
        );
    }

    #[test]
    fn checked_sum_adds_terms() {
        assert_eq!(
            checked_sum("total", [dec!(1.5), dec!(2.25), dec!(0)]),
            Ok(dec!(3.75))
        );
    }

    #[test]
    fn checked_sum_reports_overflow() {
        assert_eq!(
            checked_sum("total", [Decimal::MAX, dec!(1)]),
            Err(CalculationError::Overflow { operation: "total" })
        );
    }

    #[test]
    fn error_message_names_field() {
        let err = CalculationError::NegativeAmount {
            field: "gross_income",
            value: dec!(-5),
        };

        assert_eq!(err.to_string(), "gross_income must be non-negative, got -5");
    }
}
