use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`DeductionRule::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionRuleError {
    #[error("deduction rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    #[error("deduction cap must be non-negative, got {0}")]
    NegativeCap(Decimal),

    #[error("deduction exemption must be non-negative, got {0}")]
    NegativeExemption(Decimal),

    #[error("ceiling base {ceiling} is below the exemption {exemption}")]
    CeilingBelowExemption { ceiling: Decimal, exemption: Decimal },
}

/// A statutory, rate-based payroll deduction with an annual cap.
///
/// Models pension contributions (earnings floor and ceiling) as well as
/// insurance-style premiums (a plain capped percentage of gross income).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Label carried into [`crate::PayrollDeductionAmount`] (e.g. `"RRQ"`).
    pub name: String,

    /// Contribution rate applied to the contribution base.
    pub rate: Decimal,

    /// Maximum annual contribution.
    pub cap: Decimal,

    /// Amount excluded from the base before the rate applies.
    #[serde(default)]
    pub exemption: Decimal,

    /// Maximum income counted toward the base, if any.
    #[serde(default)]
    pub ceiling_base: Option<Decimal>,
}

impl DeductionRule {
    /// Checks the rule's parameters against their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionRuleError`] if:
    /// - `rate` is not in [0, 1]
    /// - `cap` or `exemption` is negative
    /// - `ceiling_base` is set below `exemption`
    pub fn validate(&self) -> Result<(), DeductionRuleError> {
        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE {
            return Err(DeductionRuleError::RateOutOfRange(self.rate));
        }
        if self.cap < Decimal::ZERO {
            return Err(DeductionRuleError::NegativeCap(self.cap));
        }
        if self.exemption < Decimal::ZERO {
            return Err(DeductionRuleError::NegativeExemption(self.exemption));
        }
        if let Some(ceiling) = self.ceiling_base {
            if ceiling < self.exemption {
                return Err(DeductionRuleError::CeilingBelowExemption {
                    ceiling,
                    exemption: self.exemption,
                });
            }
        }
        Ok(())
    }
}
