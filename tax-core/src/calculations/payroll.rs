//! Statutory payroll deductions.
//!
//! Each [`DeductionRule`] is applied to **gross** income on its own:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Counted income: gross income, limited to `ceiling_base` when set |
//! | 2    | Contribution base: counted income − `exemption` |
//! | 3    | If the base is zero or less, nothing is owed |
//! | 4    | Contribution: base × `rate`, limited to `cap` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::DeductionRule;
//! use tax_core::calculations::payroll::compute_deduction;
//!
//! let pension = DeductionRule {
//!     name: "pension".to_string(),
//!     rate: dec!(0.06),
//!     cap: dec!(4000),
//!     exemption: dec!(3000),
//!     ceiling_base: Some(dec!(70000)),
//! };
//!
//! // min((70,000 − 3,000) × 6%, 4,000) = min(4,020, 4,000)
//! assert_eq!(compute_deduction(dec!(80000), &pension), dec!(4000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{DeductionRule, PayrollDeductionAmount};

/// Contribution owed under `rule` for `gross_income`.
pub fn compute_deduction(
    gross_income: Decimal,
    rule: &DeductionRule,
) -> Decimal {
    let counted = rule
        .ceiling_base
        .map_or(gross_income, |ceiling| gross_income.min(ceiling));
    let base = counted - rule.exemption;

    if base <= Decimal::ZERO {
        debug!(
            rule = %rule.name,
            gross_income = %gross_income,
            exemption = %rule.exemption,
            "contribution base is zero or negative; no deduction"
        );
        return Decimal::ZERO;
    }

    (base * rule.rate).min(rule.cap)
}

/// Applies a list of deduction rules to one gross income.
#[derive(Debug, Clone, Copy)]
pub struct PayrollDeductions<'a> {
    rules: &'a [DeductionRule],
}

impl<'a> PayrollDeductions<'a> {
    pub fn new(rules: &'a [DeductionRule]) -> Self {
        Self { rules }
    }

    /// One amount per rule, in rule order.
    pub fn calculate(
        &self,
        gross_income: Decimal,
    ) -> Vec<PayrollDeductionAmount> {
        self.rules
            .iter()
            .map(|rule| PayrollDeductionAmount {
                name: rule.name.clone(),
                amount: compute_deduction(gross_income, rule),
            })
            .collect()
    }
}
