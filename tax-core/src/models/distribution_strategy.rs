use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A composition of a fixed total income between employment-type (primary)
/// and preferentially-taxed (secondary) income, with a deferred contribution
/// taken from the primary share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionStrategy {
    pub primary_income: Decimal,
    pub secondary_income: Decimal,
    pub deferred_contribution: Decimal,
    pub estimated_tax: Decimal,

    /// Baseline tax minus `estimated_tax`; never negative.
    pub tax_savings: Decimal,
}

impl DistributionStrategy {
    /// All income as primary income, nothing deferred.
    pub fn baseline(
        total_income: Decimal,
        estimated_tax: Decimal,
    ) -> Self {
        Self {
            primary_income: total_income,
            secondary_income: Decimal::ZERO,
            deferred_contribution: Decimal::ZERO,
            estimated_tax,
            tax_savings: Decimal::ZERO,
        }
    }

    pub fn total_income(&self) -> Decimal {
        self.primary_income + self.secondary_income
    }
}
