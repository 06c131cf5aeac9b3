use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount withheld for one payroll [`crate::DeductionRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDeductionAmount {
    pub name: String,
    pub amount: Decimal,
}

/// Full tax breakdown for one gross income and deferred contribution.
///
/// Built fresh by the aggregator on every call; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponents {
    pub gross_income: Decimal,
    pub deferred_contribution: Decimal,

    /// Gross income less the deferred contribution.
    pub taxable_income: Decimal,

    pub federal_tax: Decimal,
    pub provincial_tax: Decimal,

    /// One entry per configured deduction rule, in profile order. Computed
    /// on gross income.
    pub payroll_deductions: Vec<PayrollDeductionAmount>,

    /// Income taxes + payroll deductions + deferred contribution.
    pub total_deductions: Decimal,

    /// Gross income minus everything lost to tax. The deferred contribution
    /// stays with the filer and is not subtracted.
    pub net_income: Decimal,

    /// (income taxes + payroll deductions) / gross income, or 0 at zero income.
    pub average_tax_rate: Decimal,

    /// Combined federal + provincial marginal rate, evaluated on gross income.
    pub marginal_tax_rate: Decimal,
}

impl TaxComponents {
    /// Federal plus provincial income tax.
    pub fn income_tax(&self) -> Decimal {
        self.federal_tax + self.provincial_tax
    }

    pub fn total_payroll_deductions(&self) -> Decimal {
        self.payroll_deductions.iter().map(|d| d.amount).sum()
    }

    /// Looks up a payroll deduction by rule name.
    pub fn payroll_deduction(
        &self,
        name: &str,
    ) -> Option<Decimal> {
        self.payroll_deductions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.amount)
    }
}
