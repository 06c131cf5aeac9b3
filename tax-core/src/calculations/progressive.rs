//! Progressive (marginal-bracket) income tax.
//!
//! Tax is computed by walking a [`BracketTable`] from its highest threshold
//! down: each bracket taxes the part of the remaining amount that lies above
//! its threshold, and the remaining amount drops to that threshold. The
//! result equals `Σ rate_i × (min(amount, threshold_{i+1}) − threshold_i)`
//! over every bracket the amount reaches.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::progressive::compute_tax;
//! use tax_core::{BracketTable, TaxBracket};
//!
//! let table = BracketTable::new(vec![
//!     TaxBracket::new(dec!(0), dec!(0.15)),
//!     TaxBracket::new(dec!(50000), dec!(0.20)),
//!     TaxBracket::new(dec!(100000), dec!(0.26)),
//! ])
//! .unwrap();
//!
//! // 50,000 × 15% + 50,000 × 20% + 20,000 × 26%
//! assert_eq!(compute_tax(dec!(120000), &table), dec!(22700));
//! ```

use rust_decimal::Decimal;

use crate::models::BracketTable;

/// Tax owed on `amount` under `table`. Zero for `amount <= 0`.
pub fn compute_tax(
    amount: Decimal,
    table: &BracketTable,
) -> Decimal {
    ProgressiveTax::new(table).tax_on(amount)
}

/// Rate of the highest bracket whose threshold is strictly below `income`.
pub fn marginal_rate(
    income: Decimal,
    table: &BracketTable,
) -> Decimal {
    ProgressiveTax::new(table).marginal_rate_at(income)
}

/// Progressive tax calculator bound to one bracket table.
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTax<'a> {
    table: &'a BracketTable,
}

impl<'a> ProgressiveTax<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Computes tax on `amount`.
    ///
    /// The top bracket has no upper bound. Amounts at or below zero owe
    /// nothing; callers reject negative incomes before reaching here.
    pub fn tax_on(
        &self,
        amount: Decimal,
    ) -> Decimal {
        if amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let (tax, _) = self.table.brackets().iter().rev().fold(
            (Decimal::ZERO, amount),
            |(tax, remaining), bracket| {
                if remaining > bracket.threshold {
                    (
                        tax + (remaining - bracket.threshold) * bracket.rate,
                        bracket.threshold,
                    )
                } else {
                    (tax, remaining)
                }
            },
        );

        tax
    }

    /// Rate that applies to the next unit of income above `income`.
    ///
    /// Returns zero when no threshold lies strictly below `income`, which
    /// only happens at zero income.
    pub fn marginal_rate_at(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.table
            .brackets()
            .iter()
            .take_while(|bracket| income > bracket.threshold)
            .last()
            .map_or(Decimal::ZERO, |bracket| bracket.rate)
    }
}
