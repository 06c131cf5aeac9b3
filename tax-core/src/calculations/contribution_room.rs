//! Deferred-contribution room.
//!
//! Room is `min(prior_income × percentage_rate, annual_cap)`: it grows with
//! income until the dollar cap, then stays flat.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::ContributionRoomRule;
//! use tax_core::calculations::contribution_room::ContributionRoomCalculator;
//!
//! let rule = ContributionRoomRule {
//!     percentage_rate: dec!(0.18),
//!     annual_cap: dec!(30780),
//! };
//! let calculator = ContributionRoomCalculator::new(&rule);
//!
//! assert_eq!(calculator.compute_room(dec!(100000)), dec!(18000));
//! assert_eq!(calculator.compute_room(dec!(200000)), dec!(30780));
//! ```

use rust_decimal::Decimal;

use crate::models::ContributionRoomRule;

#[derive(Debug, Clone, Copy)]
pub struct ContributionRoomCalculator<'a> {
    rule: &'a ContributionRoomRule,
}

impl<'a> ContributionRoomCalculator<'a> {
    pub fn new(rule: &'a ContributionRoomRule) -> Self {
        Self { rule }
    }

    /// Maximum deferred contribution permitted for `prior_income`.
    pub fn compute_room(
        &self,
        prior_income: Decimal,
    ) -> Decimal {
        (prior_income * self.rule.percentage_rate).min(self.rule.annual_cap)
    }
}
