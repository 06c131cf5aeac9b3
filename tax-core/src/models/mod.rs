mod contribution_room;
mod deduction_rule;
mod distribution_strategy;
mod jurisdiction;
mod optimizer_settings;
mod tax_bracket;
mod tax_components;
mod tax_profile;

pub use contribution_room::{ContributionRoomError, ContributionRoomRule};
pub use deduction_rule::{DeductionRule, DeductionRuleError};
pub use distribution_strategy::DistributionStrategy;
pub use jurisdiction::Jurisdiction;
pub use optimizer_settings::{MAX_GRID_POINTS, OptimizerSettings, OptimizerSettingsError};
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_components::{PayrollDeductionAmount, TaxComponents};
pub use tax_profile::{ProfileError, TaxProfile, TipTier};

#[cfg(test)]
pub(crate) use tax_profile::test_support;
