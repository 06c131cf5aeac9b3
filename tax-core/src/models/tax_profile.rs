use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    BracketTable, ContributionRoomError, ContributionRoomRule, DeductionRule, DeductionRuleError,
    Jurisdiction, OptimizerSettings, OptimizerSettingsError,
};

/// Errors raised by [`TaxProfile::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("invalid deduction rule '{name}': {source}")]
    DeductionRule {
        name: String,
        #[source]
        source: DeductionRuleError,
    },

    #[error("duplicate deduction rule name '{0}'")]
    DuplicateDeduction(String),

    #[error("invalid contribution room: {0}")]
    ContributionRoom(#[from] ContributionRoomError),

    #[error("invalid optimizer settings: {0}")]
    Optimizer(#[from] OptimizerSettingsError),
}

/// A group of planning tips shown once income passes `min_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipTier {
    /// Tips apply when income is strictly above this amount; `None` means
    /// they always apply.
    #[serde(default)]
    pub min_income: Option<Decimal>,
    pub tips: Vec<String>,
}

/// Every constant the engine needs for one jurisdiction and tax year.
///
/// Bracket tables validate themselves on construction; [`validate`] covers
/// the remaining rules.
///
/// [`validate`]: TaxProfile::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub name: String,
    pub tax_year: i32,
    pub federal_brackets: BracketTable,
    pub provincial_brackets: BracketTable,
    #[serde(default)]
    pub payroll_deductions: Vec<DeductionRule>,
    pub contribution_room: ContributionRoomRule,
    pub optimizer: OptimizerSettings,
    #[serde(default)]
    pub tips: Vec<TipTier>,
}

impl TaxProfile {
    pub fn brackets(
        &self,
        jurisdiction: Jurisdiction,
    ) -> &BracketTable {
        match jurisdiction {
            Jurisdiction::Federal => &self.federal_brackets,
            Jurisdiction::Provincial => &self.provincial_brackets,
        }
    }

    /// # Errors
    ///
    /// Returns [`ProfileError`] naming the first invalid rule.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (index, rule) in self.payroll_deductions.iter().enumerate() {
            rule.validate()
                .map_err(|source| ProfileError::DeductionRule {
                    name: rule.name.clone(),
                    source,
                })?;

            if self.payroll_deductions[..index]
                .iter()
                .any(|earlier| earlier.name == rule.name)
            {
                return Err(ProfileError::DuplicateDeduction(rule.name.clone()));
            }
        }

        self.contribution_room.validate()?;
        self.optimizer.validate()?;
        Ok(())
    }
}
