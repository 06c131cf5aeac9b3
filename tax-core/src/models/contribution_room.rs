use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContributionRoomError {
    #[error("contribution percentage must be between 0 and 1, got {0}")]
    PercentageOutOfRange(Decimal),

    #[error("annual contribution cap must be non-negative, got {0}")]
    NegativeCap(Decimal),
}

/// Deferred-contribution allowance: a percentage of prior income, capped at
/// an annual dollar limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRoomRule {
    pub percentage_rate: Decimal,
    pub annual_cap: Decimal,
}

impl ContributionRoomRule {
    pub fn validate(&self) -> Result<(), ContributionRoomError> {
        if self.percentage_rate < Decimal::ZERO || self.percentage_rate > Decimal::ONE {
            return Err(ContributionRoomError::PercentageOutOfRange(
                self.percentage_rate,
            ));
        }
        if self.annual_cap < Decimal::ZERO {
            return Err(ContributionRoomError::NegativeCap(self.annual_cap));
        }
        Ok(())
    }
}
