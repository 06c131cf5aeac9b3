//! Income-tiered tax planning tips.

use rust_decimal::Decimal;

use crate::models::TipTier;

/// Collects the tips of every tier that applies to `income`, in tier order.
///
/// A tier applies when it has no `min_income`, or when `income` is strictly
/// above it.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TipTier;
/// use tax_core::calculations::tips::optimization_tips;
///
/// let tiers = vec![
///     TipTier { min_income: None, tips: vec!["Save".to_string()] },
///     TipTier { min_income: Some(dec!(50000)), tips: vec!["Donate".to_string()] },
/// ];
///
/// assert_eq!(optimization_tips(dec!(50000), &tiers), vec!["Save"]);
/// assert_eq!(optimization_tips(dec!(50001), &tiers), vec!["Save", "Donate"]);
/// ```
pub fn optimization_tips(
    income: Decimal,
    tiers: &[TipTier],
) -> Vec<String> {
    tiers
        .iter()
        .filter(|tier| tier.min_income.is_none_or(|min| income > min))
        .flat_map(|tier| tier.tips.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn tiers() -> Vec<TipTier> {
        vec![
            TipTier {
                min_income: None,
                tips: vec!["a".to_string(), "b".to_string()],
            },
            TipTier {
                min_income: Some(dec!(100000)),
                tips: vec!["c".to_string()],
            },
            TipTier {
                min_income: Some(dec!(50000)),
                tips: vec!["d".to_string()],
            },
        ]
    }

    #[test]
    fn unconditional_tier_applies_at_zero_income() {
        assert_eq!(optimization_tips(dec!(0), &tiers()), vec!["a", "b"]);
    }

    #[test]
    fn tiers_keep_profile_order() {
        assert_eq!(
            optimization_tips(dec!(150000), &tiers()),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(optimization_tips(dec!(100000), &tiers()), vec!["a", "b", "d"]);
    }

    #[test]
    fn no_tiers_yields_no_tips() {
        assert!(optimization_tips(dec!(80000), &[]).is_empty());
    }
}
