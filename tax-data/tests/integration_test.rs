//! Integration tests running the engine over the bundled profile and CSV
//! bracket overrides.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{CalculationError, Jurisdiction, TaxEngine};
use tax_data::{BracketLoader, ProfileLoader};

const TEST_CSV_2024: &str = include_str!("../test-data/brackets_2024.csv");

fn quebec_engine() -> TaxEngine {
    let profile = ProfileLoader::builtin("quebec-2023").expect("bundled profile is valid");
    TaxEngine::new(profile).expect("bundled profile passes engine validation")
}

#[test]
fn test_breakdown_without_contribution() {
    let engine = quebec_engine();

    let components = engine
        .aggregate(dec!(80000), dec!(0))
        .expect("valid inputs");

    assert_eq!(components.taxable_income, dec!(80000));
    assert_eq!(components.federal_tax, dec!(13465.255));
    assert_eq!(components.provincial_tax, dec!(13536.25));
    assert_eq!(components.payroll_deduction("RRQ"), Some(dec!(3836.48)));
    assert_eq!(components.payroll_deduction("EI"), Some(dec!(952.74)));
    assert_eq!(components.payroll_deduction("QPIP"), Some(dec!(395.2)));
    assert_eq!(components.total_deductions, dec!(32185.925));
    assert_eq!(components.net_income, dec!(47814.075));
    assert_eq!(components.average_tax_rate, dec!(0.4023240625));
    assert_eq!(components.marginal_tax_rate, dec!(0.405));
}

#[test]
fn test_breakdown_with_contribution_lowers_income_tax_only() {
    let engine = quebec_engine();

    let without = engine.aggregate(dec!(80000), dec!(0)).expect("valid inputs");
    let with = engine
        .aggregate(dec!(80000), dec!(10000))
        .expect("valid inputs");

    assert_eq!(with.taxable_income, dec!(70000));
    assert_eq!(with.federal_tax, dec!(11415.255));
    assert_eq!(with.provincial_tax, dec!(11536.25));
    assert_eq!(with.total_payroll_deductions(), without.total_payroll_deductions());
    assert_eq!(with.total_deductions, dec!(38135.925));
    assert_eq!(with.net_income, dec!(51864.075));
    assert_eq!(with.average_tax_rate, dec!(0.3516990625));
}

#[test]
fn test_breakdown_caps_payroll_deductions() {
    let engine = quebec_engine();

    let components = engine
        .aggregate(dec!(150000), dec!(0))
        .expect("valid inputs");

    assert_eq!(components.federal_tax, dec!(30195.82));
    assert_eq!(components.provincial_tax, dec!(30121.225));
    assert_eq!(components.payroll_deduction("RRQ"), Some(dec!(3836.48)));
    assert_eq!(components.payroll_deduction("QPIP"), Some(dec!(402.39)));
    assert_eq!(components.total_deductions, dec!(65508.655));
    assert_eq!(components.net_income, dec!(84491.345));
}

#[test]
fn test_breakdown_rejects_contribution_above_room() {
    let engine = quebec_engine();

    let result = engine.aggregate(dec!(80000), dec!(20000));

    assert_eq!(
        result,
        Err(CalculationError::ContributionOutOfRange {
            contribution: dec!(20000),
            room: dec!(14400),
        })
    );
}

#[test]
fn test_room_is_capped() {
    let engine = quebec_engine();

    assert_eq!(engine.compute_room(dec!(80000)), Ok(dec!(14400)));
    assert_eq!(engine.compute_room(dec!(500000)), Ok(dec!(30780)));
}

#[test]
fn test_optimize_high_income() {
    let engine = quebec_engine();

    let strategy = engine.optimize(dec!(200000)).expect("valid income");

    assert_eq!(strategy.primary_income, dec!(140000));
    assert_eq!(strategy.secondary_income, dec!(60000));
    assert_eq!(strategy.deferred_contribution, dec!(16800));
    assert_eq!(strategy.estimated_tax, dec!(68956.449));
    assert_eq!(strategy.tax_savings, dec!(18272.696));
    assert_eq!(strategy.total_income(), dec!(200000));
}

#[test]
fn test_optimize_picks_different_split_at_lower_income() {
    let engine = quebec_engine();

    let strategy = engine.optimize(dec!(150000)).expect("valid income");

    assert_eq!(strategy.primary_income, dec!(112500));
    assert_eq!(strategy.secondary_income, dec!(37500));
    assert_eq!(strategy.deferred_contribution, dec!(13500));
    assert_eq!(strategy.estimated_tax, dec!(47233.905));
    assert_eq!(strategy.tax_savings, dec!(13083.14));
}

#[test]
fn test_optimize_below_threshold_returns_baseline() {
    let engine = quebec_engine();

    let strategy = engine.optimize(dec!(90000)).expect("valid income");

    assert_eq!(strategy.primary_income, dec!(90000));
    assert_eq!(strategy.secondary_income, dec!(0));
    assert_eq!(strategy.deferred_contribution, dec!(0));
    assert_eq!(strategy.estimated_tax, dec!(31051.505));
    assert_eq!(strategy.tax_savings, dec!(0));
}

#[test]
fn test_tips_accumulate_by_income() {
    let engine = quebec_engine();

    assert_eq!(engine.tips(dec!(40000)).expect("valid income").len(), 2);
    assert_eq!(engine.tips(dec!(120000)).expect("valid income").len(), 6);

    let top = engine.tips(dec!(200000)).expect("valid income");
    assert_eq!(top.len(), 9);
    assert_eq!(
        top.last().map(String::as_str),
        Some("Maximize RRSP contributions to defer tax on higher-bracket income.")
    );
}

#[test]
fn test_csv_overrides_profile_brackets() {
    let records = BracketLoader::parse(TEST_CSV_2024.as_bytes()).expect("Failed to parse CSV");
    let tables = BracketLoader::tables(&records).expect("valid tables");
    let profile = ProfileLoader::builtin("quebec-2023").expect("bundled profile is valid");

    let engine = TaxEngine::new(tables.apply_to(profile)).expect("valid profile");

    assert_eq!(
        engine.compute_tax(dec!(80000), Jurisdiction::Federal),
        Ok(dec!(13327.315))
    );
    assert_eq!(
        engine.compute_tax(dec!(80000), Jurisdiction::Provincial),
        Ok(dec!(12611))
    );
    // Payroll rules come from the profile, not the CSV.
    assert_eq!(engine.profile().payroll_deductions.len(), 3);
}

#[test]
fn test_compute_tax_rejects_negative_amount() {
    let engine = quebec_engine();

    let result = engine.compute_tax(dec!(-1), Jurisdiction::Federal);

    assert_eq!(
        result,
        Err(CalculationError::NegativeAmount {
            field: "amount",
            value: dec!(-1),
        })
    );
}

#[test]
fn test_compute_tax_federal_2023() {
    let engine = quebec_engine();

    assert_eq!(
        engine.compute_tax(dec!(120000), Jurisdiction::Federal),
        Ok(dec!(22395.82))
    );
    assert_eq!(engine.compute_tax(dec!(0), Jurisdiction::Provincial), Ok(dec!(0)));
}
