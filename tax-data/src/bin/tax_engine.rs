use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tax_core::calculations::common::round_half_up;
use tax_core::{DistributionStrategy, Jurisdiction, TaxComponents, TaxEngine, TaxProfile};
use tax_data::{BracketLoader, ProfileLoader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal income tax calculator.
///
/// Loads a tax profile (built-in or from a TOML file), optionally replaces
/// its bracket tables from a CSV file, and runs one calculation.
#[derive(Debug, Parser)]
#[command(name = "tax-engine")]
#[command(version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// Path to a TOML tax profile. Overrides --builtin.
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Name of a bundled profile
    #[arg(long, global = true, default_value = "quebec-2023")]
    builtin: String,

    /// CSV file with `jurisdiction,threshold,rate` rows replacing the
    /// profile's bracket tables
    #[arg(short, long, global = true)]
    brackets: Option<PathBuf>,

    /// Print the result as JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Progressive tax on an amount under one jurisdiction's brackets
    Tax {
        #[arg(short, long)]
        amount: Decimal,

        /// `federal` or `provincial`
        #[arg(short, long, value_parser = parse_jurisdiction)]
        jurisdiction: Jurisdiction,
    },

    /// Full tax breakdown for a gross income
    Breakdown {
        #[arg(short, long)]
        income: Decimal,

        /// Deferred contribution deducted from taxable income
        #[arg(short, long, default_value = "0")]
        contribution: Decimal,
    },

    /// Deferred-contribution room earned by a prior year's income
    Room {
        #[arg(short, long)]
        income: Decimal,
    },

    /// Lowest-tax split of a total income
    Optimize {
        #[arg(short, long)]
        income: Decimal,
    },

    /// Planning tips for an income level
    Tips {
        #[arg(short, long)]
        income: Decimal,
    },
}

fn parse_jurisdiction(value: &str) -> Result<Jurisdiction, String> {
    Jurisdiction::parse(value)
        .ok_or_else(|| format!("unknown jurisdiction '{value}' (expected federal or provincial)"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG` and falls back to `info`. Logs go to stderr so that
/// `--json` output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── profile ─────────────────────────────────────────────────────────────────

fn load_profile(cli: &Cli) -> Result<TaxProfile> {
    let profile = match &cli.profile {
        Some(path) => ProfileLoader::from_path(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?,
        None => ProfileLoader::builtin(&cli.builtin)
            .with_context(|| format!("Failed to load built-in profile: {}", cli.builtin))?,
    };

    let Some(path) = &cli.brackets else {
        return Ok(profile);
    };

    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let records = BracketLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
    let tables = BracketLoader::tables(&records)
        .with_context(|| format!("Invalid brackets in: {}", path.display()))?;

    debug!(records = records.len(), "applying bracket overrides");
    Ok(tables.apply_to(profile))
}

// ─── output ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TaxResult {
    jurisdiction: Jurisdiction,
    amount: Decimal,
    tax: Decimal,
}

#[derive(Debug, Serialize)]
struct RoomResult {
    prior_income: Decimal,
    room: Decimal,
}

#[derive(Debug, Serialize)]
struct TipsResult {
    income: Decimal,
    tips: Vec<String>,
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T),
) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
        println!("{rendered}");
    } else {
        text(value);
    }
    Ok(())
}

fn money(value: Decimal) -> Decimal {
    round_half_up(value)
}

fn percent(rate: Decimal) -> Decimal {
    round_half_up(rate * Decimal::ONE_HUNDRED)
}

fn print_breakdown(components: &TaxComponents) {
    println!("Gross income:          {}", money(components.gross_income));
    println!("Deferred contribution: {}", money(components.deferred_contribution));
    println!("Taxable income:        {}", money(components.taxable_income));
    println!("Federal tax:           {}", money(components.federal_tax));
    println!("Provincial tax:        {}", money(components.provincial_tax));
    for deduction in &components.payroll_deductions {
        println!("{:<23}{}", format!("{}:", deduction.name), money(deduction.amount));
    }
    println!("Total deductions:      {}", money(components.total_deductions));
    println!("Net income:            {}", money(components.net_income));
    println!("Average tax rate:      {}%", percent(components.average_tax_rate));
    println!("Marginal tax rate:     {}%", percent(components.marginal_tax_rate));
}

fn print_strategy(strategy: &DistributionStrategy) {
    println!("Primary income:        {}", money(strategy.primary_income));
    println!("Secondary income:      {}", money(strategy.secondary_income));
    println!("Deferred contribution: {}", money(strategy.deferred_contribution));
    println!("Estimated tax:         {}", money(strategy.estimated_tax));
    println!("Tax savings:           {}", money(strategy.tax_savings));
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let profile = load_profile(&cli)?;
    info!(profile = %profile.name, tax_year = profile.tax_year, "using tax profile");

    let engine = TaxEngine::new(profile).context("Tax profile failed validation")?;

    match cli.command {
        Command::Tax {
            amount,
            jurisdiction,
        } => {
            let tax = engine
                .compute_tax(amount, jurisdiction)
                .context("Failed to compute tax")?;
            let result = TaxResult {
                jurisdiction,
                amount,
                tax,
            };
            emit(cli.json, &result, |r| {
                println!("{} tax on {}: {}", r.jurisdiction, money(r.amount), money(r.tax));
            })
        }
        Command::Breakdown {
            income,
            contribution,
        } => {
            let components = engine
                .aggregate(income, contribution)
                .context("Failed to compute tax breakdown")?;
            emit(cli.json, &components, print_breakdown)
        }
        Command::Room { income } => {
            let room = engine
                .compute_room(income)
                .context("Failed to compute contribution room")?;
            let result = RoomResult {
                prior_income: income,
                room,
            };
            emit(cli.json, &result, |r| {
                println!("Contribution room for {}: {}", money(r.prior_income), money(r.room));
            })
        }
        Command::Optimize { income } => {
            let strategy = engine
                .optimize(income)
                .context("Failed to optimize income distribution")?;
            emit(cli.json, &strategy, print_strategy)
        }
        Command::Tips { income } => {
            let tips = engine.tips(income).context("Failed to look up tips")?;
            let result = TipsResult { income, tips };
            emit(cli.json, &result, |r| {
                for tip in &r.tips {
                    println!("- {tip}");
                }
            })
        }
    }
}
