//! TOML loader for [`TaxProfile`] configuration.
//!
//! A profile carries every constant the engine uses for one jurisdiction and
//! tax year. See `profiles/quebec-2023.toml` for the full layout:
//!
//! ```toml
//! name = "example"
//! tax_year = 2023
//! federal_brackets = [{ threshold = 0, rate = 0.15 }, { threshold = 50000, rate = 0.20 }]
//! provincial_brackets = [{ threshold = 0, rate = 0.10 }]
//!
//! [[payroll_deductions]]
//! name = "pension"
//! rate = 0.06
//! cap = 4000
//! exemption = 3000      # optional, defaults to 0
//! ceiling_base = 70000  # optional
//!
//! [contribution_room]
//! percentage_rate = 0.18
//! annual_cap = 30780
//!
//! [optimizer]
//! high_income_threshold = 100000
//! grid_start = 0.50
//! grid_end = 0.80
//! grid_step = 0.05
//! deferral_fraction = 0.12
//! gross_up_multiplier = 1.38
//! secondary_tax_factor = 0.80
//!
//! [[tips]]              # optional
//! min_income = 50000    # optional; omit for tips that always apply
//! tips = ["..."]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tax_core::{ProfileError, TaxProfile};
use thiserror::Error;
use tracing::debug;

const QUEBEC_2023: &str = include_str!("../profiles/quebec-2023.toml");

/// Names accepted by [`ProfileLoader::builtin`].
pub const BUILTIN_PROFILES: &[&str] = &["quebec-2023"];

/// Errors that can occur when loading a tax profile.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid profile: {0}")]
    Invalid(#[from] ProfileError),

    #[error("unknown built-in profile '{name}'; available: {available:?}")]
    UnknownBuiltin {
        name: String,
        available: &'static [&'static str],
    },
}

/// Loads and validates tax profiles.
pub struct ProfileLoader;

impl ProfileLoader {
    /// Parse a profile from TOML text and validate it.
    ///
    /// Bracket tables are checked while parsing; the remaining rules are
    /// checked by [`TaxProfile::validate`] before returning.
    pub fn parse(toml_text: &str) -> Result<TaxProfile, ProfileLoadError> {
        let profile: TaxProfile = toml::from_str(toml_text)?;
        profile.validate()?;

        debug!(
            profile = %profile.name,
            tax_year = profile.tax_year,
            "loaded tax profile"
        );
        Ok(profile)
    }

    /// Read and parse a profile file.
    pub fn from_path(path: &Path) -> Result<TaxProfile, ProfileLoadError> {
        let text = fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// One of the profiles bundled with this crate.
    pub fn builtin(name: &str) -> Result<TaxProfile, ProfileLoadError> {
        match name {
            "quebec-2023" => Self::parse(QUEBEC_2023),
            _ => Err(ProfileLoadError::UnknownBuiltin {
                name: name.to_string(),
                available: BUILTIN_PROFILES,
            }),
        }
    }
}
