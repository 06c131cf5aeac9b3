use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketTable, BracketTableError, Jurisdiction, TaxBracket, TaxProfile};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// `row` is the 1-based data row; the header line is not counted.
    #[error("Unknown jurisdiction '{value}' on data row {row}")]
    UnknownJurisdiction { value: String, row: usize },

    #[error("Invalid {jurisdiction} bracket table: {source}")]
    InvalidTable {
        jurisdiction: Jurisdiction,
        #[source]
        source: BracketTableError,
    },
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the bracket CSV file.
///
/// - `jurisdiction`: `federal` or `provincial` (case-insensitive)
/// - `threshold`: income above which `rate` applies
/// - `rate`: the marginal tax rate as a decimal (e.g., 0.15 for 15%)
///
/// Rows for one jurisdiction must appear in ascending threshold order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub jurisdiction: String,
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Bracket tables read from a CSV file. A jurisdiction absent from the
/// file is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BracketTables {
    pub federal: Option<BracketTable>,
    pub provincial: Option<BracketTable>,
}

impl BracketTables {
    /// Replaces the profile's tables with the ones present here.
    pub fn apply_to(
        self,
        mut profile: TaxProfile,
    ) -> TaxProfile {
        if let Some(federal) = self.federal {
            profile.federal_brackets = federal;
        }
        if let Some(provincial) = self.provincial {
            profile.provincial_brackets = provincial;
        }
        profile
    }
}

/// Loader for bracket schedules stored as CSV.
///
/// Lets a jurisdiction publish new thresholds for a year without touching
/// the rest of its profile.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by jurisdiction and build validated tables.
    ///
    /// File order is kept within each jurisdiction; a table that breaks the
    /// bracket invariants is rejected rather than re-sorted.
    pub fn tables(records: &[BracketRecord]) -> Result<BracketTables, BracketLoaderError> {
        let mut federal = Vec::new();
        let mut provincial = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let jurisdiction = Jurisdiction::parse(&record.jurisdiction).ok_or_else(|| {
                BracketLoaderError::UnknownJurisdiction {
                    value: record.jurisdiction.clone(),
                    row: index + 1,
                }
            })?;

            let bracket = TaxBracket::new(record.threshold, record.rate);
            match jurisdiction {
                Jurisdiction::Federal => federal.push(bracket),
                Jurisdiction::Provincial => provincial.push(bracket),
            }
        }

        let tables = BracketTables {
            federal: Self::build(Jurisdiction::Federal, federal)?,
            provincial: Self::build(Jurisdiction::Provincial, provincial)?,
        };

        debug!(
            federal = tables.federal.as_ref().map_or(0, BracketTable::len),
            provincial = tables.provincial.as_ref().map_or(0, BracketTable::len),
            "loaded bracket tables"
        );
        Ok(tables)
    }

    fn build(
        jurisdiction: Jurisdiction,
        brackets: Vec<TaxBracket>,
    ) -> Result<Option<BracketTable>, BracketLoaderError> {
        if brackets.is_empty() {
            return Ok(None);
        }

        BracketTable::new(brackets)
            .map(Some)
            .map_err(|source| BracketLoaderError::InvalidTable {
                jurisdiction,
                source,
            })
    }
}
