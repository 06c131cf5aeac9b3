//! Configuration loading for the tax engine.
//!
//! [`ProfileLoader`] reads a complete [`tax_core::TaxProfile`] from TOML.
//! [`BracketLoader`] reads bracket schedules from CSV so a profile's tables
//! can be swapped without editing the rest of it.

pub mod loader;
pub mod profile;

pub use loader::{BracketLoader, BracketLoaderError, BracketRecord, BracketTables};
pub use profile::{BUILTIN_PROFILES, ProfileLoadError, ProfileLoader};
