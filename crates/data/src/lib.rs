//! Reference dataset access for SNT budgeting.
//!
//! Loads each country's population, cost-rate and case-management tables
//! from CSV, caches them per country, and runs budget requests against them.

pub mod cache;
pub mod error;
pub mod loader;
pub mod provider;
pub mod service;

pub use cache::CachedDatasetProvider;
pub use error::{DataError, DataResult};
pub use provider::{CsvDatasetProvider, DatasetProvider, StaticDatasetProvider, normalize_country};
pub use service::get_country_budgets;
