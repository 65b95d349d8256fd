//! Country dataset providers.

use snt_core::CountryDatasets;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::error::{DataError, DataResult};
use crate::loader::{
    CASE_MANAGEMENT_FILE, COST_RATES_FILE, POPULATION_FILE, load_case_management, load_cost_rates,
    load_population,
};

/// Source of per-country reference datasets.
pub trait DatasetProvider: Send + Sync {
    /// Loads one country's datasets.
    ///
    /// # Errors
    ///
    /// Returns `DataError::UnknownCountry` when the provider has nothing for
    /// `country`, or any loading failure.
    fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>>;
}

impl<P: DatasetProvider + ?Sized> DatasetProvider for Arc<P> {
    fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>> {
        (**self).load(country)
    }
}

/// Lower-cases a country identifier and checks it is `[a-z0-9_-]+`.
///
/// # Errors
///
/// Returns `DataError::InvalidCountry` for an empty identifier or one with
/// any other character.
pub fn normalize_country(country: &str) -> DataResult<String> {
    let normalized = country.trim().to_ascii_lowercase();
    let valid = !normalized.is_empty()
        && normalized
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if valid {
        Ok(normalized)
    } else {
        Err(DataError::InvalidCountry(country.to_string()))
    }
}

/// Reads `<root>/<country>/{population,cost_rates,case_management}.csv`.
#[derive(Debug, Clone)]
pub struct CsvDatasetProvider {
    root: PathBuf,
}

impl CsvDatasetProvider {
    /// Creates a provider rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DatasetProvider for CsvDatasetProvider {
    fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>> {
        let country = normalize_country(country)?;
        let dir = self.root.join(&country);
        if !dir.is_dir() {
            return Err(DataError::UnknownCountry(country));
        }

        let datasets = CountryDatasets {
            population: load_population(&dir.join(POPULATION_FILE))?,
            cost_rates: load_cost_rates(&dir.join(COST_RATES_FILE))?,
            case_management: load_case_management(&dir.join(CASE_MANAGEMENT_FILE))?,
        };

        info!(
            country = %country,
            population_rows = datasets.population.len(),
            cost_rates = datasets.cost_rates.len(),
            case_management_rows = datasets.case_management.len(),
            "Country datasets loaded"
        );

        Ok(Arc::new(datasets))
    }
}

/// Serves prebuilt datasets from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDatasetProvider {
    countries: HashMap<String, Arc<CountryDatasets>>,
}

impl StaticDatasetProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a country.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidCountry` for a malformed identifier.
    pub fn with_country(mut self, country: &str, datasets: CountryDatasets) -> DataResult<Self> {
        self.countries
            .insert(normalize_country(country)?, Arc::new(datasets));
        Ok(self)
    }
}

impl DatasetProvider for StaticDatasetProvider {
    fn load(&self, country: &str) -> DataResult<Arc<CountryDatasets>> {
        let country = normalize_country(country)?;
        self.countries
            .get(&country)
            .cloned()
            .ok_or(DataError::UnknownCountry(country))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_country(root: &std::path::Path, country: &str) {
        let dir = root.join(country);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(POPULATION_FILE),
            "adm1,adm2,year,pop_total,pop_pw\nTshopo,Opala,2025,10000,200\n",
        )
        .unwrap();
        fs::write(
            dir.join(COST_RATES_FILE),
            "code_intervention,type_intervention,unit,cost_class,usd_cost\n\
             iptp,SP,per SP,Commodity,0.5\n",
        )
        .unwrap();
        fs::write(
            dir.join(CASE_MANAGEMENT_FILE),
            "adm1,adm2,cm_rdt_kit_quantity\nTshopo,Opala,500\n",
        )
        .unwrap();
    }

    #[test]
    fn test_normalize_country() {
        assert_eq!(normalize_country(" DRC ").unwrap(), "drc");
        assert_eq!(normalize_country("cote-d_ivoire2").unwrap(), "cote-d_ivoire2");
        assert!(matches!(
            normalize_country("../etc"),
            Err(DataError::InvalidCountry(_))
        ));
        assert!(matches!(normalize_country(""), Err(DataError::InvalidCountry(_))));
    }

    #[test]
    fn test_csv_provider_loads_country() {
        let root = tempfile::tempdir().unwrap();
        write_country(root.path(), "drc");

        let datasets = CsvDatasetProvider::new(root.path()).load("DRC").unwrap();

        assert_eq!(datasets.population.len(), 1);
        assert_eq!(datasets.cost_rates.len(), 1);
        assert_eq!(datasets.case_management.len(), 1);
    }

    #[test]
    fn test_csv_provider_unknown_country() {
        let root = tempfile::tempdir().unwrap();

        let err = CsvDatasetProvider::new(root.path()).load("nga").unwrap_err();
        assert!(matches!(err, DataError::UnknownCountry(country) if country == "nga"));
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticDatasetProvider::new()
            .with_country("NGA", CountryDatasets::default())
            .unwrap();

        assert!(provider.load("nga").is_ok());
        assert!(matches!(provider.load("drc"), Err(DataError::UnknownCountry(_))));
    }
}
