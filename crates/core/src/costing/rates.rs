//! Unit-cost rates keyed by intervention, type and unit.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::CurrencyCode;
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Unit cost of one (intervention, type, unit) in every known currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRateRecord {
    /// Intervention family (`code_intervention`).
    pub intervention: InterventionCode,
    /// Product/regimen label (`type_intervention`).
    pub type_label: String,
    /// Unit label, e.g. `per ITN`.
    pub unit: String,
    /// Cost class, e.g. `Commodity`.
    pub cost_class: String,
    /// Rate per currency. A table currency absent here is a missing rate.
    pub rates: BTreeMap<CurrencyCode, Decimal>,
}

type RateKey = (InterventionCode, String, String);

/// Cost rates indexed by (intervention, type, unit).
///
/// Tracks the currency columns the table was built from; every record is
/// expected to carry a rate in each of them.
#[derive(Debug, Clone, Default)]
pub struct CostRateTable {
    records: HashMap<RateKey, CostRateRecord>,
    currencies: BTreeSet<CurrencyCode>,
}

impl CostRateTable {
    /// Builds a table.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::DuplicateCostRate` if two records share a key,
    /// since each (intervention, type, unit, currency) must cost one row.
    pub fn new(records: Vec<CostRateRecord>) -> Result<Self, BudgetError> {
        let mut indexed = HashMap::with_capacity(records.len());
        let mut currencies = BTreeSet::new();

        for record in records {
            currencies.extend(record.rates.keys().cloned());
            let key = (
                record.intervention,
                record.type_label.clone(),
                record.unit.clone(),
            );
            if indexed.contains_key(&key) {
                return Err(BudgetError::DuplicateCostRate {
                    intervention: record.intervention,
                    type_label: record.type_label,
                    unit: record.unit,
                });
            }
            indexed.insert(key, record);
        }

        Ok(Self {
            records: indexed,
            currencies,
        })
    }

    /// Declares currency columns the table carries even where no record
    /// has a rate in them.
    #[must_use]
    pub fn with_currencies(mut self, currencies: impl IntoIterator<Item = CurrencyCode>) -> Self {
        self.currencies.extend(currencies);
        self
    }

    /// Looks up the record for a key.
    #[must_use]
    pub fn get(
        &self,
        intervention: InterventionCode,
        type_label: &str,
        unit: &str,
    ) -> Option<&CostRateRecord> {
        self.records
            .get(&(intervention, type_label.to_string(), unit.to_string()))
    }

    /// Currency columns of the table.
    #[must_use]
    pub const fn currencies(&self) -> &BTreeSet<CurrencyCode> {
        &self.currencies
    }

    /// Whether the table has a column for `currency`.
    #[must_use]
    pub fn carries(&self, currency: &CurrencyCode) -> bool {
        self.currencies.contains(currency)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(unit: &str) -> CostRateRecord {
        CostRateRecord {
            intervention: InterventionCode::ItnCampaign,
            type_label: "Standard".into(),
            unit: unit.into(),
            cost_class: "Commodity".into(),
            rates: BTreeMap::from([
                (CurrencyCode::usd(), dec!(2.0)),
                (CurrencyCode::parse("NGN").unwrap(), dec!(1800)),
            ]),
        }
    }

    #[test]
    fn test_lookup_by_key() {
        let table = CostRateTable::new(vec![record("per ITN"), record("per bale")]).unwrap();

        assert_eq!(table.len(), 2);
        let found = table
            .get(InterventionCode::ItnCampaign, "Standard", "per bale")
            .unwrap();
        assert_eq!(found.unit, "per bale");
        assert!(table
            .get(InterventionCode::ItnRoutine, "Standard", "per ITN")
            .is_none());
        assert!(table
            .get(InterventionCode::ItnCampaign, "PBO", "per ITN")
            .is_none());
    }

    #[test]
    fn test_currencies() {
        let table = CostRateTable::new(vec![record("per ITN")]).unwrap();
        let currencies: Vec<_> = table.currencies().iter().map(ToString::to_string).collect();

        assert_eq!(currencies, vec!["NGN", "USD"]);
    }

    #[test]
    fn test_declared_currency_without_rates() {
        let xof = CurrencyCode::parse("XOF").unwrap();
        let table = CostRateTable::new(vec![record("per ITN")])
            .unwrap()
            .with_currencies([xof.clone()]);

        assert!(table.carries(&xof));
        assert!(table.carries(&CurrencyCode::usd()));
        assert!(!table.carries(&CurrencyCode::parse("EUR").unwrap()));
        assert_eq!(table.currencies().len(), 3);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = CostRateTable::new(vec![record("per ITN"), record("per ITN")]);

        assert_eq!(
            result.unwrap_err(),
            BudgetError::DuplicateCostRate {
                intervention: InterventionCode::ItnCampaign,
                type_label: "Standard".into(),
                unit: "per ITN".into(),
            }
        );
    }
}
