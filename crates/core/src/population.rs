//! Population records and tables.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::BudgetError;
use crate::scenario::AdminUnit;

/// Population of one admin unit in one year.
///
/// Subsets overlap and need not sum to the total. A subset the source
/// dataset does not carry is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationRecord {
    /// Admin unit.
    pub admin_unit: AdminUnit,
    /// Year.
    pub year: i32,
    /// Total population (`pop_total`).
    pub pop_total: Decimal,
    /// Pregnant women (`pop_pw`).
    pub pop_pw: Decimal,
    /// Children under 5 (`pop_0_5`).
    pub pop_0_5: Decimal,
    /// Children under 1 (`pop_0_1`).
    pub pop_0_1: Decimal,
    /// Children aged 1 to 2 (`pop_1_2`).
    pub pop_1_2: Decimal,
    /// Vaccine-eligible cohort, 5 to 36 months (`pop_vaccine_5_36_months`).
    pub pop_vaccine_5_36_months: Decimal,
}

impl PopulationRecord {
    /// Creates a record with every subset set to zero.
    #[must_use]
    pub fn new(admin_unit: AdminUnit, year: i32) -> Self {
        Self {
            admin_unit,
            year,
            pop_total: Decimal::ZERO,
            pop_pw: Decimal::ZERO,
            pop_0_5: Decimal::ZERO,
            pop_0_1: Decimal::ZERO,
            pop_1_2: Decimal::ZERO,
            pop_vaccine_5_36_months: Decimal::ZERO,
        }
    }

    fn columns(&self) -> [(&'static str, Decimal); 6] {
        [
            ("pop_total", self.pop_total),
            ("pop_pw", self.pop_pw),
            ("pop_0_5", self.pop_0_5),
            ("pop_0_1", self.pop_0_1),
            ("pop_1_2", self.pop_1_2),
            ("pop_vaccine_5_36_months", self.pop_vaccine_5_36_months),
        ]
    }
}

/// Population records indexed by admin unit and year.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    records: HashMap<(AdminUnit, i32), PopulationRecord>,
}

impl PopulationTable {
    /// Builds a table, rejecting negative counts and duplicate keys.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeValue` or `BudgetError::DuplicatePopulation`.
    pub fn new(records: Vec<PopulationRecord>) -> Result<Self, BudgetError> {
        let mut indexed = HashMap::with_capacity(records.len());

        for record in records {
            if let Some((column, _)) = record
                .columns()
                .into_iter()
                .find(|(_, value)| *value < Decimal::ZERO)
            {
                return Err(BudgetError::NegativeValue {
                    admin_unit: record.admin_unit,
                    column,
                });
            }

            let key = (record.admin_unit.clone(), record.year);
            if indexed.contains_key(&key) {
                return Err(BudgetError::DuplicatePopulation {
                    admin_unit: key.0,
                    year: key.1,
                });
            }
            indexed.insert(key, record);
        }

        Ok(Self { records: indexed })
    }

    /// Looks up the record for an admin unit and year.
    #[must_use]
    pub fn get(&self, admin_unit: &AdminUnit, year: i32) -> Option<&PopulationRecord> {
        self.records.get(&(admin_unit.clone(), year))
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

    fn record(adm2: &str, year: i32) -> PopulationRecord {
        PopulationRecord {
            pop_total: dec!(10000),
            pop_pw: dec!(200),
            ..PopulationRecord::new(AdminUnit::new("State A", adm2), year)
        }
    }

    #[test]
    fn test_lookup_by_unit_and_year() {
        let table =
            PopulationTable::new(vec![record("LGA 1", 2025), record("LGA 1", 2026)]).unwrap();

        assert_eq!(table.len(), 2);
        let unit = AdminUnit::new("State A", "LGA 1");
        assert_eq!(table.get(&unit, 2026).unwrap().year, 2026);
        assert!(table.get(&unit, 2027).is_none());
        assert!(table.get(&AdminUnit::new("State A", "LGA 2"), 2025).is_none());
    }

    #[test]
    fn test_absent_subsets_are_zero() {
        let table = PopulationTable::new(vec![record("LGA 1", 2025)]).unwrap();
        let rec = table.get(&AdminUnit::new("State A", "LGA 1"), 2025).unwrap();

        assert_eq!(rec.pop_0_5, Decimal::ZERO);
        assert_eq!(rec.pop_vaccine_5_36_months, Decimal::ZERO);
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut bad = record("LGA 1", 2025);
        bad.pop_0_1 = dec!(-5);

        assert_eq!(
            PopulationTable::new(vec![bad]).unwrap_err(),
            BudgetError::NegativeValue {
                admin_unit: AdminUnit::new("State A", "LGA 1"),
                column: "pop_0_1",
            }
        );
    }

    #[test]
    fn test_duplicate_row_rejected() {
        let result = PopulationTable::new(vec![record("LGA 1", 2025), record("LGA 1", 2025)]);

        assert!(matches!(
            result,
            Err(BudgetError::DuplicatePopulation { year: 2025, .. })
        ));
    }
}
