//! CSV loaders for the per-country reference datasets.
//!
//! Loaders are header-driven: columns are found by name, extra columns are
//! ignored, and optional numeric columns that are absent or blank read as
//! zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use snt_core::{
    AdminUnit, CaseManagementRecord, CaseManagementTable, CaseManagementUnit, CostRateRecord,
    CostRateTable, CurrencyCode, InterventionCode, PopulationRecord, PopulationTable,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{DataError, DataResult};

/// Population file name inside a country directory.
pub const POPULATION_FILE: &str = "population.csv";
/// Cost-rate file name inside a country directory.
pub const COST_RATES_FILE: &str = "cost_rates.csv";
/// Case-management file name inside a country directory.
pub const CASE_MANAGEMENT_FILE: &str = "case_management.csv";

const VACCINE_COHORT_ALIAS: &str = "pop_vaccine_5_36_mois";

/// An open CSV file with its header index.
struct Sheet {
    path: PathBuf,
    reader: csv::Reader<File>,
    headers: csv::StringRecord,
}

impl Sheet {
    fn open(path: &Path) -> DataResult<Self> {
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
        let headers = reader
            .headers()
            .map_err(|source| DataError::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            headers,
        })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn require(&self, name: &'static str) -> DataResult<usize> {
        self.column(name).ok_or_else(|| DataError::MissingColumn {
            path: self.path.clone(),
            column: name,
        })
    }

    /// Reads every record, handing each to `f` with its line number.
    fn for_each<F>(&mut self, mut f: F) -> DataResult<()>
    where
        F: FnMut(&Cell<'_>) -> DataResult<()>,
    {
        for result in self.reader.records() {
            let record = result.map_err(|source| DataError::Csv {
                path: self.path.clone(),
                source,
            })?;
            let line = record.position().map_or(0, csv::Position::line);
            f(&Cell {
                path: &self.path,
                headers: &self.headers,
                record: &record,
                line,
            })?;
        }
        Ok(())
    }
}

/// One record, with typed accessors that report the offending cell.
struct Cell<'a> {
    path: &'a Path,
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
    line: u64,
}

impl Cell<'_> {
    fn text(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or_default()
    }

    fn invalid(&self, index: usize) -> DataError {
        DataError::InvalidValue {
            path: self.path.to_path_buf(),
            line: self.line,
            column: self.headers.get(index).unwrap_or_default().to_string(),
            value: self.text(index).to_string(),
        }
    }

    fn admin_unit(&self, adm1: usize, adm2: usize) -> DataResult<AdminUnit> {
        if self.text(adm1).is_empty() {
            return Err(self.invalid(adm1));
        }
        if self.text(adm2).is_empty() {
            return Err(self.invalid(adm2));
        }
        Ok(AdminUnit::new(self.text(adm1), self.text(adm2)))
    }

    fn decimal(&self, index: usize) -> DataResult<Option<Decimal>> {
        let raw = self.text(index);
        if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(Some)
            .map_err(|_| self.invalid(index))
    }

    fn decimal_or_zero(&self, index: Option<usize>) -> DataResult<Decimal> {
        match index {
            Some(index) => Ok(self.decimal(index)?.unwrap_or_default()),
            None => Ok(Decimal::ZERO),
        }
    }

    /// Years may be written as `2025` or `2025.0`.
    fn year(&self, index: usize) -> DataResult<i32> {
        let raw = self.text(index);
        if let Ok(year) = raw.parse::<i32>() {
            return Ok(year);
        }
        match self.decimal(index)? {
            Some(value) if value.fract().is_zero() => {
                value.to_i32().ok_or_else(|| self.invalid(index))
            }
            _ => Err(self.invalid(index)),
        }
    }
}

/// Loads a population table.
///
/// Requires `adm1`, `adm2` and `year`; every population subset column is
/// optional. The vaccine cohort may also be named `pop_vaccine_5_36_mois`.
///
/// # Errors
///
/// Returns `DataError` for unreadable files, missing key columns, malformed
/// cells, and negative or duplicate rows.
pub fn load_population(path: &Path) -> DataResult<PopulationTable> {
    let mut sheet = Sheet::open(path)?;
    let adm1 = sheet.require("adm1")?;
    let adm2 = sheet.require("adm2")?;
    let year = sheet.require("year")?;
    let pop_total = sheet.column("pop_total");
    let pop_pw = sheet.column("pop_pw");
    let pop_0_5 = sheet.column("pop_0_5");
    let pop_0_1 = sheet.column("pop_0_1");
    let pop_1_2 = sheet.column("pop_1_2");
    let vaccine = sheet
        .column("pop_vaccine_5_36_months")
        .or_else(|| sheet.column(VACCINE_COHORT_ALIAS));

    let mut records = Vec::new();
    sheet.for_each(|cell| {
        records.push(PopulationRecord {
            pop_total: cell.decimal_or_zero(pop_total)?,
            pop_pw: cell.decimal_or_zero(pop_pw)?,
            pop_0_5: cell.decimal_or_zero(pop_0_5)?,
            pop_0_1: cell.decimal_or_zero(pop_0_1)?,
            pop_1_2: cell.decimal_or_zero(pop_1_2)?,
            pop_vaccine_5_36_months: cell.decimal_or_zero(vaccine)?,
            ..PopulationRecord::new(cell.admin_unit(adm1, adm2)?, cell.year(year)?)
        });
        Ok(())
    })?;

    Ok(PopulationTable::new(records)?)
}

/// Loads a cost-rate table.
///
/// Requires `code_intervention`, `type_intervention`, `unit` and
/// `cost_class`; every `<code>_cost` column is a currency of the table. A
/// blank rate leaves the unit without a rate in that currency, which fails
/// the join if the unit is costed. Rows for intervention codes the engine
/// does not know are skipped.
///
/// # Errors
///
/// Returns `DataError` for unreadable files, missing key columns, malformed
/// rates, and duplicate keys.
pub fn load_cost_rates(path: &Path) -> DataResult<CostRateTable> {
    let mut sheet = Sheet::open(path)?;
    let code = sheet.require("code_intervention")?;
    let type_label = sheet.require("type_intervention")?;
    let unit = sheet.require("unit")?;
    let cost_class = sheet.require("cost_class")?;
    let currencies: Vec<(usize, CurrencyCode)> = sheet
        .headers
        .iter()
        .enumerate()
        .filter_map(|(index, header)| CurrencyCode::from_cost_column(header).map(|c| (index, c)))
        .collect();

    let mut records = Vec::new();
    sheet.for_each(|cell| {
        let Ok(intervention) = cell.text(code).parse::<InterventionCode>() else {
            debug!(
                code = cell.text(code),
                line = cell.line,
                "Skipping cost rate for unknown intervention"
            );
            return Ok(());
        };

        let mut rates = BTreeMap::new();
        for (index, currency) in &currencies {
            if let Some(rate) = cell.decimal(*index)? {
                rates.insert(currency.clone(), rate);
            }
        }

        records.push(CostRateRecord {
            intervention,
            type_label: cell.text(type_label).to_string(),
            unit: cell.text(unit).to_string(),
            cost_class: cell.text(cost_class).to_string(),
            rates,
        });
        Ok(())
    })?;

    Ok(CostRateTable::new(records)?.with_currencies(currencies.into_iter().map(|(_, c)| c)))
}

/// Loads a case-management table.
///
/// Requires `adm1` and `adm2`; each commodity quantity column is optional.
///
/// # Errors
///
/// Returns `DataError` for unreadable files, missing key columns, malformed
/// cells, and negative or duplicate rows.
pub fn load_case_management(path: &Path) -> DataResult<CaseManagementTable> {
    let mut sheet = Sheet::open(path)?;
    let adm1 = sheet.require("adm1")?;
    let adm2 = sheet.require("adm2")?;
    let columns: Vec<(CaseManagementUnit, Option<usize>)> = CaseManagementUnit::ALL
        .into_iter()
        .map(|unit| (unit, sheet.column(unit.column())))
        .collect();

    let mut records = Vec::new();
    sheet.for_each(|cell| {
        let mut record = CaseManagementRecord::new(cell.admin_unit(adm1, adm2)?);
        for (unit, index) in &columns {
            let quantity = cell.decimal_or_zero(*index)?;
            match unit {
                CaseManagementUnit::RdtKits => record.rdt_kits = quantity,
                CaseManagementUnit::ActPacks => record.act_packs = quantity,
                CaseManagementUnit::IvArtesunate => record.iv_artesunate = quantity,
                CaseManagementUnit::Ras => record.ras = quantity,
            }
        }
        records.push(record);
        Ok(())
    })?;

    Ok(CaseManagementTable::new(records)?)
}
