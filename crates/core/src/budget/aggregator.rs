//! Multi-year budget aggregation.

use tracing::info;

use super::assembler::BudgetAssembler;
use super::request::BudgetRequest;
use crate::costing::{CostRateTable, OutputRow};
use crate::error::BudgetError;
use crate::population::PopulationTable;
use crate::quantify::CaseManagementTable;

/// One country's reference datasets.
#[derive(Debug, Clone, Default)]
pub struct CountryDatasets {
    /// Population by admin unit and year.
    pub population: PopulationTable,
    /// Unit-cost rates.
    pub cost_rates: CostRateTable,
    /// Precomputed case-management quantities.
    pub case_management: CaseManagementTable,
}

/// Computes the budget for every year of a request.
///
/// Runs the assembler once per year in `[start_year, end_year]` and keeps
/// only rows for the requested (family, place) pairs.
///
/// # Errors
///
/// Returns the request's validation error, or the first failure raised while
/// assembling any year.
pub fn get_budget(
    request: &BudgetRequest,
    datasets: &CountryDatasets,
) -> Result<Vec<OutputRow>, BudgetError> {
    let plan = request.plan()?;
    let assembler = BudgetAssembler::new(
        &datasets.cost_rates,
        &request.settings,
        &datasets.population,
        &datasets.case_management,
    )?;

    let mut rows = Vec::new();
    for year in plan.years() {
        let scenario = plan.scenario_for(year);
        rows.extend(
            assembler
                .assemble(&scenario)?
                .into_iter()
                .filter(|row| plan.includes(row)),
        );
    }

    info!(
        country = %request.country,
        start_year = request.start_year,
        end_year = request.end_year,
        rows = rows.len(),
        "Budget computed"
    );

    Ok(rows)
}
