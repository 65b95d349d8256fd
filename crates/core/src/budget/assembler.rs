//! Scenario-to-output assembly for a single year.

use tracing::debug;

use crate::costing::{CostJoiner, CostRateTable, OutputRow};
use crate::error::BudgetError;
use crate::population::PopulationTable;
use crate::quantify::{CaseManagementTable, QuantifierRegistry, QuantityContext};
use crate::scenario::ScenarioTable;
use crate::settings::BudgetSettings;

/// Quantifies and costs every active entry of a scenario table.
///
/// Holds only borrowed, read-only inputs, so one assembler can serve every
/// year of a request.
pub struct BudgetAssembler<'a> {
    registry: QuantifierRegistry<'a>,
    joiner: CostJoiner<'a>,
    settings: &'a BudgetSettings,
    population: &'a PopulationTable,
}

impl<'a> BudgetAssembler<'a> {
    /// Creates an assembler over one country's reference data.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidCurrency` if the settings name a
    /// malformed currency, and `BudgetError::UnsupportedCurrency` if a
    /// selected currency is not a column of `cost_rates`.
    pub fn new(
        cost_rates: &'a CostRateTable,
        settings: &'a BudgetSettings,
        population: &'a PopulationTable,
        case_management: &'a CaseManagementTable,
    ) -> Result<Self, BudgetError> {
        let mut joiner = CostJoiner::new(cost_rates);
        if let Some(local) = settings.local_currency()? {
            joiner = joiner.with_local_currency(local);
        }
        if let Some(missing) = joiner
            .currencies()
            .iter()
            .find(|currency| !cost_rates.carries(currency))
        {
            return Err(BudgetError::UnsupportedCurrency(missing.clone()));
        }

        Ok(Self {
            registry: QuantifierRegistry::standard(case_management),
            joiner,
            settings,
            population,
        })
    }

    /// Replaces the quantifier registry.
    #[must_use]
    pub fn with_registry(mut self, registry: QuantifierRegistry<'a>) -> Self {
        self.registry = registry;
        self
    }

    /// Costs every active entry of `scenario`.
    ///
    /// # Errors
    ///
    /// Propagates the first configuration, lookup or validation failure; no
    /// partial table is returned.
    pub fn assemble(&self, scenario: &ScenarioTable) -> Result<Vec<OutputRow>, BudgetError> {
        let mut rows = Vec::new();

        for entry in scenario.active_entries()? {
            let provider = self
                .registry
                .get(entry.intervention)
                .ok_or_else(|| BudgetError::UnknownIntervention(entry.intervention.to_string()))?;

            let ctx = QuantityContext {
                admin_unit: &entry.admin_unit,
                year: entry.year,
                type_label: entry.type_label.as_deref(),
                population: self.population.get(&entry.admin_unit, entry.year),
                settings: self.settings,
            };
            let lines = provider.quantify(&ctx)?;
            let costed = self.joiner.join(&entry, &lines)?;

            debug!(
                admin_unit = %entry.admin_unit,
                year = entry.year,
                intervention = %entry.intervention,
                lines = lines.len(),
                rows = costed.len(),
                "Assembled scenario entry"
            );
            rows.extend(costed);
        }

        Ok(rows)
    }
}

/// Costs one scenario table against one country's reference data.
///
/// # Errors
///
/// See [`BudgetAssembler::new`] and [`BudgetAssembler::assemble`].
pub fn generate_budget(
    scenario: &ScenarioTable,
    cost_rates: &CostRateTable,
    settings: &BudgetSettings,
    population: &PopulationTable,
    case_management: &CaseManagementTable,
) -> Result<Vec<OutputRow>, BudgetError> {
    BudgetAssembler::new(cost_rates, settings, population, case_management)?.assemble(scenario)
}
