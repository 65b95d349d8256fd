//! Scenario tables: which intervention type is active where.

use std::collections::{BTreeMap, HashSet};

use super::{AdminUnit, InterventionCode};
use crate::error::BudgetError;

/// Deployment of one intervention family in a scenario row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterventionSlot {
    /// Whether the family is flagged as deployed (`code_<name>` column).
    pub deployed: bool,
    /// Active product/regimen label (`type_<name>` column).
    pub type_label: Option<String>,
}

/// One scenario row for an admin unit and year, holding a slot per family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRow {
    /// Admin unit.
    pub admin_unit: AdminUnit,
    /// Year.
    pub year: i32,
    /// Scenario name.
    pub scenario_name: String,
    /// Scenario description.
    pub scenario_description: String,
    /// Per-family deployment.
    pub interventions: BTreeMap<InterventionCode, InterventionSlot>,
}

impl ScenarioRow {
    /// Creates a row with no interventions deployed.
    #[must_use]
    pub fn new(
        admin_unit: AdminUnit,
        year: i32,
        scenario_name: impl Into<String>,
        scenario_description: impl Into<String>,
    ) -> Self {
        Self {
            admin_unit,
            year,
            scenario_name: scenario_name.into(),
            scenario_description: scenario_description.into(),
            interventions: BTreeMap::new(),
        }
    }

    /// Deploys a family with the given type.
    #[must_use]
    pub fn with_intervention(
        mut self,
        intervention: InterventionCode,
        type_label: Option<&str>,
    ) -> Self {
        self.interventions.insert(
            intervention,
            InterventionSlot {
                deployed: true,
                type_label: type_label.map(str::to_string),
            },
        );
        self
    }
}

/// An active (admin unit, year, family) deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEntry {
    /// Admin unit.
    pub admin_unit: AdminUnit,
    /// Year.
    pub year: i32,
    /// Scenario name.
    pub scenario_name: String,
    /// Scenario description.
    pub scenario_description: String,
    /// Intervention family.
    pub intervention: InterventionCode,
    /// Active type; `None` only for typeless families.
    pub type_label: Option<String>,
}

/// A table of scenario rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioTable {
    rows: Vec<ScenarioRow>,
}

impl ScenarioTable {
    /// Creates a table from rows.
    #[must_use]
    pub fn new(rows: Vec<ScenarioRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[ScenarioRow] {
        &self.rows
    }

    /// Expands the rows into active entries.
    ///
    /// A family is active when it is flagged as deployed and, for families
    /// that need one, carries a non-blank type. A flagged family without a
    /// type is treated as not deployed.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::DuplicateScenarioEntry` if a family is active
    /// twice for the same admin unit and year.
    pub fn active_entries(&self) -> Result<Vec<ScenarioEntry>, BudgetError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for row in &self.rows {
            for (&intervention, slot) in &row.interventions {
                if !slot.deployed {
                    continue;
                }

                let type_label = slot
                    .type_label
                    .as_deref()
                    .map(str::trim)
                    .filter(|label| !label.is_empty());
                if type_label.is_none() && intervention.requires_type() {
                    continue;
                }

                if !seen.insert((row.admin_unit.clone(), row.year, intervention)) {
                    return Err(BudgetError::DuplicateScenarioEntry {
                        intervention,
                        admin_unit: row.admin_unit.clone(),
                        year: row.year,
                    });
                }

                entries.push(ScenarioEntry {
                    admin_unit: row.admin_unit.clone(),
                    year: row.year,
                    scenario_name: row.scenario_name.clone(),
                    scenario_description: row.scenario_description.clone(),
                    intervention,
                    type_label: type_label.map(str::to_string),
                });
            }
        }

        Ok(entries)
    }
}
