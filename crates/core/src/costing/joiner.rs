//! Joins quantities against cost rates.

use std::collections::BTreeSet;

use super::{CostRateTable, CurrencyCode, OutputRow};
use crate::error::BudgetError;
use crate::quantify::QuantityLine;
use crate::scenario::ScenarioEntry;

/// Costs quantity lines in every selected currency.
#[derive(Debug, Clone)]
pub struct CostJoiner<'a> {
    rates: &'a CostRateTable,
    currencies: BTreeSet<CurrencyCode>,
}

impl<'a> CostJoiner<'a> {
    /// Creates a joiner that emits every currency column of the table.
    #[must_use]
    pub fn new(rates: &'a CostRateTable) -> Self {
        Self {
            rates,
            currencies: rates.currencies().clone(),
        }
    }

    /// Restricts output to USD and `local`.
    #[must_use]
    pub fn with_local_currency(mut self, local: CurrencyCode) -> Self {
        self.currencies = BTreeSet::from([CurrencyCode::usd(), local]);
        self
    }

    /// Currencies every line is costed in.
    #[must_use]
    pub const fn currencies(&self) -> &BTreeSet<CurrencyCode> {
        &self.currencies
    }

    /// Costs the lines of one scenario entry.
    ///
    /// Emits one row per (line, currency) in currency order.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MissingCostRate` when a line's
    /// (intervention, type, unit) has no rate record,
    /// `BudgetError::MissingCurrencyRate` when the record lacks a selected
    /// currency, and `BudgetError::ArithmeticOverflow` if a cost overflows.
    pub fn join(
        &self,
        entry: &ScenarioEntry,
        lines: &[QuantityLine],
    ) -> Result<Vec<OutputRow>, BudgetError> {
        let mut rows = Vec::new();

        for line in lines {
            let record = self
                .rates
                .get(entry.intervention, &line.type_label, &line.unit)
                .ok_or_else(|| BudgetError::MissingCostRate {
                    intervention: entry.intervention,
                    type_label: line.type_label.clone(),
                    unit: line.unit.clone(),
                })?;

            let quantity = line.quantity.normalize();
            for currency in &self.currencies {
                let unit_cost = *record.rates.get(currency).ok_or_else(|| {
                    BudgetError::MissingCurrencyRate {
                        intervention: entry.intervention,
                        type_label: line.type_label.clone(),
                        unit: line.unit.clone(),
                        currency: currency.clone(),
                    }
                })?;
                let cost_element = quantity.checked_mul(unit_cost).ok_or_else(|| {
                    BudgetError::overflow(format!(
                        "{} {} cost in {currency}",
                        entry.intervention, line.unit
                    ))
                })?;

                rows.push(OutputRow {
                    adm1: entry.admin_unit.adm1.clone(),
                    adm2: entry.admin_unit.adm2.clone(),
                    year: entry.year,
                    scenario_name: entry.scenario_name.clone(),
                    scenario_description: entry.scenario_description.clone(),
                    code_intervention: entry.intervention,
                    intervention_nice: entry.intervention.display_name().to_string(),
                    type_intervention: line.type_label.clone(),
                    unit: line.unit.clone(),
                    cost_class: record.cost_class.clone(),
                    quantity,
                    currency: currency.clone(),
                    unit_cost,
                    cost_element: cost_element.normalize(),
                });
            }
        }

        Ok(rows)
    }
}
