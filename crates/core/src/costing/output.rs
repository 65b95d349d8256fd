//! The canonical output row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyCode;
use crate::scenario::InterventionCode;

/// One quantity costed in one currency.
///
/// `cost_element == quantity * unit_cost` and `quantity >= 0`. No two rows of
/// a budget share (adm1, adm2, year, code_intervention, unit, currency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// First-level admin unit.
    pub adm1: String,
    /// Second-level admin unit.
    pub adm2: String,
    /// Year.
    pub year: i32,
    /// Scenario name.
    pub scenario_name: String,
    /// Scenario description.
    pub scenario_description: String,
    /// Intervention code.
    pub code_intervention: InterventionCode,
    /// Intervention display name.
    pub intervention_nice: String,
    /// Product/regimen type.
    pub type_intervention: String,
    /// Unit label.
    pub unit: String,
    /// Cost class.
    pub cost_class: String,
    /// Quantity of units.
    pub quantity: Decimal,
    /// Currency of `unit_cost` and `cost_element`.
    pub currency: CurrencyCode,
    /// Rate per unit.
    pub unit_cost: Decimal,
    /// `quantity * unit_cost`.
    pub cost_element: Decimal,
}
