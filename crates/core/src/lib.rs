//! Core budget engine for SNT malaria budgeting.
//!
//! This crate contains the pure quantification and costing logic with ZERO
//! web or storage dependencies. Reference datasets arrive as in-memory tables;
//! results leave as [`OutputRow`]s.
//!
//! # Modules
//!
//! - `scenario` - Admin units, intervention families and scenario tables
//! - `population` - Population subsets by admin unit and year
//! - `settings` - Typed formula parameters and their validation
//! - `quantify` - Per-intervention quantity providers and their registry
//! - `costing` - Cost rates, currencies and the quantity-to-cost join
//! - `budget` - Scenario assembly, year aggregation and request handling

pub mod budget;
pub mod costing;
pub mod error;
pub mod population;
pub mod quantify;
pub mod scenario;
pub mod settings;

pub use budget::{
    BudgetAssembler, BudgetPlan, BudgetRequest, BudgetSummary, CountryDatasets,
    InterventionRequest, build_scenario, generate_budget, get_budget,
};
pub use costing::{CostJoiner, CostRateRecord, CostRateTable, CurrencyCode, OutputRow};
pub use error::{BudgetError, ErrorKind};
pub use population::{PopulationRecord, PopulationTable};
pub use quantify::{
    CaseManagementProvider, CaseManagementRecord, CaseManagementTable, CaseManagementUnit,
    QuantifierRegistry, QuantityContext, QuantityLine, QuantityProvider,
};
pub use scenario::{AdminUnit, InterventionCode, ScenarioEntry, ScenarioRow, ScenarioTable};
pub use settings::BudgetSettings;
