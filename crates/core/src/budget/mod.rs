//! Budget assembly and year aggregation.
//!
//! [`generate_budget`] costs one scenario table; [`get_budget`] turns a
//! [`BudgetRequest`] into a scenario per year and concatenates the results.

pub mod aggregator;
pub mod assembler;
pub mod request;
pub mod summary;


pub use aggregator::{CountryDatasets, get_budget};
pub use assembler::{BudgetAssembler, generate_budget};
pub use request::{
    BudgetPlan, BudgetRequest, InterventionRequest, MAX_YEAR_SPAN, PlannedIntervention,
    REQUEST_SCENARIO_NAME, build_scenario,
};
pub use summary::BudgetSummary;
