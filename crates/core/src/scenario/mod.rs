//! Admin units, intervention families and scenario tables.

pub mod admin_unit;
pub mod intervention;
pub mod table;

pub use admin_unit::AdminUnit;
pub use intervention::InterventionCode;
pub use table::{InterventionSlot, ScenarioEntry, ScenarioRow, ScenarioTable};
