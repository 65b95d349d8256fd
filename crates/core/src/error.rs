//! Budget engine error types.

use thiserror::Error;

use crate::costing::CurrencyCode;
use crate::scenario::{AdminUnit, InterventionCode};

/// Coarse classification of a [`BudgetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A setting makes a formula undefined or is out of range.
    Configuration,
    /// A referenced row is absent from a reference table.
    Lookup,
    /// The request or an input table is malformed.
    Validation,
}

/// Errors raised while quantifying and costing a budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Setting value is out of its allowed range.
    #[error("Invalid setting {setting}: {reason}")]
    InvalidSetting {
        /// Wire name of the setting.
        setting: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Setting is a recognised hook whose formula is not confirmed.
    #[error("Setting {setting} is not supported yet")]
    UnsupportedSetting {
        /// Wire name of the setting.
        setting: &'static str,
    },

    /// A quantity or cost exceeded the representable range.
    #[error("Arithmetic overflow while computing {context}")]
    ArithmeticOverflow {
        /// What was being computed.
        context: String,
    },

    /// No cost rate matches the (intervention, type, unit) key.
    #[error("No cost rate for intervention {intervention}, type {type_label}, unit {unit}")]
    MissingCostRate {
        /// Intervention code.
        intervention: InterventionCode,
        /// Active type label.
        type_label: String,
        /// Unit label.
        unit: String,
    },

    /// A cost rate matches the key but has no value in a selected currency.
    #[error(
        "No {currency} cost rate for intervention {intervention}, type {type_label}, unit {unit}"
    )]
    MissingCurrencyRate {
        /// Intervention code.
        intervention: InterventionCode,
        /// Active type label.
        type_label: String,
        /// Unit label.
        unit: String,
        /// Currency without a rate.
        currency: CurrencyCode,
    },

    /// Selected currency is not a column of the cost-rate table.
    #[error("Currency {0} has no cost rates")]
    UnsupportedCurrency(CurrencyCode),

    /// No population row for the admin unit and year.
    #[error("No population data for {admin_unit} in {year}")]
    MissingPopulation {
        /// Admin unit.
        admin_unit: AdminUnit,
        /// Year.
        year: i32,
    },

    /// Start year after end year.
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidYearRange {
        /// Start year.
        start: i32,
        /// End year.
        end: i32,
    },

    /// Year range wider than allowed.
    #[error("Year range {start}-{end} spans more than {max} years")]
    YearRangeTooLong {
        /// Start year.
        start: i32,
        /// End year.
        end: i32,
        /// Maximum number of years.
        max: u32,
    },

    /// Request lists no interventions.
    #[error("At least one intervention must be requested")]
    NoInterventions,

    /// Intervention name is not one of the known families.
    #[error("Unknown intervention: {0}")]
    UnknownIntervention(String),

    /// Place identifier is not `adm1:adm2`.
    #[error("Invalid place identifier: {0:?} (expected \"adm1:adm2\")")]
    InvalidPlace(String),

    /// Intervention requires a type label but none was given.
    #[error("Intervention {intervention} requires a type")]
    MissingType {
        /// Intervention code.
        intervention: InterventionCode,
    },

    /// Same place listed twice for one intervention.
    #[error("Place {admin_unit} listed more than once for {intervention}")]
    DuplicatePlace {
        /// Intervention code.
        intervention: InterventionCode,
        /// Admin unit.
        admin_unit: AdminUnit,
    },

    /// Scenario activates the same family twice for one admin unit and year.
    #[error("Duplicate scenario entry for {intervention} at {admin_unit} in {year}")]
    DuplicateScenarioEntry {
        /// Intervention code.
        intervention: InterventionCode,
        /// Admin unit.
        admin_unit: AdminUnit,
        /// Year.
        year: i32,
    },

    /// Population table holds two rows for one admin unit and year.
    #[error("Duplicate population row for {admin_unit} in {year}")]
    DuplicatePopulation {
        /// Admin unit.
        admin_unit: AdminUnit,
        /// Year.
        year: i32,
    },

    /// Cost-rate table holds two rows for one key.
    #[error("Duplicate cost rate for intervention {intervention}, type {type_label}, unit {unit}")]
    DuplicateCostRate {
        /// Intervention code.
        intervention: InterventionCode,
        /// Type label.
        type_label: String,
        /// Unit label.
        unit: String,
    },

    /// Case-management table holds two rows for one admin unit.
    #[error("Duplicate case-management row for {0}")]
    DuplicateCaseManagement(AdminUnit),

    /// Currency code is not three ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Input table carries a negative count.
    #[error("Negative {column} for {admin_unit}")]
    NegativeValue {
        /// Admin unit.
        admin_unit: AdminUnit,
        /// Column name.
        column: &'static str,
    },
}

impl BudgetError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSetting { .. }
            | Self::UnsupportedSetting { .. }
            | Self::ArithmeticOverflow { .. } => ErrorKind::Configuration,
            Self::MissingCostRate { .. }
            | Self::MissingCurrencyRate { .. }
            | Self::UnsupportedCurrency(_)
            | Self::MissingPopulation { .. } => ErrorKind::Lookup,
            Self::InvalidYearRange { .. }
            | Self::YearRangeTooLong { .. }
            | Self::NoInterventions
            | Self::UnknownIntervention(_)
            | Self::InvalidPlace(_)
            | Self::MissingType { .. }
            | Self::DuplicatePlace { .. }
            | Self::DuplicateScenarioEntry { .. }
            | Self::DuplicatePopulation { .. }
            | Self::DuplicateCostRate { .. }
            | Self::DuplicateCaseManagement(_)
            | Self::InvalidCurrency(_)
            | Self::NegativeValue { .. } => ErrorKind::Validation,
        }
    }

    /// Shorthand for an [`BudgetError::InvalidSetting`].
    pub(crate) fn invalid_setting(setting: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting,
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`BudgetError::ArithmeticOverflow`].
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        Self::ArithmeticOverflow {
            context: context.into(),
        }
    }
}
