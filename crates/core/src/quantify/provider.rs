//! The quantity-provider seam and its registry.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{
    CaseManagementProvider, CaseManagementTable, IptpQuantifier, ItnCampaignQuantifier,
    ItnRoutineQuantifier, PmcQuantifier, SmcQuantifier, VaccineQuantifier,
};
use crate::error::BudgetError;
use crate::population::PopulationRecord;
use crate::scenario::{AdminUnit, InterventionCode};
use crate::settings::BudgetSettings;

/// A quantity of one unit of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityLine {
    /// Type the unit is costed under.
    pub type_label: String,
    /// Unit label, matching the cost-rate table.
    pub unit: String,
    /// Quantity, never negative.
    pub quantity: Decimal,
}

impl QuantityLine {
    /// Creates a line.
    #[must_use]
    pub fn new(type_label: impl Into<String>, unit: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            type_label: type_label.into(),
            unit: unit.into(),
            quantity,
        }
    }
}

/// Inputs for quantifying one scenario entry.
#[derive(Debug, Clone, Copy)]
pub struct QuantityContext<'a> {
    /// Admin unit being quantified.
    pub admin_unit: &'a AdminUnit,
    /// Year being quantified.
    pub year: i32,
    /// Active type, if the scenario names one.
    pub type_label: Option<&'a str>,
    /// Population row for the admin unit and year, if any.
    pub population: Option<&'a PopulationRecord>,
    /// Request settings.
    pub settings: &'a BudgetSettings,
}

impl<'a> QuantityContext<'a> {
    /// Returns the population row.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MissingPopulation` if the admin unit has no row
    /// for the year.
    pub fn population(&self) -> Result<&'a PopulationRecord, BudgetError> {
        self.population.ok_or_else(|| BudgetError::MissingPopulation {
            admin_unit: self.admin_unit.clone(),
            year: self.year,
        })
    }

    /// Returns the active type for a family that requires one.
    pub fn type_label(&self, intervention: InterventionCode) -> Result<&'a str, BudgetError> {
        self.type_label
            .ok_or(BudgetError::MissingType { intervention })
    }
}

/// Computes the quantities of one intervention family.
///
/// Implementations are pure: same context, same lines.
pub trait QuantityProvider: Send + Sync {
    /// Family this provider quantifies.
    fn intervention(&self) -> InterventionCode;

    /// Quantifies one scenario entry, one line per unit.
    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError>;
}

/// Maps each intervention family to its provider.
#[derive(Default)]
pub struct QuantifierRegistry<'a> {
    providers: BTreeMap<InterventionCode, Box<dyn QuantityProvider + 'a>>,
}

impl<'a> QuantifierRegistry<'a> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every standard family, reading case-management
    /// quantities from `case_management`.
    #[must_use]
    pub fn standard(case_management: &'a CaseManagementTable) -> Self {
        let mut registry = Self::new();
        registry
            .register(ItnCampaignQuantifier)
            .register(ItnRoutineQuantifier)
            .register(IptpQuantifier)
            .register(SmcQuantifier)
            .register(PmcQuantifier)
            .register(VaccineQuantifier)
            .register(CaseManagementProvider::new(case_management));
        registry
    }

    /// Registers a provider, replacing any previous one for its family.
    pub fn register(&mut self, provider: impl QuantityProvider + 'a) -> &mut Self {
        self.providers
            .insert(provider.intervention(), Box::new(provider));
        self
    }

    /// Resolves the provider for a family.
    #[must_use]
    pub fn get(&self, intervention: InterventionCode) -> Option<&(dyn QuantityProvider + 'a)> {
        self.providers.get(&intervention).map(|provider| &**provider)
    }

    /// Families with a provider.
    pub fn interventions(&self) -> impl Iterator<Item = InterventionCode> + '_ {
        self.providers.keys().copied()
    }
}

/// Multiplies factors, failing instead of panicking on overflow.
pub(crate) fn product(
    intervention: InterventionCode,
    factors: &[Decimal],
) -> Result<Decimal, BudgetError> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or_else(|| BudgetError::overflow(format!("{intervention} quantity")))
}

/// Divides, failing on a zero divisor or overflow.
pub(crate) fn quotient(
    intervention: InterventionCode,
    setting: &'static str,
    numerator: Decimal,
    divisor: Decimal,
) -> Result<Decimal, BudgetError> {
    if divisor.is_zero() {
        return Err(BudgetError::invalid_setting(
            setting,
            "must be greater than zero, got 0",
        ));
    }
    numerator
        .checked_div(divisor)
        .ok_or_else(|| BudgetError::overflow(format!("{intervention} quantity")))
}

/// Adds, failing on overflow.
pub(crate) fn sum(
    intervention: InterventionCode,
    left: Decimal,
    right: Decimal,
) -> Result<Decimal, BudgetError> {
    left.checked_add(right)
        .ok_or_else(|| BudgetError::overflow(format!("{intervention} quantity")))
}
