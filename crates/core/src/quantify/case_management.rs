//! Public-sector case management.
//!
//! Quantities come precomputed per admin unit from the country's
//! case-management dataset, so this provider reads a table rather than
//! applying a formula.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::provider::{QuantityContext, QuantityLine, QuantityProvider};
use crate::error::BudgetError;
use crate::scenario::{AdminUnit, InterventionCode};

/// One commodity column of the case-management dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseManagementUnit {
    /// Rapid diagnostic test kits.
    RdtKits,
    /// Artemether-lumefantrine treatment packs.
    ActPacks,
    /// Injectable artesunate.
    IvArtesunate,
    /// Rectal artesunate.
    Ras,
}

impl CaseManagementUnit {
    /// Every commodity, in output order.
    pub const ALL: [Self; 4] = [Self::RdtKits, Self::ActPacks, Self::IvArtesunate, Self::Ras];

    /// Dataset column holding the quantity.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::RdtKits => "cm_rdt_kit_quantity",
            Self::ActPacks => "cm_act_packs_quantity",
            Self::IvArtesunate => "cm_iv_artesunate_quantity",
            Self::Ras => "cm_ras_quantity",
        }
    }

    /// Type the commodity is costed under.
    #[must_use]
    pub const fn type_label(self) -> &'static str {
        match self {
            Self::RdtKits => "RDT kits",
            Self::ActPacks => "AL",
            Self::IvArtesunate => "Artesunate injections",
            Self::Ras => "RAS",
        }
    }

    /// Unit the commodity is costed per.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::RdtKits => "per RDT kit",
            Self::ActPacks => "per AL",
            Self::IvArtesunate => "per 60mg powder",
            Self::Ras => "per RAS",
        }
    }
}

/// Precomputed commodity quantities for one admin unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseManagementRecord {
    /// Admin unit.
    pub admin_unit: AdminUnit,
    /// Rapid diagnostic test kits.
    pub rdt_kits: Decimal,
    /// ACT packs.
    pub act_packs: Decimal,
    /// Injectable artesunate vials.
    pub iv_artesunate: Decimal,
    /// Rectal artesunate.
    pub ras: Decimal,
}

impl CaseManagementRecord {
    /// Creates a record with every quantity set to zero.
    #[must_use]
    pub fn new(admin_unit: AdminUnit) -> Self {
        Self {
            admin_unit,
            rdt_kits: Decimal::ZERO,
            act_packs: Decimal::ZERO,
            iv_artesunate: Decimal::ZERO,
            ras: Decimal::ZERO,
        }
    }

    /// Quantity of one commodity.
    #[must_use]
    pub const fn quantity(&self, unit: CaseManagementUnit) -> Decimal {
        match unit {
            CaseManagementUnit::RdtKits => self.rdt_kits,
            CaseManagementUnit::ActPacks => self.act_packs,
            CaseManagementUnit::IvArtesunate => self.iv_artesunate,
            CaseManagementUnit::Ras => self.ras,
        }
    }
}

/// Case-management quantities keyed by admin unit.
#[derive(Debug, Clone, Default)]
pub struct CaseManagementTable {
    records: HashMap<AdminUnit, CaseManagementRecord>,
}

impl CaseManagementTable {
    /// Builds the table.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeValue` for a negative quantity and
    /// `BudgetError::DuplicateCaseManagement` when an admin unit appears twice.
    pub fn new(records: Vec<CaseManagementRecord>) -> Result<Self, BudgetError> {
        let mut by_unit = HashMap::with_capacity(records.len());
        for record in records {
            for unit in CaseManagementUnit::ALL {
                if record.quantity(unit) < Decimal::ZERO {
                    return Err(BudgetError::NegativeValue {
                        admin_unit: record.admin_unit.clone(),
                        column: unit.column(),
                    });
                }
            }
            if by_unit.contains_key(&record.admin_unit) {
                return Err(BudgetError::DuplicateCaseManagement(record.admin_unit));
            }
            by_unit.insert(record.admin_unit.clone(), record);
        }
        Ok(Self { records: by_unit })
    }

    /// Record for an admin unit.
    #[must_use]
    pub fn get(&self, admin_unit: &AdminUnit) -> Option<&CaseManagementRecord> {
        self.records.get(admin_unit)
    }

    /// Number of admin units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Emits one line per commodity from a [`CaseManagementTable`].
///
/// Quantities do not vary by year. An admin unit absent from the table gets
/// zero-quantity lines.
#[derive(Debug, Clone, Copy)]
pub struct CaseManagementProvider<'a> {
    table: &'a CaseManagementTable,
}

impl<'a> CaseManagementProvider<'a> {
    /// Creates a provider over `table`.
    #[must_use]
    pub const fn new(table: &'a CaseManagementTable) -> Self {
        Self { table }
    }
}

impl QuantityProvider for CaseManagementProvider<'_> {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::CmPublic
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let record = self.table.get(ctx.admin_unit);
        Ok(CaseManagementUnit::ALL
            .into_iter()
            .map(|unit| {
                let quantity = record.map_or(Decimal::ZERO, |r| r.quantity(unit));
                QuantityLine::new(unit.type_label(), unit.unit(), quantity)
            })
            .collect())
    }
}
