//! Cost totals over an output table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::costing::{CurrencyCode, OutputRow};
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Totals of `cost_element` by currency and by intervention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Number of rows summarised.
    pub row_count: usize,
    /// Total per currency.
    pub totals: BTreeMap<CurrencyCode, Decimal>,
    /// Total per intervention, then currency.
    pub by_intervention: BTreeMap<InterventionCode, BTreeMap<CurrencyCode, Decimal>>,
}

impl BudgetSummary {
    /// Sums an output table.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ArithmeticOverflow` if a total overflows.
    pub fn from_rows(rows: &[OutputRow]) -> Result<Self, BudgetError> {
        let mut summary = Self {
            row_count: rows.len(),
            ..Self::default()
        };

        for row in rows {
            accumulate(&mut summary.totals, &row.currency, row.cost_element)?;
            accumulate(
                summary.by_intervention.entry(row.code_intervention).or_default(),
                &row.currency,
                row.cost_element,
            )?;
        }

        Ok(summary)
    }

    /// Total in one currency, zero if absent.
    #[must_use]
    pub fn total(&self, currency: &CurrencyCode) -> Decimal {
        self.totals.get(currency).copied().unwrap_or_default()
    }
}

fn accumulate(
    totals: &mut BTreeMap<CurrencyCode, Decimal>,
    currency: &CurrencyCode,
    amount: Decimal,
) -> Result<(), BudgetError> {
    let total = totals.entry(currency.clone()).or_default();
    *total = total
        .checked_add(amount)
        .ok_or_else(|| BudgetError::overflow(format!("{currency} total")))?;
    Ok(())
}
