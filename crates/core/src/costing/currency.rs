//! Currency codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BudgetError;

/// Upper-case three-letter currency code (`USD`, `NGN`, `CDF`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Suffix of cost-rate columns (`usd_cost`, `ngn_cost`).
    pub const COLUMN_SUFFIX: &'static str = "_cost";

    /// Parses a code, upper-casing it.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidCurrency` unless the input is three ASCII
    /// letters.
    pub fn parse(code: &str) -> Result<Self, BudgetError> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BudgetError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// US dollar, always reported.
    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Derives the currency from a cost-rate column header, e.g.
    /// `ngn_cost` -> `NGN`. Returns `None` for other headers.
    #[must_use]
    pub fn from_cost_column(header: &str) -> Option<Self> {
        header
            .trim()
            .strip_suffix(Self::COLUMN_SUFFIX)
            .and_then(|prefix| Self::parse(prefix).ok())
    }

    /// Returns the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cost_column() {
        assert_eq!(
            CurrencyCode::from_cost_column("usd_cost"),
            Some(CurrencyCode::usd())
        );
        assert_eq!(
            CurrencyCode::from_cost_column("ngn_cost").map(|c| c.to_string()),
            Some("NGN".to_string())
        );
        assert_eq!(CurrencyCode::from_cost_column("cost_class"), None);
        assert_eq!(CurrencyCode::from_cost_column("unit_cost"), None);
    }

    #[test]
    fn test_parse_rejects_non_codes() {
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("US1").is_err());
        assert!(CurrencyCode::parse("dollar").is_err());
    }
}
