//! Two-level administrative unit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// An administrative unit identified by its `adm1` and `adm2` names.
///
/// Used as the join key across population, scenario and case-management
/// tables. Requests address it as `"adm1:adm2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdminUnit {
    /// First-level unit (region, state, province).
    pub adm1: String,
    /// Second-level unit (district, LGA, health zone).
    pub adm2: String,
}

impl AdminUnit {
    /// Creates an admin unit from its two names.
    #[must_use]
    pub fn new(adm1: impl Into<String>, adm2: impl Into<String>) -> Self {
        Self {
            adm1: adm1.into(),
            adm2: adm2.into(),
        }
    }
}

impl fmt::Display for AdminUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.adm1, self.adm2)
    }
}

impl FromStr for AdminUnit {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BudgetError::InvalidPlace(s.to_string());

        let (adm1, adm2) = s.split_once(':').ok_or_else(invalid)?;
        let (adm1, adm2) = (adm1.trim(), adm2.trim());
        if adm1.is_empty() || adm2.is_empty() || adm2.contains(':') {
            return Err(invalid());
        }

        Ok(Self::new(adm1, adm2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_place() {
        let unit: AdminUnit = "Tshopo:Opala".parse().unwrap();
        assert_eq!(unit, AdminUnit::new("Tshopo", "Opala"));
        assert_eq!(unit.to_string(), "Tshopo:Opala");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let unit: AdminUnit = " State A : LGA 1 ".parse().unwrap();
        assert_eq!(unit, AdminUnit::new("State A", "LGA 1"));
    }

    #[rstest]
    #[case("Tshopo")]
    #[case(":Opala")]
    #[case("Tshopo:")]
    #[case("a:b:c")]
    #[case("")]
    fn test_parse_rejects_malformed(#[case] input: &str) {
        assert_eq!(
            input.parse::<AdminUnit>(),
            Err(BudgetError::InvalidPlace(input.to_string()))
        );
    }
}
