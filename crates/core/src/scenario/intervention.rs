//! Intervention families.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// An intervention family, as named on the wire and in cost-rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCode {
    /// Mass insecticide-treated net campaign.
    ItnCampaign,
    /// Routine net distribution (ANC and EPI channels).
    ItnRoutine,
    /// Intermittent preventive treatment in pregnancy.
    Iptp,
    /// Seasonal malaria chemoprevention.
    Smc,
    /// Perennial malaria chemoprevention.
    Pmc,
    /// Malaria vaccination.
    Vacc,
    /// Public-sector case management.
    CmPublic,
}

impl InterventionCode {
    /// Every family, in output order.
    pub const ALL: [Self; 7] = [
        Self::ItnCampaign,
        Self::ItnRoutine,
        Self::Iptp,
        Self::Smc,
        Self::Pmc,
        Self::Vacc,
        Self::CmPublic,
    ];

    /// Wire and cost-table code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ItnCampaign => "itn_campaign",
            Self::ItnRoutine => "itn_routine",
            Self::Iptp => "iptp",
            Self::Smc => "smc",
            Self::Pmc => "pmc",
            Self::Vacc => "vacc",
            Self::CmPublic => "cm_public",
        }
    }

    /// Human-readable name (`intervention_nice` column).
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ItnCampaign => "ITN Campaign",
            Self::ItnRoutine => "ITN Routine",
            Self::Iptp => "IPTp",
            Self::Smc => "SMC",
            Self::Pmc => "PMC",
            Self::Vacc => "Malaria Vaccine",
            Self::CmPublic => "Case Management (Public)",
        }
    }

    /// Whether a product/regimen type must be named to deploy the family.
    ///
    /// Case management takes its types from the precomputed commodity
    /// columns instead.
    #[must_use]
    pub const fn requires_type(self) -> bool {
        !matches!(self, Self::CmPublic)
    }
}

impl fmt::Display for InterventionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionCode {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s.trim())
            .ok_or_else(|| BudgetError::UnknownIntervention(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_every_code() {
        for code in InterventionCode::ALL {
            assert_eq!(code.as_str().parse::<InterventionCode>(), Ok(code));
        }
    }

    #[test]
    fn test_serde_matches_wire_code() {
        let json = serde_json::to_string(&InterventionCode::CmPublic).unwrap();
        assert_eq!(json, "\"cm_public\"");
        let code: InterventionCode = serde_json::from_str("\"itn_campaign\"").unwrap();
        assert_eq!(code, InterventionCode::ItnCampaign);
    }

    #[test]
    fn test_unknown_intervention() {
        assert_eq!(
            "irs".parse::<InterventionCode>(),
            Err(BudgetError::UnknownIntervention("irs".into()))
        );
    }

    #[test]
    fn test_only_case_management_is_typeless() {
        let typeless: Vec<_> = InterventionCode::ALL
            .into_iter()
            .filter(|code| !code.requires_type())
            .collect();
        assert_eq!(typeless, vec![InterventionCode::CmPublic]);
    }
}
