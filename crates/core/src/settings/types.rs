//! Settings data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every tunable parameter for one budget request.
///
/// Read-only for the duration of a computation; quantifiers borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// ITN mass campaign.
    #[serde(flatten)]
    pub itn_campaign: ItnCampaignSettings,
    /// ITN routine distribution.
    #[serde(flatten)]
    pub itn_routine: ItnRoutineSettings,
    /// IPTp.
    #[serde(flatten)]
    pub iptp: IptpSettings,
    /// SMC.
    #[serde(flatten)]
    pub smc: SmcSettings,
    /// PMC.
    #[serde(flatten)]
    pub pmc: PmcSettings,
    /// Vaccination.
    #[serde(flatten)]
    pub vaccine: VaccineSettings,
    /// Local currency to report next to USD. `None` reports every currency
    /// the cost-rate table carries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// ITN mass campaign settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItnCampaignSettings {
    /// Target coverage of the total population.
    #[serde(rename = "itn_campaign_coverage")]
    pub coverage: Decimal,
    /// Safety-stock multiplier.
    #[serde(rename = "itn_campaign_buffer")]
    pub buffer: Decimal,
    /// People covered per net.
    #[serde(
        rename = "itn_campaign_divisor",
        alias = "itn_campaign_net_needed_radio"
    )]
    pub divisor: Decimal,
    /// Nets per bale.
    #[serde(
        rename = "itn_campaign_bale_size",
        alias = "itn_campaign_nets_per_bale"
    )]
    pub bale_size: Decimal,
}

impl Default for ItnCampaignSettings {
    fn default() -> Self {
        Self {
            coverage: Decimal::new(8, 1),
            buffer: Decimal::new(11, 1),
            divisor: Decimal::new(18, 1),
            bale_size: Decimal::new(50, 0),
        }
    }
}

/// ITN routine distribution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItnRoutineSettings {
    /// Coverage of pregnant women and children under 5.
    #[serde(rename = "itn_routine_coverage")]
    pub coverage: Decimal,
    /// Safety-stock multiplier.
    #[serde(rename = "itn_routine_buffer")]
    pub buffer: Decimal,
}

impl Default for ItnRoutineSettings {
    fn default() -> Self {
        Self {
            coverage: Decimal::new(3, 1),
            buffer: Decimal::new(11, 1),
        }
    }
}

/// IPTp settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IptpSettings {
    /// Antenatal care attendance rate.
    #[serde(rename = "iptp_anc_coverage", alias = "iptp_ANC_coverage")]
    pub anc_coverage: Decimal,
    /// SP doses per pregnant woman.
    #[serde(rename = "iptp_doses_per_pw")]
    pub doses_per_pw: Decimal,
    /// Safety-stock multiplier.
    #[serde(rename = "iptp_buffer")]
    pub buffer: Decimal,
}

impl Default for IptpSettings {
    fn default() -> Self {
        Self {
            anc_coverage: Decimal::new(8, 1),
            doses_per_pw: Decimal::new(3, 0),
            buffer: Decimal::new(11, 1),
        }
    }
}

/// SMC settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmcSettings {
    /// Monthly cycles per season.
    #[serde(rename = "smc_monthly_rounds")]
    pub monthly_rounds: Decimal,
    /// Share of under-5s aged 3 to 11 months.
    #[serde(rename = "smc_pop_prop_3_11")]
    pub pop_prop_3_11: Decimal,
    /// Share of under-5s aged 12 to 59 months.
    #[serde(rename = "smc_pop_prop_12_59")]
    pub pop_prop_12_59: Decimal,
    /// Safety-stock multiplier.
    #[serde(rename = "smc_buffer")]
    pub buffer: Decimal,
    /// Extend eligibility to children aged 5 to 10.
    ///
    /// The quantity formula for the extra band is unconfirmed, so enabling
    /// it is rejected.
    #[serde(rename = "smc_include_5_10")]
    pub include_5_10: bool,
}

impl Default for SmcSettings {
    fn default() -> Self {
        Self {
            monthly_rounds: Decimal::new(4, 0),
            pop_prop_3_11: Decimal::new(18, 2),
            pop_prop_12_59: Decimal::new(77, 2),
            buffer: Decimal::new(11, 1),
            include_5_10: false,
        }
    }
}

/// PMC settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PmcSettings {
    /// Coverage of eligible children.
    #[serde(rename = "pmc_coverage")]
    pub coverage: Decimal,
    /// Health-system contacts at which a dose is given.
    #[serde(rename = "pmc_touchpoints")]
    pub touchpoints: Decimal,
    /// SP tablets per dose for the youngest cohort.
    #[serde(rename = "pmc_tablet_factor")]
    pub tablet_factor: Decimal,
    /// Safety-stock multiplier.
    #[serde(rename = "pmc_buffer")]
    pub buffer: Decimal,
    /// Dose multiplier for the 1-2 year cohort.
    #[serde(rename = "pmc_larger_dose_factor")]
    pub larger_dose_factor: Decimal,
    /// Share of children dosed by weight band. Accepted but not yet part of
    /// the dose formula.
    #[serde(
        rename = "pmc_underweight_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub underweight_status: Option<Decimal>,
}

impl Default for PmcSettings {
    fn default() -> Self {
        Self {
            coverage: Decimal::new(85, 2),
            touchpoints: Decimal::new(4, 0),
            tablet_factor: Decimal::new(75, 2),
            buffer: Decimal::new(11, 1),
            larger_dose_factor: Decimal::new(2, 0),
            underweight_status: None,
        }
    }
}

/// Vaccination settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccineSettings {
    /// Coverage of the eligible cohort.
    #[serde(rename = "vacc_coverage")]
    pub coverage: Decimal,
    /// Wastage multiplier.
    #[serde(rename = "vacc_wastage_offset")]
    pub wastage_offset: Decimal,
    /// Doses in the schedule.
    #[serde(rename = "vacc_doses_per_child")]
    pub doses_per_child: Decimal,
}

impl Default for VaccineSettings {
    fn default() -> Self {
        Self {
            coverage: Decimal::new(84, 2),
            wastage_offset: Decimal::new(11, 1),
            doses_per_child: Decimal::new(4, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_match_reference_fixture() {
        let settings = BudgetSettings::default();

        assert_eq!(settings.itn_campaign.coverage, dec!(0.8));
        assert_eq!(settings.itn_campaign.divisor, dec!(1.8));
        assert_eq!(settings.itn_campaign.bale_size, dec!(50));
        assert_eq!(settings.itn_routine.coverage, dec!(0.3));
        assert_eq!(settings.iptp.doses_per_pw, dec!(3));
        assert_eq!(settings.smc.pop_prop_3_11, dec!(0.18));
        assert_eq!(settings.smc.pop_prop_12_59, dec!(0.77));
        assert!(!settings.smc.include_5_10);
        assert_eq!(settings.pmc.coverage, dec!(0.85));
        assert_eq!(settings.pmc.tablet_factor, dec!(0.75));
        assert_eq!(settings.vaccine.coverage, dec!(0.84));
        assert_eq!(settings.currency, None);
    }

    #[test]
    fn test_partial_flat_settings_keep_defaults() {
        let settings: BudgetSettings = serde_json::from_str(
            r#"{"smc_buffer": 1.5, "vacc_doses_per_child": 4, "currency": "NGN"}"#,
        )
        .unwrap();

        assert_eq!(settings.smc.buffer, dec!(1.5));
        assert_eq!(settings.vaccine.doses_per_child, dec!(4));
        assert_eq!(settings.currency.as_deref(), Some("NGN"));
        assert_eq!(settings.smc.monthly_rounds, dec!(4));
        assert_eq!(settings.itn_campaign, ItnCampaignSettings::default());
    }

    #[test]
    fn test_legacy_aliases() {
        let settings: BudgetSettings = serde_json::from_str(
            r#"{
                "itn_campaign_net_needed_radio": 2,
                "itn_campaign_nets_per_bale": 40,
                "iptp_ANC_coverage": 0.7,
                "smc_include_5_10": false,
                "pmc_underweight_status": 0.75
            }"#,
        )
        .unwrap();

        assert_eq!(settings.itn_campaign.divisor, dec!(2));
        assert_eq!(settings.itn_campaign.bale_size, dec!(40));
        assert_eq!(settings.iptp.anc_coverage, dec!(0.7));
        assert_eq!(settings.pmc.underweight_status, Some(dec!(0.75)));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings: BudgetSettings =
            serde_json::from_str(r#"{"smc_coverage": 1, "irs_buffer": 2}"#).unwrap();

        assert_eq!(settings, BudgetSettings::default());
    }
}
