//! Range checks for settings.
//!
//! Each family validates only its own group, so a bad value for an
//! intervention that is not deployed never fails a request.

use rust_decimal::Decimal;

use super::types::{
    BudgetSettings, IptpSettings, ItnCampaignSettings, ItnRoutineSettings, PmcSettings,
    SmcSettings, VaccineSettings,
};
use crate::costing::CurrencyCode;
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Rejects values that are zero or negative (divisors and buffers).
pub(crate) fn require_positive(setting: &'static str, value: Decimal) -> Result<(), BudgetError> {
    if value <= Decimal::ZERO {
        return Err(BudgetError::invalid_setting(
            setting,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects negative values (counts and factors).
pub(crate) fn require_non_negative(
    setting: &'static str,
    value: Decimal,
) -> Result<(), BudgetError> {
    if value < Decimal::ZERO {
        return Err(BudgetError::invalid_setting(
            setting,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects values outside `[0, 1]` (coverages and proportions).
pub(crate) fn require_fraction(setting: &'static str, value: Decimal) -> Result<(), BudgetError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(BudgetError::invalid_setting(
            setting,
            format!("must be between 0 and 1, got {value}"),
        ));
    }
    Ok(())
}

impl ItnCampaignSettings {
    /// Validates the ITN campaign group.
    pub fn validate(&self) -> Result<(), BudgetError> {
        require_fraction("itn_campaign_coverage", self.coverage)?;
        require_positive("itn_campaign_buffer", self.buffer)?;
        require_positive("itn_campaign_divisor", self.divisor)?;
        require_positive("itn_campaign_bale_size", self.bale_size)
    }
}

impl ItnRoutineSettings {
    /// Validates the ITN routine group.
    pub fn validate(&self) -> Result<(), BudgetError> {
        require_fraction("itn_routine_coverage", self.coverage)?;
        require_positive("itn_routine_buffer", self.buffer)
    }
}

impl IptpSettings {
    /// Validates the IPTp group.
    pub fn validate(&self) -> Result<(), BudgetError> {
        require_fraction("iptp_anc_coverage", self.anc_coverage)?;
        require_non_negative("iptp_doses_per_pw", self.doses_per_pw)?;
        require_positive("iptp_buffer", self.buffer)
    }
}

impl SmcSettings {
    /// Validates the SMC group.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::UnsupportedSetting` when the 5-10 year band is
    /// enabled.
    pub fn validate(&self) -> Result<(), BudgetError> {
        require_non_negative("smc_monthly_rounds", self.monthly_rounds)?;
        require_fraction("smc_pop_prop_3_11", self.pop_prop_3_11)?;
        require_fraction("smc_pop_prop_12_59", self.pop_prop_12_59)?;
        require_positive("smc_buffer", self.buffer)?;
        if self.include_5_10 {
            return Err(BudgetError::UnsupportedSetting {
                setting: "smc_include_5_10",
            });
        }
        Ok(())
    }
}

impl PmcSettings {
    /// Validates the PMC group.
    pub fn validate(&self) -> Result<(), BudgetError> {
        require_fraction("pmc_coverage", self.coverage)?;
        require_non_negative("pmc_touchpoints", self.touchpoints)?;
        require_non_negative("pmc_tablet_factor", self.tablet_factor)?;
        require_positive("pmc_buffer", self.buffer)?;
        require_non_negative("pmc_larger_dose_factor", self.larger_dose_factor)?;
        if let Some(status) = self.underweight_status {
            require_fraction("pmc_underweight_status", status)?;
        }
        Ok(())
    }
}

impl VaccineSettings {
    /// Validates the vaccination group.
    pub fn validate(&self) -> Result<(), BudgetError> {
        require_fraction("vacc_coverage", self.coverage)?;
        require_positive("vacc_wastage_offset", self.wastage_offset)?;
        require_non_negative("vacc_doses_per_child", self.doses_per_child)
    }
}

impl BudgetSettings {
    /// Validates the group used by one intervention family.
    ///
    /// Case management reads precomputed quantities and has no group.
    pub fn validate_for(&self, intervention: InterventionCode) -> Result<(), BudgetError> {
        match intervention {
            InterventionCode::ItnCampaign => self.itn_campaign.validate(),
            InterventionCode::ItnRoutine => self.itn_routine.validate(),
            InterventionCode::Iptp => self.iptp.validate(),
            InterventionCode::Smc => self.smc.validate(),
            InterventionCode::Pmc => self.pmc.validate(),
            InterventionCode::Vacc => self.vaccine.validate(),
            InterventionCode::CmPublic => Ok(()),
        }
    }

    /// Validates every group and the currency selection.
    pub fn validate(&self) -> Result<(), BudgetError> {
        for intervention in InterventionCode::ALL {
            self.validate_for(intervention)?;
        }
        self.local_currency().map(|_| ())
    }

    /// Parses the selected local currency, if any.
    pub fn local_currency(&self) -> Result<Option<CurrencyCode>, BudgetError> {
        self.currency.as_deref().map(CurrencyCode::parse).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BudgetSettings::default().validate().is_ok());
    }

    #[rstest]
    #[case::zero_divisor(
        |s: &mut BudgetSettings| s.itn_campaign.divisor = Decimal::ZERO,
        "itn_campaign_divisor"
    )]
    #[case::zero_bale_size(
        |s: &mut BudgetSettings| s.itn_campaign.bale_size = Decimal::ZERO,
        "itn_campaign_bale_size"
    )]
    #[case::zero_buffer(
        |s: &mut BudgetSettings| s.iptp.buffer = Decimal::ZERO,
        "iptp_buffer"
    )]
    #[case::coverage_above_one(
        |s: &mut BudgetSettings| s.vaccine.coverage = dec!(1.2),
        "vacc_coverage"
    )]
    #[case::negative_rounds(
        |s: &mut BudgetSettings| s.smc.monthly_rounds = dec!(-1),
        "smc_monthly_rounds"
    )]
    #[case::negative_dose_factor(
        |s: &mut BudgetSettings| s.pmc.larger_dose_factor = dec!(-2),
        "pmc_larger_dose_factor"
    )]
    fn test_invalid_values_rejected(
        #[case] mutate: fn(&mut BudgetSettings),
        #[case] expected: &str,
    ) {
        let mut settings = BudgetSettings::default();
        mutate(&mut settings);

        match settings.validate() {
            Err(BudgetError::InvalidSetting { setting, .. }) => assert_eq!(setting, expected),
            other => panic!("expected InvalidSetting for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_include_5_10_is_unsupported() {
        let mut settings = BudgetSettings::default();
        settings.smc.include_5_10 = true;

        assert_eq!(
            settings.validate_for(InterventionCode::Smc),
            Err(BudgetError::UnsupportedSetting {
                setting: "smc_include_5_10"
            })
        );
        assert!(settings.validate_for(InterventionCode::Iptp).is_ok());
    }

    #[test]
    fn test_validation_scoped_to_family() {
        let mut settings = BudgetSettings::default();
        settings.itn_campaign.divisor = Decimal::ZERO;

        assert!(settings.validate_for(InterventionCode::Vacc).is_ok());
        assert!(settings.validate_for(InterventionCode::CmPublic).is_ok());
        assert!(settings.validate_for(InterventionCode::ItnCampaign).is_err());
    }

    #[test]
    fn test_local_currency() {
        let mut settings = BudgetSettings::default();
        assert_eq!(settings.local_currency(), Ok(None));

        settings.currency = Some("ngn".into());
        assert_eq!(
            settings.local_currency(),
            Ok(Some(CurrencyCode::parse("NGN").unwrap()))
        );

        settings.currency = Some("naira".into());
        assert_eq!(
            settings.local_currency(),
            Err(BudgetError::InvalidCurrency("naira".into()))
        );
    }
}
