//! PMC quantification.

use tracing::warn;

use super::iptp::UNIT_SP;
use super::provider::{QuantityContext, QuantityLine, QuantityProvider, product, sum};
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// SP doses for children under 2, merged into one `per SP` line.
///
/// `dose_0_1 = pop_0_1 * coverage * touchpoints * tablet_factor * buffer`
/// `dose_1_2 = pop_1_2 * coverage * touchpoints * tablet_factor * buffer * larger_dose_factor`
#[derive(Debug, Clone, Copy, Default)]
pub struct PmcQuantifier;

impl QuantityProvider for PmcQuantifier {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::Pmc
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let code = self.intervention();
        let settings = &ctx.settings.pmc;
        settings.validate()?;
        let type_label = ctx.type_label(code)?;
        let population = ctx.population()?;

        if let Some(status) = settings.underweight_status {
            warn!(
                admin_unit = %ctx.admin_unit,
                pmc_underweight_status = %status,
                "pmc_underweight_status has no effect on PMC quantities"
            );
        }

        let per_child = [
            settings.coverage,
            settings.touchpoints,
            settings.tablet_factor,
            settings.buffer,
        ];
        let per_child = product(code, &per_child)?;

        let infant_doses = product(code, &[population.pop_0_1, per_child])?;
        let toddler_doses = product(
            code,
            &[population.pop_1_2, per_child, settings.larger_dose_factor],
        )?;
        let doses = sum(code, infant_doses, toddler_doses)?;

        Ok(vec![QuantityLine::new(type_label, UNIT_SP, doses)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::PopulationRecord;
    use crate::scenario::AdminUnit;
    use crate::settings::BudgetSettings;
    use rust_decimal_macros::dec;

    fn quantify(
        pop_0_1: rust_decimal::Decimal,
        pop_1_2: rust_decimal::Decimal,
        settings: &BudgetSettings,
    ) -> Vec<QuantityLine> {
        let unit = AdminUnit::new("State A", "LGA 1");
        let pop = PopulationRecord {
            pop_0_1,
            pop_1_2,
            ..PopulationRecord::new(unit.clone(), 2025)
        };
        PmcQuantifier
            .quantify(&QuantityContext {
                admin_unit: &unit,
                year: 2025,
                type_label: Some("SP"),
                population: Some(&pop),
                settings,
            })
            .unwrap()
    }

    #[test]
    fn test_merged_cohorts() {
        let lines = quantify(dec!(200), dec!(200), &BudgetSettings::default());

        // 200*0.85*4*0.75*1.1 + 200*0.85*4*0.75*1.1*2 = 561 + 1122
        assert_eq!(lines, vec![QuantityLine::new("SP", UNIT_SP, dec!(1683))]);
    }

    #[test]
    fn test_larger_dose_applies_only_to_second_cohort() {
        let settings = BudgetSettings::default();

        assert_eq!(quantify(dec!(200), dec!(0), &settings)[0].quantity, dec!(561));
        assert_eq!(quantify(dec!(0), dec!(200), &settings)[0].quantity, dec!(1122));
    }

    #[test]
    fn test_underweight_status_does_not_change_doses() {
        let mut settings = BudgetSettings::default();
        settings.pmc.underweight_status = Some(dec!(0.5));

        assert_eq!(quantify(dec!(200), dec!(200), &settings)[0].quantity, dec!(1683));
    }
}
