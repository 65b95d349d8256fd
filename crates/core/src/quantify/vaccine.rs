//! Malaria vaccine quantification.

use super::provider::{QuantityContext, QuantityLine, QuantityProvider, product};
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Unit for vaccine doses.
pub const UNIT_DOSE: &str = "per dose";

/// Doses for the 5-36 month cohort.
///
/// `doses = cohort * coverage * wastage_offset * doses_per_child`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaccineQuantifier;

impl QuantityProvider for VaccineQuantifier {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::Vacc
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let code = self.intervention();
        let settings = &ctx.settings.vaccine;
        settings.validate()?;
        let type_label = ctx.type_label(code)?;
        let population = ctx.population()?;

        let doses = product(
            code,
            &[
                population.pop_vaccine_5_36_months,
                settings.coverage,
                settings.wastage_offset,
                settings.doses_per_child,
            ],
        )?;

        Ok(vec![QuantityLine::new(type_label, UNIT_DOSE, doses)])
    }
}
