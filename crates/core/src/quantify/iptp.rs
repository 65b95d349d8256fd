//! IPTp quantification.

use super::provider::{QuantityContext, QuantityLine, QuantityProvider, product};
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Unit for SP doses.
pub const UNIT_SP: &str = "per SP";

/// SP doses for pregnant women attending antenatal care.
///
/// `doses = pop_pw * anc_coverage * doses_per_pw * buffer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IptpQuantifier;

impl QuantityProvider for IptpQuantifier {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::Iptp
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let code = self.intervention();
        let settings = &ctx.settings.iptp;
        settings.validate()?;
        let type_label = ctx.type_label(code)?;
        let population = ctx.population()?;

        let doses = product(
            code,
            &[
                population.pop_pw,
                settings.anc_coverage,
                settings.doses_per_pw,
                settings.buffer,
            ],
        )?;

        Ok(vec![QuantityLine::new(type_label, UNIT_SP, doses)])
    }
}
