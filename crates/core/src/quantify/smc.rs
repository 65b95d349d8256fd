//! SMC quantification.

use super::provider::{QuantityContext, QuantityLine, QuantityProvider, product};
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Unit for packs given to children aged 3 to 11 months.
pub const UNIT_PACK_3_11: &str = "per SPAQ pack 3-11 month olds";
/// Unit for packs given to children aged 12 to 59 months.
pub const UNIT_PACK_12_59: &str = "per SPAQ pack 12-59 month olds";

/// Monthly SMC packs, one line per age band.
///
/// `packs = pop_0_5 * band_proportion * monthly_rounds * buffer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmcQuantifier;

impl QuantityProvider for SmcQuantifier {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::Smc
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let code = self.intervention();
        let settings = &ctx.settings.smc;
        settings.validate()?;
        let type_label = ctx.type_label(code)?;
        let population = ctx.population()?;

        let bands = [
            (UNIT_PACK_3_11, settings.pop_prop_3_11),
            (UNIT_PACK_12_59, settings.pop_prop_12_59),
        ];

        bands
            .into_iter()
            .map(|(unit, proportion)| {
                let packs = product(
                    code,
                    &[
                        population.pop_0_5,
                        proportion,
                        settings.monthly_rounds,
                        settings.buffer,
                    ],
                )?;
                Ok(QuantityLine::new(type_label, unit, packs))
            })
            .collect()
    }
}
