//! Insecticide-treated net quantification.

use super::provider::{QuantityContext, QuantityLine, QuantityProvider, product, quotient, sum};
use crate::error::BudgetError;
use crate::scenario::InterventionCode;

/// Unit for single nets.
pub const UNIT_NET: &str = "per ITN";
/// Unit for bales of nets.
pub const UNIT_BALE: &str = "per bale";

/// Mass campaign: one net per `divisor` people covered, plus bales.
///
/// `nets = pop_total * coverage * buffer / divisor`, `bales = nets / bale_size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItnCampaignQuantifier;

impl QuantityProvider for ItnCampaignQuantifier {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::ItnCampaign
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let code = self.intervention();
        let settings = &ctx.settings.itn_campaign;
        settings.validate()?;
        let type_label = ctx.type_label(code)?;
        let population = ctx.population()?;

        let covered = product(
            code,
            &[population.pop_total, settings.coverage, settings.buffer],
        )?;
        let nets = quotient(code, "itn_campaign_divisor", covered, settings.divisor)?;
        let bales = quotient(code, "itn_campaign_bale_size", nets, settings.bale_size)?;

        Ok(vec![
            QuantityLine::new(type_label, UNIT_NET, nets),
            QuantityLine::new(type_label, UNIT_BALE, bales),
        ])
    }
}

/// Routine distribution to pregnant women and children under 5.
///
/// `nets = (pop_pw + pop_0_5) * coverage * buffer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItnRoutineQuantifier;

impl QuantityProvider for ItnRoutineQuantifier {
    fn intervention(&self) -> InterventionCode {
        InterventionCode::ItnRoutine
    }

    fn quantify(&self, ctx: &QuantityContext<'_>) -> Result<Vec<QuantityLine>, BudgetError> {
        let code = self.intervention();
        let settings = &ctx.settings.itn_routine;
        settings.validate()?;
        let type_label = ctx.type_label(code)?;
        let population = ctx.population()?;

        let eligible = sum(code, population.pop_pw, population.pop_0_5)?;
        let nets = product(code, &[eligible, settings.coverage, settings.buffer])?;

        Ok(vec![QuantityLine::new(type_label, UNIT_NET, nets)])
    }
}
