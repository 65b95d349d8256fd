//! Programmatic settings that parametrise the quantification formulas.
//!
//! On the wire the settings are one flat object (`smc_buffer`,
//! `vacc_doses_per_child`, `currency`, ...). In Rust they are grouped per
//! intervention family and flattened back into that namespace, so a request
//! may carry any subset and the rest keep their defaults.

pub mod types;
pub mod validation;

pub use types::{
    BudgetSettings, IptpSettings, ItnCampaignSettings, ItnRoutineSettings, PmcSettings,
    SmcSettings, VaccineSettings,
};
