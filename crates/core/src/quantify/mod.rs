//! Per-intervention quantification.
//!
//! Every intervention family is a [`QuantityProvider`]: the formula families
//! compute quantities from population and settings, case management reads
//! precomputed quantities. [`QuantifierRegistry`] maps a family to its
//! provider so the assembler treats them all alike.

pub mod case_management;
pub mod iptp;
pub mod itn;
pub mod pmc;
pub mod provider;
pub mod smc;
pub mod vaccine;


pub use case_management::{
    CaseManagementProvider, CaseManagementRecord, CaseManagementTable, CaseManagementUnit,
};
pub use iptp::IptpQuantifier;
pub use itn::{ItnCampaignQuantifier, ItnRoutineQuantifier};
pub use pmc::PmcQuantifier;
pub use provider::{QuantifierRegistry, QuantityContext, QuantityLine, QuantityProvider};
pub use smc::SmcQuantifier;
pub use vaccine::VaccineQuantifier;
