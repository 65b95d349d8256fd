//! Cost rates and the quantity-to-cost join.

pub mod currency;
pub mod joiner;
pub mod output;
pub mod rates;

pub use currency::CurrencyCode;
pub use joiner::CostJoiner;
pub use output::OutputRow;
pub use rates::{CostRateRecord, CostRateTable};
