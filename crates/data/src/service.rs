//! Country-level budget requests.

use snt_core::{BudgetRequest, OutputRow, get_budget};

use crate::error::DataResult;
use crate::provider::DatasetProvider;

/// Validates a request, loads its country's datasets once, and computes the
/// budget for every requested year.
///
/// # Errors
///
/// Returns `DataError::Budget` for an invalid request or a budget failure,
/// and any loading error from `provider`.
pub fn get_country_budgets<P>(provider: &P, request: &BudgetRequest) -> DataResult<Vec<OutputRow>>
where
    P: DatasetProvider + ?Sized,
{
    request.validate()?;
    let datasets = provider.load(&request.country)?;
    Ok(get_budget(request, &datasets)?)
}
