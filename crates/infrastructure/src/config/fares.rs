//! Fare table entries.

use domain::{DomainError, Fare, PriceTable, Route, StopId};
use serde::{Deserialize, Serialize};

/// One priced route, in either direction
///
/// ```toml
/// [[fares]]
/// from = "Stop1"
/// to = "Stop2"
/// amount = "3.25"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareEntry {
    pub from: StopId,
    pub to: StopId,
    pub amount: Fare,
}

/// Build a price table from configured entries
///
/// An empty list yields the built-in three-stop table.
pub fn price_table_from(entries: &[FareEntry]) -> Result<PriceTable, DomainError> {
    if entries.is_empty() {
        return Ok(PriceTable::default_seed());
    }

    let routes = entries
        .iter()
        .map(|e| Ok((Route::new(e.from.clone(), e.to.clone())?, e.amount)))
        .collect::<Result<Vec<_>, DomainError>>()?;
    PriceTable::from_entries(routes)
}
