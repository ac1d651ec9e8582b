//! Domain entities

mod price_table;
mod tap_event;
mod trip_outcome;

pub use price_table::PriceTable;
pub use tap_event::TapEvent;
pub use trip_outcome::TripOutcome;
