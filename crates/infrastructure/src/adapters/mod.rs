//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod csv_tap_source;
mod csv_trip_sink;

pub use csv_tap_source::{CsvTapSource, ParsedTaps, SkippedRecord, TAP_FIELD_COUNT, parse_taps};
pub use csv_trip_sink::{CsvTripSink, TRIP_HEADER, render_trips, trip_row};
