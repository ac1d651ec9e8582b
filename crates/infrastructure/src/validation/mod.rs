//! Input validation
//!
//! Turns raw tap rows into validated domain events.

pub mod tap_record;

pub use tap_record::{
    TAP_TIMESTAMP_FORMAT, TapRecord, TapRecordError, format_timestamp, parse_timestamp,
};
