//! Raw tap records and their conversion into [`TapEvent`]s
//!
//! A [`TapRecord`] is one CSV row as text. Field-level rules (positive id,
//! non-blank identifiers) are declared with `validator`; the timestamp is
//! parsed and checked against the current time separately.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{BusId, CompanyId, DomainError, Pan, StopId, TapDirection, TapEvent, TapId};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Timestamp layout used in tap and trip files, always UTC
pub const TAP_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Why a tap record was rejected
#[derive(Debug, Error)]
pub enum TapRecordError {
    /// A field failed its declared constraint
    #[error("Invalid field: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The timestamp did not match [`TAP_TIMESTAMP_FORMAT`]
    #[error("Invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// The tap claims to have happened after `now`
    #[error("Timestamp {0} is in the future")]
    FutureTimestamp(DateTime<Utc>),

    /// A value object rejected its input
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One tap row, positionally: ID, DateTimeUTC, TapType, StopId, CompanyId, BusID, PAN
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TapRecord {
    #[validate(range(min = 1, message = "ID must be positive"))]
    pub id: i64,
    pub date_time_utc: String,
    pub tap_type: String,
    #[validate(length(min = 1, message = "StopId must not be blank"))]
    pub stop_id: String,
    #[validate(length(min = 1, message = "CompanyId must not be blank"))]
    pub company_id: String,
    #[validate(length(min = 1, message = "BusID must not be blank"))]
    pub bus_id: String,
    #[validate(length(min = 1, message = "PAN must not be blank"))]
    pub pan: String,
}

impl TapRecord {
    /// Validate the record and build a tap event
    ///
    /// `now` bounds the timestamp: taps after it are rejected.
    pub fn into_tap_event(self, now: DateTime<Utc>) -> Result<TapEvent, TapRecordError> {
        self.validate()?;

        let timestamp = parse_timestamp(&self.date_time_utc)?;
        if timestamp > now {
            return Err(TapRecordError::FutureTimestamp(timestamp));
        }

        let id = u64::try_from(self.id)
            .map_err(|e| DomainError::ValidationError(format!("ID {}: {e}", self.id)))?;

        Ok(TapEvent::new(
            TapId::new(id)?,
            timestamp,
            TapDirection::from_str(&self.tap_type)?,
            StopId::new(self.stop_id)?,
            CompanyId::new(self.company_id)?,
            BusId::new(self.bus_id)?,
            Pan::new(self.pan)?,
        ))
    }
}

/// Parse a `dd-MM-yyyy HH:mm:ss` UTC timestamp
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TapRecordError> {
    NaiveDateTime::parse_from_str(value.trim(), TAP_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| TapRecordError::Timestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Render a timestamp in the tap file layout
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TAP_TIMESTAMP_FORMAT).to_string()
}
