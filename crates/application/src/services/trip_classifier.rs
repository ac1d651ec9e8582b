//! Trip classification
//!
//! Turns a tap and its successor into a single [`TripOutcome`]. Rules are
//! checked in order and the first match wins:
//!
//! 1. Incomplete: no successor, or two boardings in a row. Charged the
//!    highest fare reachable from the boarding stop.
//! 2. Cancelled: boarding then alighting at the same stop. Charged nothing.
//! 3. Completed: everything else. Charged the fare between the two stops.
//!
//! Taps are paired purely by position. Durations are not clamped, so a
//! successor with an earlier timestamp gives a negative duration.

use std::sync::Arc;

use domain::{DomainError, Fare, PriceTable, TapEvent, TripOutcome, TripStatus};
use tracing::{debug, trace};

/// Classifies adjacent tap pairs against a fixed price table
#[derive(Debug, Clone)]
pub struct TripClassifier {
    prices: Arc<PriceTable>,
}

impl TripClassifier {
    /// Create a classifier over a shared price table
    pub const fn new(prices: Arc<PriceTable>) -> Self {
        Self { prices }
    }

    /// The price table this classifier charges from
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Classify `current` given its successor in the input, if any
    pub fn classify(
        &self,
        current: &TapEvent,
        next: Option<&TapEvent>,
    ) -> Result<TripOutcome, DomainError> {
        let outcome = match next {
            None => self.incomplete(current)?,
            Some(next) if is_consecutive_boarding(current, next) => self.incomplete(current)?,
            Some(next) if is_cancelled(current, next) => Self::cancelled(current, next),
            Some(next) => self.completed(current, next)?,
        };

        debug!(
            tap_id = %current.id,
            next_tap_id = next.map(|n| n.id.value()),
            status = %outcome.status,
            charge = %outcome.charge,
            "Classified tap pair"
        );
        Ok(outcome)
    }

    /// Like [`classify`](Self::classify), but for callers holding an
    /// optional current tap
    ///
    /// Fails with [`DomainError::InvalidInput`] when `current` is absent.
    pub fn try_classify(
        &self,
        current: Option<&TapEvent>,
        next: Option<&TapEvent>,
    ) -> Result<TripOutcome, DomainError> {
        let current = current
            .ok_or_else(|| DomainError::InvalidInput("current tap must be present".to_string()))?;
        self.classify(current, next)
    }

    fn incomplete(&self, current: &TapEvent) -> Result<TripOutcome, DomainError> {
        let (route, charge) = self.prices.max_fare_touching(&current.stop)?;
        let to_stop = route
            .other_end(&current.stop)
            .cloned()
            .ok_or_else(|| DomainError::no_route_found(current.stop.as_str()))?;
        trace!(tap_id = %current.id, %route, "Charging maximum fare for incomplete trip");

        Ok(TripOutcome {
            started: current.timestamp,
            finished: current.timestamp,
            duration_secs: 0,
            from_stop: current.stop.clone(),
            to_stop,
            charge,
            company: current.company.clone(),
            bus: current.bus.clone(),
            pan: current.pan.clone(),
            status: TripStatus::Incomplete,
        })
    }

    fn cancelled(current: &TapEvent, next: &TapEvent) -> TripOutcome {
        TripOutcome {
            started: current.timestamp,
            finished: next.timestamp,
            duration_secs: current.seconds_until(next),
            from_stop: current.stop.clone(),
            to_stop: next.stop.clone(),
            charge: Fare::ZERO,
            company: current.company.clone(),
            bus: current.bus.clone(),
            pan: current.pan.clone(),
            status: TripStatus::Cancelled,
        }
    }

    fn completed(&self, current: &TapEvent, next: &TapEvent) -> Result<TripOutcome, DomainError> {
        let charge = self.prices.fare_between(&current.stop, &next.stop)?;

        Ok(TripOutcome {
            started: current.timestamp,
            finished: next.timestamp,
            duration_secs: current.seconds_until(next),
            from_stop: current.stop.clone(),
            to_stop: next.stop.clone(),
            charge,
            company: current.company.clone(),
            bus: current.bus.clone(),
            pan: current.pan.clone(),
            status: TripStatus::Completed,
        })
    }
}

/// Two boardings in a row: the first journey was never closed
fn is_consecutive_boarding(current: &TapEvent, next: &TapEvent) -> bool {
    current.is_on() && next.is_on()
}

/// Boarding followed by alighting at the same stop
fn is_cancelled(current: &TapEvent, next: &TapEvent) -> bool {
    current.is_on() && next.is_off() && current.stop == next.stop
}
