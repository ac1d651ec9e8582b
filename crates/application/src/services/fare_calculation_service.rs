//! Batch fare calculation
//!
//! Walks an ordered tap sequence, hands each tap and its successor to the
//! [`TripClassifier`], and collects one outcome per tap. What happens to a
//! pair that cannot be classified is decided by [`BatchErrorPolicy`].

use std::collections::HashMap;

use domain::{DomainError, Fare, Pan, TapEvent, TapId, TripOutcome, TripStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::trip_classifier::TripClassifier;
use crate::error::ApplicationError;
use crate::ports::{TapSourcePort, TripSinkPort};

/// What to do when a tap pair cannot be classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchErrorPolicy {
    /// Log the failed pair, leave it out, keep going
    #[default]
    SkipAndLog,
    /// Stop at the first failed pair
    AbortAll,
}

/// How taps are paired before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMode {
    /// Pair strictly adjacent taps in input order
    #[default]
    Adjacent,
    /// Group taps by card first (first-seen card order, input order within
    /// a card), then pair adjacent taps within each card
    PerCard,
}

/// Classification result for one tap and its successor
#[derive(Debug, Clone)]
pub struct PairResult {
    /// The tap the trip starts from
    pub tap_id: TapId,
    /// The successor it was paired with, if any
    pub next_tap_id: Option<TapId>,
    /// The trip, or why none could be produced
    pub outcome: Result<TripOutcome, DomainError>,
}

/// A pair that was left out of the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFailure {
    /// The tap the trip would have started from
    pub tap_id: TapId,
    /// Its successor, if any
    pub next_tap_id: Option<TapId>,
    /// Why classification failed
    pub error: DomainError,
}

/// Summary of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Number of taps fed into the batch
    pub taps_read: usize,
    /// Classified trips in pairing order
    pub trips: Vec<TripOutcome>,
    /// Pairs skipped under [`BatchErrorPolicy::SkipAndLog`]
    pub failures: Vec<PairFailure>,
}

impl BatchReport {
    /// Number of trips with the given status
    pub fn count(&self, status: TripStatus) -> usize {
        self.trips.iter().filter(|t| t.status == status).count()
    }

    /// Sum of all charges
    pub fn total_charged(&self) -> Fare {
        self.trips.iter().map(|t| t.charge).sum()
    }

    /// Whether every pair was classified
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Classifies whole tap sequences
#[derive(Debug, Clone)]
pub struct FareCalculationService {
    classifier: TripClassifier,
    policy: BatchErrorPolicy,
    pairing: PairingMode,
}

impl FareCalculationService {
    /// Create a service with the default policy and strict adjacent pairing
    pub fn new(classifier: TripClassifier) -> Self {
        Self {
            classifier,
            policy: BatchErrorPolicy::default(),
            pairing: PairingMode::default(),
        }
    }

    /// Set the error policy
    #[must_use]
    pub const fn with_policy(mut self, policy: BatchErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the pairing mode
    #[must_use]
    pub const fn with_pairing(mut self, pairing: PairingMode) -> Self {
        self.pairing = pairing;
        self
    }

    /// The classifier used for each pair
    pub const fn classifier(&self) -> &TripClassifier {
        &self.classifier
    }

    /// Classify every tap against its successor
    ///
    /// Produces one result per tap. The last tap of each sequence is paired
    /// with no successor. A failing pair has no effect on the others.
    pub fn classify_all(&self, taps: &[TapEvent]) -> Vec<PairResult> {
        self.sequences(taps)
            .into_iter()
            .flat_map(|sequence| {
                sequence
                    .iter()
                    .enumerate()
                    .map(|(i, current)| {
                        let next = sequence.get(i + 1).copied();
                        PairResult {
                            tap_id: current.id,
                            next_tap_id: next.map(|n| n.id),
                            outcome: self.classifier.classify(current, next),
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Classify a tap sequence and apply the error policy
    #[instrument(skip_all, fields(taps = taps.len(), policy = ?self.policy, pairing = ?self.pairing))]
    pub fn calculate(&self, taps: &[TapEvent]) -> Result<BatchReport, ApplicationError> {
        let mut report = BatchReport {
            taps_read: taps.len(),
            ..BatchReport::default()
        };

        for pair in self.classify_all(taps) {
            match pair.outcome {
                Ok(trip) => report.trips.push(trip),
                Err(error) => match self.policy {
                    BatchErrorPolicy::AbortAll => {
                        warn!(tap_id = %pair.tap_id, %error, "Aborting batch on failed tap pair");
                        return Err(ApplicationError::Classification {
                            tap_id: pair.tap_id,
                            source: error,
                        });
                    },
                    BatchErrorPolicy::SkipAndLog => {
                        warn!(
                            tap_id = %pair.tap_id,
                            next_tap_id = pair.next_tap_id.map(TapId::value),
                            %error,
                            "Skipping tap pair that could not be classified"
                        );
                        report.failures.push(PairFailure {
                            tap_id: pair.tap_id,
                            next_tap_id: pair.next_tap_id,
                            error,
                        });
                    },
                },
            }
        }

        info!(
            trips = report.trips.len(),
            failed = report.failures.len(),
            total_charged = %report.total_charged(),
            "Fare calculation finished"
        );
        Ok(report)
    }

    /// Read taps from `source`, classify them and write the trips to `sink`
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        source: &dyn TapSourcePort,
        sink: &dyn TripSinkPort,
    ) -> Result<BatchReport, ApplicationError> {
        let taps = source.read_taps().await?;
        info!(count = taps.len(), "Read taps");

        let report = self.calculate(&taps)?;
        let written = sink.write_trips(&report.trips).await?;
        info!(written, "Wrote trips");

        Ok(report)
    }

    fn sequences<'a>(&self, taps: &'a [TapEvent]) -> Vec<Vec<&'a TapEvent>> {
        match self.pairing {
            PairingMode::Adjacent => vec![taps.iter().collect()],
            PairingMode::PerCard => group_by_card(taps),
        }
    }
}

/// Stable partition of taps by card, in first-seen card order
fn group_by_card(taps: &[TapEvent]) -> Vec<Vec<&TapEvent>> {
    let mut slots: HashMap<&Pan, usize> = HashMap::new();
    let mut groups: Vec<Vec<&TapEvent>> = Vec::new();

    for tap in taps {
        let slot = *slots.entry(&tap.pan).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(tap);
    }

    groups
}
