//! Application services - Use case implementations

mod fare_calculation_service;
mod trip_classifier;

pub use fare_calculation_service::{
    BatchErrorPolicy, BatchReport, FareCalculationService, PairFailure, PairResult, PairingMode,
};
pub use trip_classifier::TripClassifier;
