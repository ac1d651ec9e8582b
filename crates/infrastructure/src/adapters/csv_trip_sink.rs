//! CSV trip sink - Implements TripSinkPort over a trip file

use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::TripSinkPort;
use async_trait::async_trait;
use csv::WriterBuilder;
use domain::TripOutcome;
use tracing::{debug, instrument};

use crate::validation::format_timestamp;

/// Header line of the trip file
pub const TRIP_HEADER: [&str; 10] = [
    "Started",
    "Finished",
    "DurationSecs",
    "FromStopId",
    "ToStopId",
    "ChargeAmount",
    "CompanyId",
    "BusID",
    "PAN",
    "Status",
];

/// Writes trips to a CSV file, replacing its previous contents
#[derive(Debug, Clone)]
pub struct CsvTripSink {
    path: PathBuf,
}

impl CsvTripSink {
    /// Create a sink for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file being written
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TripSinkPort for CsvTripSink {
    #[instrument(skip(self, trips), fields(path = %self.path.display(), trips = trips.len()))]
    async fn write_trips(&self, trips: &[TripOutcome]) -> Result<usize, ApplicationError> {
        let rendered = render_trips(trips)?;
        let bytes_written = rendered.len();
        tokio::fs::write(&self.path, rendered).await.map_err(|e| {
            ApplicationError::Sink(format!("Failed to write {}: {e}", self.path.display()))
        })?;

        debug!(bytes_written, "Trip file written");
        Ok(trips.len())
    }
}

/// Render trips as CSV text, header included
pub fn render_trips(trips: &[TripOutcome]) -> Result<String, ApplicationError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(TRIP_HEADER).map_err(sink_error)?;

    for trip in trips {
        writer.write_record(trip_row(trip)).map_err(sink_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApplicationError::Sink(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApplicationError::Sink(e.to_string()))
}

/// One output row in header order
pub fn trip_row(trip: &TripOutcome) -> [String; 10] {
    [
        format_timestamp(&trip.started),
        format_timestamp(&trip.finished),
        trip.duration_secs.to_string(),
        trip.from_stop.to_string(),
        trip.to_stop.to_string(),
        format!("${}", trip.charge),
        trip.company.to_string(),
        trip.bus.to_string(),
        trip.pan.to_string(),
        trip.status.label().to_string(),
    ]
}

fn sink_error(err: csv::Error) -> ApplicationError {
    ApplicationError::Sink(err.to_string())
}
