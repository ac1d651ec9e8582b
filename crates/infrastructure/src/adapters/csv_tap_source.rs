//! CSV tap source - Implements TapSourcePort over a tap file

use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::TapSourcePort;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use domain::TapEvent;
use tracing::{debug, instrument, warn};

use crate::validation::TapRecord;

/// Columns in a tap row
pub const TAP_FIELD_COUNT: usize = 7;

/// A skipped input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the input
    pub line: u64,
    /// Why the line was rejected
    pub reason: String,
}

/// Taps parsed from one input, with the lines that were rejected
#[derive(Debug, Clone, Default)]
pub struct ParsedTaps {
    /// Valid taps in input order
    pub taps: Vec<TapEvent>,
    /// Rejected lines in input order
    pub skipped: Vec<SkippedRecord>,
}

/// Reads taps from a CSV file
///
/// Layout: `ID, DateTimeUTC, TapType, StopId, CompanyId, BusID, PAN`, with an
/// optional header line. Invalid lines are logged and skipped.
#[derive(Debug, Clone)]
pub struct CsvTapSource {
    path: PathBuf,
}

impl CsvTapSource {
    /// Create a source for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file being read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, keeping the rejected lines
    pub async fn read_parsed(&self) -> Result<ParsedTaps, ApplicationError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ApplicationError::Source(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        parse_taps(&contents, Utc::now())
    }
}

#[async_trait]
impl TapSourcePort for CsvTapSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_taps(&self) -> Result<Vec<TapEvent>, ApplicationError> {
        let parsed = self.read_parsed().await?;
        debug!(
            taps = parsed.taps.len(),
            skipped = parsed.skipped.len(),
            "Parsed tap file"
        );
        Ok(parsed.taps)
    }
}

/// Parse tap CSV text
///
/// Taps timestamped after `now` are rejected. Only a malformed CSV stream
/// fails the whole parse; bad records are skipped.
pub fn parse_taps(input: &str, now: DateTime<Utc>) -> Result<ParsedTaps, ApplicationError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input.as_bytes());

    let mut parsed = ParsedTaps::default();
    let mut first = true;

    for record in reader.records() {
        let record = record.map_err(|e| ApplicationError::Source(e.to_string()))?;
        let line = record.position().map_or(0, csv::Position::line);

        if std::mem::take(&mut first) && is_header(&record) {
            debug!(line, "Skipping header");
            continue;
        }

        match parse_record(&record, now) {
            Ok(tap) => parsed.taps.push(tap),
            Err(reason) => {
                warn!(line, %reason, "Skipping invalid tap record");
                parsed.skipped.push(SkippedRecord { line, reason });
            },
        }
    }

    Ok(parsed)
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|field| field.eq_ignore_ascii_case("ID"))
}

fn parse_record(record: &StringRecord, now: DateTime<Utc>) -> Result<TapEvent, String> {
    if record.len() != TAP_FIELD_COUNT {
        return Err(format!(
            "expected {TAP_FIELD_COUNT} fields, found {}",
            record.len()
        ));
    }

    let raw: TapRecord = record.deserialize(None).map_err(|e| e.to_string())?;
    raw.into_tap_event(now).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::TapDirection;

    use super::*;

    const SAMPLE: &str = "\
ID, DateTimeUTC, TapType, StopId, CompanyId, BusID, PAN
1, 22-01-2023 13:00:00, ON, Stop1, Company1, Bus37, 5500005555555559
2, 22-01-2023 13:05:00, OFF, Stop2, Company1, Bus37, 5500005555555559
3, 22-01-2023 09:20:00, ON, Stop3, Company1, Bus36, 4111111111111111
";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_sample_with_header() {
        let parsed = parse_taps(SAMPLE, now()).unwrap();

        assert!(parsed.skipped.is_empty());
        assert_eq!(parsed.taps.len(), 3);
        assert_eq!(parsed.taps[0].id.value(), 1);
        assert_eq!(parsed.taps[0].stop.as_str(), "STOP1");
        assert_eq!(parsed.taps[1].direction, TapDirection::Off);
        assert_eq!(parsed.taps[2].bus.as_str(), "Bus36");
    }

    #[test]
    fn input_order_is_preserved() {
        let parsed = parse_taps(SAMPLE, now()).unwrap();
        let ids: Vec<u64> = parsed.taps.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn header_is_optional() {
        let input = "1, 22-01-2023 13:00:00, on, Stop1, Company1, Bus37, 5500005555555559\n";
        let parsed = parse_taps(input, now()).unwrap();
        assert_eq!(parsed.taps.len(), 1);
        assert_eq!(parsed.taps[0].direction, TapDirection::On);
    }

    #[test]
    fn invalid_records_are_skipped_with_line_numbers() {
        let input = "\
ID, DateTimeUTC, TapType, StopId, CompanyId, BusID, PAN
1, 22-01-2023 13:00:00, ON, Stop1, Company1, Bus37, 5500005555555559
x, 22-01-2023 13:01:00, ON, Stop1, Company1, Bus37, 5500005555555559
3, 22-01-2023 13:02:00, SIDEWAYS, Stop1, Company1, Bus37, 5500005555555559
4, 22-01-2023 13:03:00, ON, Stop1
5, 01-01-2030 13:04:00, ON, Stop1, Company1, Bus37, 5500005555555559
6, 22-01-2023 13:05:00, OFF, Stop2, Company1, Bus37, 5500005555555559
";

        let parsed = parse_taps(input, now()).unwrap();

        let ids: Vec<u64> = parsed.taps.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 6]);

        let lines: Vec<u64> = parsed.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert!(parsed.skipped[2].reason.contains("expected 7 fields"));
        assert!(parsed.skipped[3].reason.contains("future"));
    }

    #[test]
    fn blank_field_is_skipped() {
        let input = "1, 22-01-2023 13:00:00, ON, Stop1, , Bus37, 5500005555555559\n";
        let parsed = parse_taps(input, now()).unwrap();
        assert!(parsed.taps.is_empty());
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn empty_input_has_no_taps() {
        let parsed = parse_taps("", now()).unwrap();
        assert!(parsed.taps.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[tokio::test]
    async fn reads_taps_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taps.csv");
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let source = CsvTapSource::new(&path);
        let taps = source.read_taps().await.unwrap();

        assert_eq!(taps.len(), 3);
        assert_eq!(source.path(), path.as_path());
    }

    #[tokio::test]
    async fn missing_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvTapSource::new(dir.path().join("absent.csv"));

        let err = source.read_taps().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Source(_)));
    }
}
