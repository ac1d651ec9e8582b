//! Subcommand handlers
//!
//! Each handler returns the text to print so it can be tested without
//! capturing stdout.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{
    BatchErrorPolicy, BatchReport, FareCalculationService, PairingMode, TripClassifier,
};
use domain::{PriceTable, StopId, TapEvent, TripStatus};
use infrastructure::{AppConfig, CsvTapSource, CsvTripSink};
use tracing::info;

/// Apply `process` flags on top of the loaded configuration
pub fn apply_overrides(
    config: &mut AppConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    abort_on_error: bool,
    per_card: bool,
) {
    if let Some(input) = input {
        config.files.input = input;
    }
    if let Some(output) = output {
        config.files.output = output;
    }
    if abort_on_error {
        config.processing.error_policy = BatchErrorPolicy::AbortAll;
    }
    if per_card {
        config.processing.pairing = PairingMode::PerCard;
    }
}

/// Build the batch service described by `config`
pub fn service(config: &AppConfig) -> anyhow::Result<FareCalculationService> {
    let prices = config.price_table()?;
    Ok(
        FareCalculationService::new(TripClassifier::new(Arc::new(prices)))
            .with_policy(config.processing.error_policy)
            .with_pairing(config.processing.pairing),
    )
}

/// Run the batch from the configured input to the configured output
pub async fn process(config: &AppConfig) -> anyhow::Result<String> {
    let source = CsvTapSource::new(&config.files.input);
    let sink = CsvTripSink::new(&config.files.output);

    let report = service(config)?
        .run(&source, &sink)
        .await
        .with_context(|| format!("Processing {} failed", config.files.input.display()))?;

    info!(output = %config.files.output.display(), "Trip file written");
    Ok(summary(&report, config))
}

/// Human-readable batch summary
pub fn summary(report: &BatchReport, config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Taps read:      {}", report.taps_read);
    let _ = writeln!(out, "Trips written:  {}", report.trips.len());
    for status in TripStatus::all() {
        let _ = writeln!(out, "  {:<12}  {}", status.label(), report.count(status));
    }
    let _ = writeln!(out, "Skipped pairs:  {}", report.failures.len());
    for failure in &report.failures {
        let next = failure
            .next_tap_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let _ = writeln!(out, "  {} -> {}: {}", failure.tap_id, next, failure.error);
    }
    let _ = writeln!(out, "Total charged:  ${}", report.total_charged());
    let _ = write!(out, "Output:         {}", config.files.output.display());
    out
}

/// One line per priced route
pub fn fares(table: &PriceTable) -> String {
    if table.is_empty() {
        return "No fares configured".to_string();
    }
    table
        .routes()
        .map(|(route, fare)| format!("{:<24} ${fare}", route.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The highest fare from `stop` and where it leads
pub fn max_fare(table: &PriceTable, stop: &str) -> anyhow::Result<String> {
    let stop = StopId::new(stop)?;
    let (route, fare) = table.max_fare_touching(&stop)?;
    let other = route
        .other_end(&stop)
        .with_context(|| format!("Route {route} does not touch {stop}"))?;
    Ok(format!("{stop} -> {other}: ${fare}"))
}

/// Classify one tap against an optional successor, both looked up by id
pub async fn classify(
    config: &AppConfig,
    current: u64,
    next: Option<u64>,
) -> anyhow::Result<String> {
    let parsed = CsvTapSource::new(&config.files.input).read_parsed().await?;
    let find = |id: u64| parsed.taps.iter().find(|tap| tap.id.value() == id);

    let next_tap = match next {
        Some(id) => Some(find(id).with_context(|| format!("No valid tap with id {id}"))?),
        None => None,
    };

    classify_taps(config, find(current), next_tap)
}

fn classify_taps(
    config: &AppConfig,
    current: Option<&TapEvent>,
    next: Option<&TapEvent>,
) -> anyhow::Result<String> {
    let classifier = TripClassifier::new(Arc::new(config.price_table()?));
    let trip = classifier.try_classify(current, next)?;
    Ok(serde_json::to_string_pretty(&trip)?)
}

#[cfg(test)]
mod tests {
    use application::PairFailure;
    use domain::{DomainError, Fare, TapId};

    use super::*;

    const TAPS: &str = "\
ID, DateTimeUTC, TapType, StopId, CompanyId, BusID, PAN
1, 22-01-2023 13:00:00, ON, Stop1, Company1, Bus37, 5500005555555559
2, 22-01-2023 13:05:00, OFF, Stop2, Company1, Bus37, 5500005555555559
3, 22-01-2023 09:20:00, ON, Stop3, Company1, Bus36, 4111111111111111
";

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.files.input = dir.path().join("taps.csv");
        config.files.output = dir.path().join("trips.csv");
        config
    }

    #[test]
    fn overrides_replace_configured_values() {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            Some(PathBuf::from("in.csv")),
            None,
            true,
            true,
        );

        assert_eq!(config.files.input, PathBuf::from("in.csv"));
        assert_eq!(config.files.output, PathBuf::from("trips.csv"));
        assert_eq!(config.processing.error_policy, BatchErrorPolicy::AbortAll);
        assert_eq!(config.processing.pairing, PairingMode::PerCard);
    }

    #[test]
    fn flags_left_off_keep_configuration() {
        let mut config = AppConfig::default();
        config.processing.pairing = PairingMode::PerCard;
        apply_overrides(&mut config, None, None, false, false);

        assert_eq!(config.processing.pairing, PairingMode::PerCard);
        assert_eq!(config.processing.error_policy, BatchErrorPolicy::SkipAndLog);
    }

    #[test]
    fn lists_default_fares() {
        let rendered = fares(&PriceTable::default_seed());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("STOP1 <-> STOP2"));
        assert!(lines[0].ends_with("$3.25"));
        assert!(rendered.contains("$7.30"));
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(fares(&PriceTable::default()), "No fares configured");
    }

    #[test]
    fn max_fare_names_far_stop() {
        let table = PriceTable::default_seed();
        assert_eq!(max_fare(&table, "stop2").unwrap(), "STOP2 -> STOP3: $5.50");
        assert_eq!(max_fare(&table, "STOP1").unwrap(), "STOP1 -> STOP3: $7.30");
    }

    #[test]
    fn max_fare_for_unknown_stop_fails() {
        let err = max_fare(&PriceTable::default_seed(), "STOP9").unwrap_err();
        assert!(err.to_string().contains("STOP9"));
    }

    #[test]
    fn summary_lists_counts_and_failures() {
        let report = BatchReport {
            taps_read: 2,
            trips: Vec::new(),
            failures: vec![PairFailure {
                tap_id: TapId::new(1).unwrap(),
                next_tap_id: Some(TapId::new(2).unwrap()),
                error: DomainError::unknown_route("STOP1", "STOP9"),
            }],
        };

        let rendered = summary(&report, &AppConfig::default());

        assert!(rendered.contains("Taps read:      2"));
        assert!(rendered.contains("COMPLETED"));
        assert!(rendered.contains("Skipped pairs:  1"));
        assert!(rendered.contains("1 -> 2: Unknown travel cost between stops STOP1, STOP9"));
        assert!(rendered.contains(&format!("${}", Fare::ZERO)));
    }

    #[tokio::test]
    async fn process_writes_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        tokio::fs::write(&config.files.input, TAPS).await.unwrap();

        let rendered = process(&config).await.unwrap();

        assert!(rendered.contains("Trips written:  3"));
        assert!(rendered.contains("Total charged:  $16.05"));
        let trips = tokio::fs::read_to_string(&config.files.output).await.unwrap();
        assert_eq!(trips.lines().count(), 4);
    }

    #[tokio::test]
    async fn process_with_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        assert!(process(&config).await.is_err());
    }

    #[tokio::test]
    async fn classify_pair_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        tokio::fs::write(&config.files.input, TAPS).await.unwrap();

        let rendered = classify(&config, 1, Some(2)).await.unwrap();
        assert!(rendered.contains("\"COMPLETED\""));
        assert!(rendered.contains("\"3.25\""));

        let rendered = classify(&config, 3, None).await.unwrap();
        assert!(rendered.contains("\"INCOMPLETE\""));
    }

    #[tokio::test]
    async fn classify_unknown_current_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        tokio::fs::write(&config.files.input, TAPS).await.unwrap();

        let err = classify(&config, 42, None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn classify_unknown_next_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        tokio::fs::write(&config.files.input, TAPS).await.unwrap();

        let err = classify(&config, 1, Some(42)).await.unwrap_err();
        assert!(err.to_string().contains("42"));
    }
}
