// Installs the global subscriber, so this file holds a single test.

#[test]
fn init_writes_timestamped_lines_to_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("daily_sales_etl.log");

    let guard = daily_sales_etl::logging::init(&log_path).unwrap();
    tracing::info!(rows = 3, "extract successful");
    tracing::error!(error = "boom", "load failed");
    drop(guard);

    let text = std::fs::read_to_string(&log_path).unwrap();
    let error_line = text
        .lines()
        .find(|l| l.contains("load failed"))
        .expect("error line written to file");
    assert!(error_line.contains("ERROR"));
    assert!(error_line.contains("boom"));
    // Lines start with an RFC 3339 timestamp, e.g. 2024-05-01T12:00:00.000000Z.
    assert_eq!(error_line.as_bytes()[4], b'-');
    assert_eq!(error_line.as_bytes()[10], b'T');
    // No ANSI escapes in the file.
    assert!(!text.contains('\u{1b}'));

    assert!(daily_sales_etl::logging::init(&log_path).is_err());
}
