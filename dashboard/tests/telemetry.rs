use std::fs;

use dashboard::telemetry::setup_telemetry;
use tracing::error;

#[test]
fn test_file_log_is_flushed_when_guard_drops() {
    let log_dir = std::env::temp_dir().join(format!("dashboard-logs-{}", std::process::id()));
    let _ = fs::remove_dir_all(&log_dir);
    fs::create_dir_all(&log_dir).unwrap();

    let guard = setup_telemetry(log_dir.to_str());
    assert!(guard.is_some());
    error!("partition 2023-01-03 failed");
    drop(guard);

    let contents: String = fs::read_dir(&log_dir)
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(contents.contains("partition 2023-01-03 failed"));

    assert!(setup_telemetry(log_dir.to_str()).is_none());
    fs::remove_dir_all(&log_dir).unwrap();
}
