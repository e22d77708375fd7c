//! Cross-lifetime behavior of the session log: data flushed by one run is
//! carried verbatim into the next, delimited by a separator line.

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use looktime::{LookAccumulator, SessionRecorder, SESSION_LOG_FILE_NAME};

#[test]
fn second_run_carries_first_run_data_forward() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SESSION_LOG_FILE_NAME);

    // First run: fresh file, one tracked object.
    let first_run = Utc.with_ymd_and_hms(2026, 8, 29, 9, 0, 0).unwrap();
    let mut recorder = SessionRecorder::new(&path);
    recorder.load(first_run).unwrap();

    let mut times = LookAccumulator::new();
    times.add("Lamp42", 1.5);
    times.add("Blink", 0.04); // below threshold, must never surface
    recorder.flush(&times, first_run).unwrap();

    // Second run: prior text retained, new separator, new data appended.
    let second_run = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let mut recorder = SessionRecorder::new(&path);
    recorder.load(second_run).unwrap();

    let mut times = LookAccumulator::new();
    times.add("Vase7", 0.75);
    recorder.flush(&times, second_run).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();

    assert_eq!(
        lines[0],
        "Timestamp;ObjectName;ProductCategory;TotalLookTime(sec)"
    );
    assert_eq!(
        lines[1],
        ";;--- NEW SESSION STARTED ON 2026-08-29 09:00:00 ---;"
    );
    assert_eq!(lines[2], "2026-08-29 09:00:00;Lamp42;Lamp42;1.50");
    assert!(written.contains(";;--- NEW SESSION STARTED ON 2026-08-30 12:00:00 ---;"));
    assert!(written.ends_with("2026-08-30 12:00:00;Vase7;Vase7;0.75\n"));
    assert!(!written.contains("Blink"));
}
