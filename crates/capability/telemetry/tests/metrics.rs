use sensorhub_telemetry::{
    metrics, new_run_id, record_dropped_duplicate, record_measurement_written,
};

#[test]
fn run_id_non_empty() {
    let id = new_run_id();
    assert!(!id.is_empty());
    assert_ne!(id, new_run_id());
}

#[test]
fn counters_accumulate() {
    let before = metrics().snapshot();
    record_measurement_written();
    record_dropped_duplicate();
    let after = metrics().snapshot();

    assert!(after.measurements_written >= before.measurements_written + 1);
    assert!(after.dropped_duplicate >= before.dropped_duplicate + 1);
}
