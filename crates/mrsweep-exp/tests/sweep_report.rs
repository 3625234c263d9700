use indexmap::IndexMap;
use mrsweep_core::ExecutorSettings;
use mrsweep_exp::{
    build_report, expand, to_canonical_json_bytes, SweepReport, SweepSpecification, TriggerSender,
};
use serde_json::{json, Value};

fn report(pairs: &[(&str, Value)], shared: Option<&str>) -> SweepReport {
    let raw: IndexMap<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    let spec = SweepSpecification::normalize(&raw).expect("normalize");
    let grid = expand(&spec).expect("expand");
    build_report(
        &grid,
        &spec,
        &ExecutorSettings::default(),
        &TriggerSender::default(),
        shared,
    )
}

#[test]
fn sequential_sweeps_start_one_session_per_job() {
    let report = report(&[("number_of_reducers", json!([1, 2]))], None);
    assert_eq!(report.jobs.len(), 2);
    assert!(report.shared_start_trigger.is_none());
    for (job, (expected, reducers)) in report.jobs.iter().zip([("r_1", 1), ("r_2", 2)]) {
        assert_eq!(job.session_id.as_deref(), Some(expected));
        let start = job.start_trigger.as_ref().expect("per-job trigger");
        assert!(start.windows(2).any(|pair| pair == ["--session_id", expected]));
        assert_eq!(job.user_selection.get("number_of_reducers"), Some(&json!(reducers)));
        assert_eq!(job.command[0], "hadoop");
        assert_eq!(job.command[1], "jar");
    }
    assert_eq!(report.stop_trigger[3], "stop_measurement");
}

#[test]
fn parallel_sweeps_share_one_anonymous_session() {
    let report = report(
        &[("mode", json!("parallel")), ("number_of_mappers", json!([2, 4]))],
        None,
    );
    assert!(report.jobs.iter().all(|job| job.session_id.is_none() && job.start_trigger.is_none()));
    let start = report.shared_start_trigger.expect("shared trigger");
    assert!(!start.iter().any(|arg| arg == "--session_id"));
}

#[test]
fn shared_session_id_overrides_per_job_labels() {
    let report = report(&[("number_of_mappers", json!([2, 4]))], Some("campaign-7"));
    assert!(report
        .jobs
        .iter()
        .all(|job| job.session_id.as_deref() == Some("campaign-7") && job.start_trigger.is_none()));
    let start = report.shared_start_trigger.expect("shared trigger");
    assert!(start.windows(2).any(|pair| pair == ["--session_id", "campaign-7"]));
}

#[test]
fn report_json_is_stable() {
    let input = [("map_memory_mb", json!([1024, 2048])), ("sleep_between_launches", json!(1))];
    let first = to_canonical_json_bytes(&report(&input, None)).expect("json");
    let second = to_canonical_json_bytes(&report(&input, None)).expect("json");
    assert_eq!(first, second);
    let decoded: SweepReport = serde_json::from_slice(&first).expect("decode");
    assert_eq!(decoded.sleep_between_launches, 1);
    assert_eq!(decoded, report(&input, None));
}
