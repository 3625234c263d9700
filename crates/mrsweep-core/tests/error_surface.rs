use mrsweep_core::errors::{ErrorInfo, FieldViolation, SweepError, ValidationErrors};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("required", "3")
        .with_hint("supply one prefix or one path per job")
}

#[test]
fn configuration_error_surface() {
    let err = SweepError::Configuration(sample_info("output_path_count", "count mismatch"));
    let info = err.info().expect("structured payload");
    assert_eq!(info.code, "output_path_count");
    assert!(info.context.contains_key("required"));
    assert!(err.validation().is_none());
    let rendered = err.to_string();
    assert!(rendered.starts_with("configuration error: count mismatch"));
    assert!(rendered.contains("required=3"));
    assert!(rendered.contains("hint: supply one prefix"));
}

#[test]
fn validation_error_lists_every_violation() {
    let errors = ValidationErrors {
        violations: vec![
            FieldViolation::new("number_of_mappers", "must be greater than 0, got 0"),
            FieldViolation::across(["min_split_size", "max_split_size"], "inverted"),
        ],
    };
    let err = SweepError::from(errors);
    let payload = err.validation().expect("validation payload");
    assert_eq!(
        payload.fields(),
        vec!["number_of_mappers", "min_split_size", "max_split_size"]
    );
    assert!(payload.mentions("max_split_size"));
    assert!(!payload.mentions("map_vcores"));
    let rendered = err.to_string();
    assert!(rendered.contains("2 invalid field(s)"));
    assert!(rendered.contains("`min_split_size`, `max_split_size`: inverted"));
}

#[test]
fn errors_round_trip_json() {
    let err = SweepError::Serde(sample_info("yaml_deserialize", "bad indentation"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Serde\""));
    let decoded: SweepError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
