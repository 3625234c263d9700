use indexmap::IndexMap;
use mrsweep_core::{CompressionCodec, JobConfiguration, ParamValue, SweepError, FIELDS};
use serde_json::{json, Value};

fn raw(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

fn violations(result: Result<JobConfiguration, SweepError>) -> mrsweep_core::ValidationErrors {
    match result {
        Err(SweepError::Validation(errors)) => errors,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn empty_mapping_yields_defaults_in_schema_order() {
    let config = JobConfiguration::parse(&IndexMap::new()).expect("defaults are valid");
    let names: Vec<_> = config.iter().map(|(name, _)| name).collect();
    let expected: Vec<_> = FIELDS.iter().map(|spec| spec.name).collect();
    assert_eq!(names, expected);
    for spec in FIELDS.iter() {
        assert_eq!(config.get(spec.name), Some(&spec.default), "{}", spec.name);
    }
    assert_eq!(config.output_path(), "/output");
    assert_eq!(config.codec(), CompressionCodec::Default);
}

#[test]
fn aliases_and_names_are_both_accepted() {
    let config = JobConfiguration::parse(&raw(&[
        ("m", json!(4)),
        ("number_of_reducers", json!(3)),
        ("c", json!(true)),
    ]))
    .expect("valid");
    assert_eq!(config.get("number_of_mappers"), Some(&ParamValue::Integer(4)));
    assert_eq!(config.get("number_of_reducers"), Some(&ParamValue::Integer(3)));
    assert_eq!(config.get("should_compress"), Some(&ParamValue::Boolean(true)));
}

#[test]
fn null_takes_the_default() {
    let config = JobConfiguration::parse(&raw(&[("map_memory_mb", Value::Null)])).expect("valid");
    assert_eq!(config.get("map_memory_mb"), Some(&ParamValue::Integer(1024)));
}

#[test]
fn every_offending_field_is_reported() {
    let errors = violations(JobConfiguration::parse(&raw(&[
        ("number_of_mappers", json!(0)),
        ("slowstart_completed_maps", json!(1.5)),
        ("map_compress_codec", json!("zstd")),
        ("input_path", json!(12)),
        ("bogus", json!(1)),
    ])));
    for field in [
        "number_of_mappers",
        "slowstart_completed_maps",
        "map_compress_codec",
        "input_path",
        "bogus",
    ] {
        assert!(errors.mentions(field), "missing violation for {field}: {errors}");
    }
    assert_eq!(errors.violations.len(), 5);
}

#[test]
fn bounds_are_inclusive_or_exclusive_as_declared() {
    assert!(JobConfiguration::parse(&raw(&[("slowstart_completed_maps", json!(0))])).is_ok());
    assert!(JobConfiguration::parse(&raw(&[("slowstart_completed_maps", json!(1.0))])).is_ok());
    assert!(JobConfiguration::parse(&raw(&[("min_split_size", json!(0))])).is_ok());
    assert!(JobConfiguration::parse(&raw(&[("max_split_size", json!(0))])).is_err());
    assert!(JobConfiguration::parse(&raw(&[("min_split_size", json!(-1))])).is_err());
}

#[test]
fn inverted_split_sizes_name_both_fields() {
    let errors = violations(JobConfiguration::parse(&raw(&[
        ("min_split_size", json!(200)),
        ("max_split_size", json!(100)),
    ])));
    assert_eq!(errors.violations.len(), 1);
    let violation = &errors.violations[0];
    assert_eq!(violation.fields, vec!["min_split_size", "max_split_size"]);
    assert!(violation.reason.contains("200"));
    assert!(violation.reason.contains("100"));
}

#[test]
fn equal_split_sizes_are_allowed() {
    let config = JobConfiguration::parse(&raw(&[
        ("min_split_size", json!("1MB")),
        ("max_split_size", json!(1_048_576)),
    ]))
    .expect("equal bounds");
    assert_eq!(config.get("min_split_size"), Some(&ParamValue::Integer(1_048_576)));
}

#[test]
fn size_fields_accept_human_readable_text_and_others_do_not() {
    let config = JobConfiguration::parse(&raw(&[("max_split_size", json!("256m"))])).expect("size");
    assert_eq!(config.get("max_split_size"), Some(&ParamValue::Integer(268_435_456)));
    let errors = violations(JobConfiguration::parse(&raw(&[("map_memory_mb", json!("1G"))])));
    assert!(errors.mentions("map_memory_mb"));
}

#[test]
fn codec_matches_name_then_class_ignoring_case() {
    let by_name = JobConfiguration::parse(&raw(&[("mcc", json!("snappy"))])).expect("name");
    assert_eq!(by_name.codec(), CompressionCodec::Snappy);
    let by_class = JobConfiguration::parse(&raw(&[(
        "map_compress_codec",
        json!("ORG.APACHE.HADOOP.IO.COMPRESS.GZIPCODEC"),
    )]))
    .expect("class");
    assert_eq!(by_class.codec(), CompressionCodec::Gzip);

    let errors = violations(JobConfiguration::parse(&raw(&[("mcc", json!("zip"))])));
    let reason = &errors.violations[0].reason;
    assert!(reason.contains("SNAPPY ('org.apache.hadoop.io.compress.SnappyCodec')"));
}

#[test]
fn textual_scalars_are_coerced() {
    let config = JobConfiguration::parse(&raw(&[
        ("number_of_mappers", json!(" 8 ")),
        ("slowstart_completed_maps", json!("0.5")),
        ("should_compress", json!("TRUE")),
    ]))
    .expect("coerced");
    assert_eq!(config.get("number_of_mappers"), Some(&ParamValue::Integer(8)));
    assert_eq!(config.get("slowstart_completed_maps"), Some(&ParamValue::Float(0.5)));
    assert_eq!(config.get("should_compress"), Some(&ParamValue::Boolean(true)));
}

#[test]
fn duplicate_name_and_alias_is_rejected() {
    let errors = violations(JobConfiguration::parse(&raw(&[
        ("number_of_mappers", json!(2)),
        ("m", json!(3)),
    ])));
    assert!(errors.mentions("number_of_mappers"));
}

#[test]
fn non_finite_floats_are_rejected() {
    let errors = violations(JobConfiguration::parse(&raw(&[(
        "slowstart_completed_maps",
        json!("NaN"),
    )])));
    assert!(errors.mentions("slowstart_completed_maps"));
}

#[test]
fn mapping_round_trips_through_parse() {
    let config = JobConfiguration::parse(&raw(&[
        ("number_of_mappers", json!(6)),
        ("map_compress_codec", json!("LZ4")),
        ("output_path", json!("/out/run")),
    ]))
    .expect("valid");
    let reparsed = JobConfiguration::parse(&config.as_mapping()).expect("mapping is valid");
    assert_eq!(reparsed, config);
}
