use mrsweep_core::schema::{FieldKind, Group, ParameterSpec};
use mrsweep_core::surface::ToggleAction;
use mrsweep_core::{build_argument_descriptor, ArgumentVariant, ParamValue, FIELDS};

#[test]
fn groups_follow_declaration_order() {
    let descriptor = build_argument_descriptor(&FIELDS);
    let titles: Vec<_> = descriptor.groups.iter().map(|group| group.title).collect();
    assert_eq!(
        titles,
        vec![
            "Task Definition Settings",
            "Parallelism & Scheduling Settings",
            "Memory Settings",
            "Shuffle & Compression Settings",
        ]
    );
    assert_eq!(descriptor.arguments().count(), FIELDS.len());
    let memory = &descriptor.groups[2];
    assert_eq!(memory.group, Group::Memory);
    assert_eq!(memory.arguments.len(), 6);
}

#[test]
fn flags_use_alias_and_field_name() {
    let descriptor = build_argument_descriptor(&FIELDS);
    let mappers = descriptor.argument("number_of_mappers").expect("present");
    assert_eq!(mappers.short_flag.as_deref(), Some("-m"));
    assert_eq!(mappers.long_flag, "--number_of_mappers");
    let jvm = descriptor.argument("jvm_numtasks").expect("present");
    assert_eq!(jvm.short_flag.as_deref(), Some("-jvm"));
}

#[test]
fn each_kind_gets_its_variant() {
    let descriptor = build_argument_descriptor(&FIELDS);

    match &descriptor.argument("map_compress_codec").unwrap().variant {
        ArgumentVariant::Choice { choices, default } => {
            assert_eq!(choices, &["DEFAULT", "SNAPPY", "GZIP", "LZO", "BZIP2", "LZ4"]);
            assert_eq!(*default, "DEFAULT");
        }
        other => panic!("unexpected variant {other:?}"),
    }
    match &descriptor.argument("max_split_size").unwrap().variant {
        ArgumentVariant::Size { default } => assert_eq!(*default, 134_217_728),
        other => panic!("unexpected variant {other:?}"),
    }
    match &descriptor.argument("should_compress").unwrap().variant {
        ArgumentVariant::Toggle { action } => assert_eq!(*action, ToggleAction::Set),
        other => panic!("unexpected variant {other:?}"),
    }
    match &descriptor.argument("slowstart_completed_maps").unwrap().variant {
        ArgumentVariant::Scalar { kind, default } => {
            assert_eq!(*kind, FieldKind::Float);
            assert_eq!(default, &ParamValue::Float(0.05));
        }
        other => panic!("unexpected variant {other:?}"),
    }
}

#[test]
fn help_mentions_defaults() {
    let descriptor = build_argument_descriptor(&FIELDS);
    let min_split = descriptor.argument("min_split_size").unwrap();
    assert!(min_split.help.ends_with("(accepts 256MB, 1G, etc., default: 0 bytes)"));
    let codec = descriptor.argument("map_compress_codec").unwrap();
    assert!(codec.help.contains("options: DEFAULT, SNAPPY"));
    let reducers = descriptor.argument("number_of_reducers").unwrap();
    assert!(reducers.help.ends_with("(default: 1)"));
}

static KEEP_LOGS: [ParameterSpec; 1] = [ParameterSpec {
    name: "keep_task_logs",
    kind: FieldKind::Boolean,
    default: ParamValue::Boolean(true),
    range: None,
    alias: "k",
    group: Group::TaskDefinition,
    human_readable_size: false,
    help: "Retain task logs after the job finishes.",
}];

#[test]
fn toggle_defaulting_to_true_clears_when_given() {
    let descriptor = build_argument_descriptor(&KEEP_LOGS);
    assert_eq!(descriptor.groups.len(), 1);
    let keep = descriptor.argument("keep_task_logs").expect("present");
    assert_eq!(keep.short_flag.as_deref(), Some("-k"));
    assert_eq!(
        keep.variant,
        ArgumentVariant::Toggle {
            action: ToggleAction::Clear
        }
    );
    assert!(keep.help.ends_with("(default: true)"), "{}", keep.help);
}
