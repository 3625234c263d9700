//! Statically declared parameter table for streaming jobs.
//!
//! Every other component (validation, argument rendering, sweep normalization,
//! CLI generation) is driven by [`FIELDS`]; adding a parameter means adding one
//! entry here and, if the executor should see it, one rendering rule in
//! [`crate::job`].

use std::borrow::Cow;

use serde::Serialize;

use crate::codec::CompressionCodec;
use crate::value::ParamValue;

/// Name of the field that receives templated per-job output directories.
pub const OUTPUT_PATH: &str = "output_path";
/// Lower end of the split size relationship.
pub const MIN_SPLIT_SIZE: &str = "min_split_size";
/// Upper end of the split size relationship.
pub const MAX_SPLIT_SIZE: &str = "max_split_size";

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Signed 64-bit integer.
    Integer,
    /// Finite float.
    Float,
    /// `true` or `false`.
    Boolean,
    /// Free text.
    String,
    /// Filesystem or HDFS path, kept as text.
    Path,
    /// A [`CompressionCodec`] by name or class.
    Codec,
}

/// One end of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Bound {
    /// The limit itself is allowed.
    Inclusive(f64),
    /// The limit itself is rejected.
    Exclusive(f64),
}

/// Numeric constraint; a missing end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    /// Smallest accepted value.
    pub lower: Option<Bound>,
    /// Largest accepted value.
    pub upper: Option<Bound>,
}

impl Range {
    /// `> 0`
    pub const POSITIVE: Range = Range {
        lower: Some(Bound::Exclusive(0.0)),
        upper: None,
    };
    /// `>= 0`
    pub const NON_NEGATIVE: Range = Range {
        lower: Some(Bound::Inclusive(0.0)),
        upper: None,
    };
    /// `[0, 1]`
    pub const UNIT_INTERVAL: Range = Range {
        lower: Some(Bound::Inclusive(0.0)),
        upper: Some(Bound::Inclusive(1.0)),
    };

    /// Checks `value` against both ends, describing the first broken end.
    pub fn check(&self, value: f64) -> Result<(), String> {
        match self.lower {
            Some(Bound::Exclusive(limit)) if value <= limit => {
                return Err(format!("must be greater than {limit}, got {value}"));
            }
            Some(Bound::Inclusive(limit)) if value < limit => {
                return Err(format!("must be greater than or equal to {limit}, got {value}"));
            }
            _ => {}
        }
        match self.upper {
            Some(Bound::Exclusive(limit)) if value >= limit => {
                Err(format!("must be less than {limit}, got {value}"))
            }
            Some(Bound::Inclusive(limit)) if value > limit => {
                Err(format!("must be less than or equal to {limit}, got {value}"))
            }
            _ => Ok(()),
        }
    }
}

/// Documentation group used to arrange CLI help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Group {
    /// Input, output and the streaming programs.
    TaskDefinition,
    /// Task counts and vcores.
    ParallelismAndScheduling,
    /// Container memory and split sizes.
    Memory,
    /// Sort, merge and map output compression.
    ShuffleAndCompression,
}

impl Group {
    /// Heading shown in help output.
    pub const fn title(self) -> &'static str {
        match self {
            Group::TaskDefinition => "Task Definition Settings",
            Group::ParallelismAndScheduling => "Parallelism & Scheduling Settings",
            Group::Memory => "Memory Settings",
            Group::ShuffleAndCompression => "Shuffle & Compression Settings",
        }
    }
}

/// Static description of one configurable field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Canonical snake_case name.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Value used when the field is not supplied.
    pub default: ParamValue,
    /// Numeric constraint, if any.
    pub range: Option<Range>,
    /// Short name without the leading dash; empty when there is none.
    pub alias: &'static str,
    /// Help heading the field is listed under.
    pub group: Group,
    /// Accepts `128MB`-style input in addition to plain byte counts.
    pub human_readable_size: bool,
    /// One-line description for help output.
    pub help: &'static str,
}

impl ParameterSpec {
    const fn text(
        name: &'static str,
        kind: FieldKind,
        default: &'static str,
        alias: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            default: ParamValue::Text(Cow::Borrowed(default)),
            range: None,
            alias,
            group: Group::TaskDefinition,
            human_readable_size: false,
            help,
        }
    }

    const fn integer(
        name: &'static str,
        default: i64,
        range: Range,
        alias: &'static str,
        group: Group,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            default: ParamValue::Integer(default),
            range: Some(range),
            alias,
            group,
            human_readable_size: false,
            help,
        }
    }

    const fn size(
        name: &'static str,
        default: i64,
        range: Range,
        alias: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            default: ParamValue::Integer(default),
            range: Some(range),
            alias,
            group: Group::Memory,
            human_readable_size: true,
            help,
        }
    }
}

/// Every parameter, in declaration order. Iteration order here fixes the
/// order of grid expansion and of [`crate::JobConfiguration`] entries.
pub static FIELDS: [ParameterSpec; 21] = [
    // Task definition
    ParameterSpec::text(
        "input_path",
        FieldKind::Path,
        "/input",
        "i",
        "HDFS path to the input directory",
    ),
    ParameterSpec::text(
        OUTPUT_PATH,
        FieldKind::Path,
        "/output",
        "o",
        "HDFS path to the output directory",
    ),
    ParameterSpec::text(
        "mapper_path",
        FieldKind::Path,
        "/home/mapper.py",
        "mp",
        "Path to the mapper implementation",
    ),
    ParameterSpec::text(
        "reducer_path",
        FieldKind::Path,
        "/home/reducer.py",
        "rp",
        "Path to the reducer implementation",
    ),
    // Parallelism & scheduling
    ParameterSpec::integer(
        "number_of_mappers",
        2,
        Range::POSITIVE,
        "m",
        Group::ParallelismAndScheduling,
        "Number of mapper tasks",
    ),
    ParameterSpec::integer(
        "number_of_reducers",
        1,
        Range::POSITIVE,
        "r",
        Group::ParallelismAndScheduling,
        "Number of reducer tasks",
    ),
    ParameterSpec::integer(
        "map_vcores",
        1,
        Range::POSITIVE,
        "mc",
        Group::ParallelismAndScheduling,
        "Number of vCores per map task",
    ),
    ParameterSpec::integer(
        "reduce_vcores",
        1,
        Range::POSITIVE,
        "rc",
        Group::ParallelismAndScheduling,
        "Number of vCores per reduce task",
    ),
    ParameterSpec::integer(
        "application_manager_vcores",
        1,
        Range::POSITIVE,
        "ac",
        Group::ParallelismAndScheduling,
        "Number of vCores for the application master",
    ),
    ParameterSpec::integer(
        "shuffle_copies",
        5,
        Range::POSITIVE,
        "sc",
        Group::ParallelismAndScheduling,
        "Parallel copies per reduce during shuffle. More copies speed up shuffle \
         but risk saturating network or disk I/O.",
    ),
    ParameterSpec::integer(
        "jvm_numtasks",
        1,
        Range::POSITIVE,
        "jvm",
        Group::ParallelismAndScheduling,
        "Number of tasks per JVM to reduce JVM startup overhead.",
    ),
    ParameterSpec {
        name: "slowstart_completed_maps",
        kind: FieldKind::Float,
        default: ParamValue::Float(0.05),
        range: Some(Range::UNIT_INTERVAL),
        alias: "ssc",
        group: Group::ParallelismAndScheduling,
        human_readable_size: false,
        help: "Fraction of maps to finish before reduce begins. Higher delays reduce \
               phase but reduces load on shuffle.",
    },
    // Memory
    ParameterSpec::integer(
        "map_memory_mb",
        1024,
        Range::POSITIVE,
        "mm",
        Group::Memory,
        "Memory per map task (MB).",
    ),
    ParameterSpec::integer(
        "reduce_memory_mb",
        1024,
        Range::POSITIVE,
        "rm",
        Group::Memory,
        "Memory per reduce task (MB)",
    ),
    ParameterSpec::integer(
        "application_manager_memory_mb",
        1536,
        Range::POSITIVE,
        "am",
        Group::Memory,
        "Memory for application master (MB)",
    ),
    ParameterSpec::integer(
        "sort_buffer_mb",
        100,
        Range::POSITIVE,
        "sb",
        Group::Memory,
        "Sort buffer size (MB)",
    ),
    ParameterSpec::size(
        MIN_SPLIT_SIZE,
        0,
        Range::NON_NEGATIVE,
        "n",
        "Minimum input split size with human-readable units (B, KB, MB, GB). Larger min \
         split size reduces the number of map tasks, improving startup overhead but may \
         reduce parallelism.",
    ),
    ParameterSpec::size(
        MAX_SPLIT_SIZE,
        128 * 1024 * 1024,
        Range::POSITIVE,
        "x",
        "Maximum input split size with human-readable units (B, KB, MB, GB). Effectively \
         determines the number of mappers that will be used (together with the input size).",
    ),
    // Shuffle & compression
    ParameterSpec::integer(
        "io_sort_factor",
        10,
        Range::POSITIVE,
        "f",
        Group::ShuffleAndCompression,
        "Number of streams merged simultaneously during map output sort.",
    ),
    ParameterSpec {
        name: "should_compress",
        kind: FieldKind::Boolean,
        default: ParamValue::Boolean(false),
        range: None,
        alias: "c",
        group: Group::ShuffleAndCompression,
        human_readable_size: false,
        help: "Enable compression of map outputs before shuffle. Compression reduces \
               network traffic at the cost of additional CPU usage.",
    },
    ParameterSpec {
        name: "map_compress_codec",
        kind: FieldKind::Codec,
        default: ParamValue::Codec(CompressionCodec::Default),
        range: None,
        alias: "mcc",
        group: Group::ShuffleAndCompression,
        human_readable_size: false,
        help: "Compression codec for map output.",
    },
];

/// Resolves a field by its name or its alias.
pub fn lookup(key: &str) -> Option<&'static ParameterSpec> {
    FIELDS
        .iter()
        .find(|spec| spec.name == key)
        .or_else(|| FIELDS.iter().find(|spec| spec.alias == key))
}

/// Resolves a field by its canonical name only.
pub fn field(name: &str) -> Option<&'static ParameterSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// Returns `true` if `name` is a canonical field name.
pub fn is_field(name: &str) -> bool {
    field(name).is_some()
}
