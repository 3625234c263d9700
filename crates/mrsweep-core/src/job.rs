//! Validated job configurations and their rendering into executor arguments.

use std::borrow::Cow;
use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::codec::CompressionCodec;
use crate::errors::{FieldViolation, SweepError, ValidationErrors};
use crate::schema::{self, FieldKind, ParameterSpec, MAX_SPLIT_SIZE, MIN_SPLIT_SIZE, OUTPUT_PATH};
use crate::size::parse_size_bytes;
use crate::value::ParamValue;

/// Namenode URI prepended to input and output paths by default.
pub const DEFAULT_NAMENODE: &str = "hdfs://namenode-1:9000";

/// `-D` properties in the exact order the executor receives them.
const PROPERTIES: &[(&str, &str)] = &[
    ("mapreduce.job.maps", "number_of_mappers"),
    ("mapreduce.job.reduces", "number_of_reducers"),
    ("mapreduce.map.memory.mb", "map_memory_mb"),
    ("mapreduce.reduce.memory.mb", "reduce_memory_mb"),
    ("yarn.app.mapreduce.am.resource.mb", "application_manager_memory_mb"),
    ("mapreduce.map.cpu.vcores", "map_vcores"),
    ("mapreduce.reduce.cpu.vcores", "reduce_vcores"),
    ("yarn.app.mapreduce.am.resource.cpu-vcores", "application_manager_vcores"),
    ("mapreduce.task.io.sort.mb", "sort_buffer_mb"),
    ("mapreduce.task.io.sort.factor", "io_sort_factor"),
    ("mapreduce.map.output.compress", "should_compress"),
    ("mapreduce.map.output.compress.codec", "map_compress_codec"),
    ("mapreduce.input.fileinputformat.split.minsize", MIN_SPLIT_SIZE),
    ("mapreduce.input.fileinputformat.split.maxsize", MAX_SPLIT_SIZE),
    ("mapreduce.reduce.shuffle.parallelcopies", "shuffle_copies"),
    ("mapreduce.job.jvm.numtasks", "jvm_numtasks"),
    ("mapreduce.job.reduce.slowstart.completedmaps", "slowstart_completed_maps"),
];

/// A fully validated, immutable job configuration.
///
/// Values are held in schema declaration order. The only way to obtain one is
/// through [`JobConfiguration::parse`] (directly or via grid expansion and CLI
/// parsing), so every instance satisfies all field and cross-field constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfiguration {
    values: IndexMap<&'static str, ParamValue>,
}

impl JobConfiguration {
    /// Validates a raw mapping into a configuration.
    ///
    /// Keys may be field names or aliases. Missing or `null` entries take the
    /// field default. All violations are reported together.
    pub fn parse(raw: &IndexMap<String, Value>) -> Result<Self, SweepError> {
        let mut errors = ValidationErrors::default();
        let mut supplied: IndexMap<&'static str, &Value> = IndexMap::new();

        for (key, value) in raw {
            let Some(spec) = schema::lookup(key) else {
                errors.push(FieldViolation::new(key.as_str(), "unknown field"));
                continue;
            };
            if supplied.insert(spec.name, value).is_some() {
                errors.push(FieldViolation::new(
                    spec.name,
                    format!("supplied more than once (as `{key}`)"),
                ));
            }
        }

        let mut values = IndexMap::with_capacity(schema::FIELDS.len());
        for spec in schema::FIELDS.iter() {
            let coerced = match supplied.get(spec.name) {
                None | Some(Value::Null) => Ok(spec.default.clone()),
                Some(value) => coerce(spec, value),
            };
            match coerced {
                Ok(value) => {
                    values.insert(spec.name, value);
                }
                Err(reason) => errors.push(FieldViolation::new(spec.name, reason)),
            }
        }

        check_split_sizes(&values, &mut errors);

        if errors.is_empty() {
            Ok(Self { values })
        } else {
            Err(SweepError::Validation(errors))
        }
    }

    /// Value of a field by canonical name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Iterates `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Output directory of this job.
    pub fn output_path(&self) -> &str {
        self.text(OUTPUT_PATH)
    }

    /// Selected map output codec.
    pub fn codec(&self) -> CompressionCodec {
        match self.values.get("map_compress_codec") {
            Some(ParamValue::Codec(codec)) => *codec,
            _ => CompressionCodec::Default,
        }
    }

    /// JSON mapping keyed by field name, accepted back by [`JobConfiguration::parse`].
    pub fn as_mapping(&self) -> IndexMap<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect()
    }

    /// Argument vector using the default namenode prefix.
    pub fn to_argument_vector(&self) -> Vec<String> {
        self.to_argument_vector_with(DEFAULT_NAMENODE)
    }

    /// Renders every field into the executor's flag grammar: one `-D key=value`
    /// pair per property, then the I/O and script flags.
    pub fn to_argument_vector_with(&self, namenode: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(PROPERTIES.len() * 2 + 12);
        for (property, field) in PROPERTIES {
            let value = self
                .values
                .get(*field)
                .map(ParamValue::render)
                .unwrap_or_default();
            args.push("-D".to_string());
            args.push(format!("{property}={value}"));
        }
        let mapper = self.text("mapper_path");
        let reducer = self.text("reducer_path");
        args.extend([
            "-input".to_string(),
            format!("{namenode}{}", self.text("input_path")),
            "-output".to_string(),
            format!("{namenode}{}", self.output_path()),
            "-mapper".to_string(),
            mapper.to_string(),
            "-reducer".to_string(),
            reducer.to_string(),
            "-file".to_string(),
            mapper.to_string(),
            "-file".to_string(),
            reducer.to_string(),
        ]);
        args
    }

    /// Reads a rendered argument vector back into a configuration.
    ///
    /// `-D` properties map back to their fields, the namenode prefix is stripped
    /// from `-input`/`-output`, and `-file` entries are ignored. The result goes
    /// through the same validation as any other raw mapping.
    pub fn from_argument_vector<S: AsRef<str>>(
        args: &[S],
        namenode: &str,
    ) -> Result<Self, SweepError> {
        let mut raw = IndexMap::new();
        let mut errors = ValidationErrors::default();
        let mut iter = args.iter().map(AsRef::<str>::as_ref);
        while let Some(flag) = iter.next() {
            let Some(operand) = iter.next() else {
                errors.push(FieldViolation::new(flag, "flag is missing its value"));
                break;
            };
            let field = match flag {
                "-D" => {
                    let Some((property, value)) = operand.split_once('=') else {
                        errors.push(FieldViolation::new(operand, "expected key=value"));
                        continue;
                    };
                    match PROPERTIES.iter().find(|(key, _)| *key == property) {
                        Some((_, field)) => {
                            raw.insert(field.to_string(), Value::String(value.to_string()));
                        }
                        None => errors.push(FieldViolation::new(property, "unknown property")),
                    }
                    continue;
                }
                "-input" => "input_path",
                "-output" => OUTPUT_PATH,
                "-mapper" => "mapper_path",
                "-reducer" => "reducer_path",
                "-file" => continue,
                other => {
                    errors.push(FieldViolation::new(other, "unknown flag"));
                    continue;
                }
            };
            let value = match field {
                "input_path" | OUTPUT_PATH => operand.strip_prefix(namenode).unwrap_or(operand),
                _ => operand,
            };
            raw.insert(field.to_string(), Value::String(value.to_string()));
        }
        if !errors.is_empty() {
            return Err(SweepError::Validation(errors));
        }
        Self::parse(&raw)
    }

    fn text(&self, name: &str) -> &str {
        self.values
            .get(name)
            .and_then(ParamValue::as_text)
            .unwrap_or_default()
    }
}

impl Serialize for JobConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl Display for JobConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = ExecutorSettings::default();
        write!(f, "{} jar {}", settings.program, settings.streaming_jar)?;
        for pair in self.to_argument_vector_with(&settings.namenode).chunks(2) {
            write!(f, "\n  {}", pair.join(" "))?;
        }
        Ok(())
    }
}

/// How the executor is invoked around the job's argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorSettings {
    /// Launcher binary.
    #[serde(default = "ExecutorSettings::default_program")]
    pub program: String,
    /// Streaming jar passed after `jar`.
    #[serde(default = "ExecutorSettings::default_streaming_jar")]
    pub streaming_jar: String,
    /// URI prefix for `-input` and `-output`.
    #[serde(default = "ExecutorSettings::default_namenode")]
    pub namenode: String,
}

impl ExecutorSettings {
    fn default_program() -> String {
        "hadoop".to_string()
    }

    fn default_streaming_jar() -> String {
        "/opt/hadoop-3.4.1/share/hadoop/tools/lib/hadoop-streaming-3.4.1.jar".to_string()
    }

    fn default_namenode() -> String {
        DEFAULT_NAMENODE.to_string()
    }

    /// Full command line ready to hand to a process launcher.
    pub fn command(&self, config: &JobConfiguration) -> Vec<String> {
        let mut command = vec![
            self.program.clone(),
            "jar".to_string(),
            self.streaming_jar.clone(),
        ];
        command.extend(config.to_argument_vector_with(&self.namenode));
        command
    }
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            streaming_jar: Self::default_streaming_jar(),
            namenode: Self::default_namenode(),
        }
    }
}

fn coerce(spec: &ParameterSpec, value: &Value) -> Result<ParamValue, String> {
    let coerced = match spec.kind {
        FieldKind::Integer => ParamValue::Integer(coerce_integer(spec, value)?),
        FieldKind::Float => ParamValue::Float(coerce_float(value)?),
        FieldKind::Boolean => ParamValue::Boolean(coerce_bool(value)?),
        FieldKind::String | FieldKind::Path => match value {
            Value::String(text) => ParamValue::Text(Cow::Owned(text.clone())),
            other => return Err(format!("expected a string, got {other}")),
        },
        FieldKind::Codec => match value {
            Value::String(text) => ParamValue::Codec(CompressionCodec::lookup(text)?),
            other => return Err(format!("expected a codec name, got {other}")),
        },
    };
    if let Some(range) = spec.range {
        let numeric = match &coerced {
            ParamValue::Integer(value) => Some(*value as f64),
            ParamValue::Float(value) => Some(*value),
            _ => None,
        };
        if let Some(numeric) = numeric {
            range.check(numeric)?;
        }
    }
    Ok(coerced)
}

fn coerce_integer(spec: &ParameterSpec, value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Ok(integer)
            } else {
                match number.as_f64() {
                    Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                        Ok(float as i64)
                    }
                    _ => Err(format!("expected an integer, got {number}")),
                }
            }
        }
        Value::String(text) if spec.human_readable_size => {
            let bytes = parse_size_bytes(text)?;
            i64::try_from(bytes).map_err(|_| format!("size '{text}' is out of range"))
        }
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| format!("expected an integer, got '{text}'")),
        other => Err(format!("expected an integer, got {other}")),
    }
}

fn coerce_float(value: &Value) -> Result<f64, String> {
    let float = match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| format!("expected a number, got {number}"))?,
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| format!("expected a number, got '{text}'"))?,
        other => return Err(format!("expected a number, got {other}")),
    };
    if float.is_finite() {
        Ok(float)
    } else {
        Err(format!("expected a finite number, got {float}"))
    }
}

fn coerce_bool(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) if text.trim().eq_ignore_ascii_case("true") => Ok(true),
        Value::String(text) if text.trim().eq_ignore_ascii_case("false") => Ok(false),
        other => Err(format!("expected a boolean, got {other}")),
    }
}

fn check_split_sizes(values: &IndexMap<&'static str, ParamValue>, errors: &mut ValidationErrors) {
    let min = values.get(MIN_SPLIT_SIZE).and_then(ParamValue::as_integer);
    let max = values.get(MAX_SPLIT_SIZE).and_then(ParamValue::as_integer);
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.push(FieldViolation::across(
                [MIN_SPLIT_SIZE, MAX_SPLIT_SIZE],
                format!(
                    "`{MAX_SPLIT_SIZE}` ({max}) must be greater or equal to `{MIN_SPLIT_SIZE}` ({min})"
                ),
            ));
        }
    }
}
