//! Schema-generated job flags.
//!
//! Every field gets `--field_name`. Single-character aliases become clap short
//! flags; longer aliases (`-mp`) are accepted by rewriting them to long aliases
//! (`--mp`) before parsing, see [`normalize_short_flags`].

use std::ffi::OsString;

use clap::builder::PossibleValuesParser;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use indexmap::IndexMap;
use mrsweep_core::schema::FieldKind;
use mrsweep_core::surface::ToggleAction;
use mrsweep_core::{
    parse_size, ArgumentDescriptor, ArgumentSpec, ArgumentVariant, JobConfiguration, SweepError,
};
use serde_json::{json, Number, Value};

/// Adds one argument per descriptor entry, under its group heading.
pub fn augment(command: Command, descriptor: &ArgumentDescriptor) -> Command {
    descriptor.groups.iter().fold(command, |command, group| {
        group.arguments.iter().fold(command, |command, argument| {
            command.arg(build_arg(argument).help_heading(group.title))
        })
    })
}

fn build_arg(argument: &ArgumentSpec) -> Arg {
    let mut arg = Arg::new(argument.field)
        .long(argument.field)
        .help(argument.help.clone());
    if let Some(alias) = argument.short_flag.as_deref().map(|flag| flag.trim_start_matches('-')) {
        let mut chars = alias.chars();
        arg = match (chars.next(), chars.next()) {
            (Some(short), None) => arg.short(short),
            _ => arg.visible_alias(alias.to_string()),
        };
    }
    match &argument.variant {
        ArgumentVariant::Choice { choices, .. } => arg
            .value_parser(PossibleValuesParser::new(choices.clone()))
            .ignore_case(true),
        ArgumentVariant::Size { .. } => arg.value_name("SIZE").value_parser(parse_size_flag),
        ArgumentVariant::Toggle {
            action: ToggleAction::Set,
        } => arg.action(ArgAction::SetTrue),
        ArgumentVariant::Toggle {
            action: ToggleAction::Clear,
        } => arg.action(ArgAction::SetFalse),
        ArgumentVariant::Scalar { kind, .. } => match kind {
            FieldKind::Integer => arg.value_parser(value_parser!(i64)),
            FieldKind::Float => arg.value_parser(value_parser!(f64)),
            FieldKind::Boolean => arg.value_parser(value_parser!(bool)),
            FieldKind::String | FieldKind::Path | FieldKind::Codec => {
                arg.value_parser(value_parser!(String))
            }
        },
    }
}

fn parse_size_flag(text: &str) -> Result<u64, String> {
    parse_size(text).map_err(|err| err.to_string())
}

/// Rewrites multi-character short aliases (`-mp x`, `-mp=x`) to their long
/// alias form so clap does not read them as clustered short flags.
///
/// Everything after a bare `--` is left untouched.
pub fn normalize_short_flags<I, T>(args: I, descriptor: &ArgumentDescriptor) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let multi: Vec<&str> = descriptor
        .arguments()
        .filter_map(|argument| argument.short_flag.as_deref())
        .filter(|flag| flag.len() > 2)
        .collect();
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let head = text.split_once('=').map_or(text, |(head, _)| head);
            if multi.iter().any(|flag| *flag == head) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Builds a job configuration from the flags given on the command line.
///
/// Only explicitly supplied flags are forwarded; everything else takes the
/// schema default inside [`JobConfiguration::parse`].
pub fn from_parsed_arguments(
    matches: &ArgMatches,
    descriptor: &ArgumentDescriptor,
) -> Result<JobConfiguration, SweepError> {
    JobConfiguration::parse(&parsed_mapping(matches, descriptor))
}

/// Raw field values for the flags supplied on the command line.
pub(crate) fn parsed_mapping(
    matches: &ArgMatches,
    descriptor: &ArgumentDescriptor,
) -> IndexMap<String, Value> {
    let mut raw: IndexMap<String, Value> = IndexMap::new();
    for argument in descriptor.arguments() {
        let id = argument.field;
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            continue;
        }
        let value = match &argument.variant {
            ArgumentVariant::Choice { .. } => matches.get_one::<String>(id).map(|v| json!(v)),
            ArgumentVariant::Size { .. } => matches.get_one::<u64>(id).map(|v| json!(v)),
            ArgumentVariant::Toggle { .. } => Some(json!(matches.get_flag(id))),
            ArgumentVariant::Scalar { kind, .. } => match kind {
                FieldKind::Integer => matches.get_one::<i64>(id).map(|v| json!(v)),
                // NaN and infinities have no JSON number form; validation sees them as text.
                FieldKind::Float => matches.get_one::<f64>(id).map(|v| {
                    Number::from_f64(*v).map_or_else(|| json!(v.to_string()), Value::Number)
                }),
                FieldKind::Boolean => matches.get_one::<bool>(id).map(|v| json!(v)),
                FieldKind::String | FieldKind::Path | FieldKind::Codec => {
                    matches.get_one::<String>(id).map(|v| json!(v))
                }
            },
        };
        if let Some(value) = value {
            raw.insert(id.to_string(), value);
        }
    }
    raw
}
