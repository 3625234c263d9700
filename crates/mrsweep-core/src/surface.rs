//! Command line argument descriptors derived from the parameter table.
//!
//! The descriptor is a plain data description; turning it into an actual
//! parser is left to the binary so this crate stays free of CLI dependencies.

use serde::Serialize;

use crate::codec::CompressionCodec;
use crate::schema::{FieldKind, Group, ParameterSpec};
use crate::value::ParamValue;

/// Flags grouped by documentation heading, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentDescriptor {
    /// Non-empty groups in order of first appearance.
    pub groups: Vec<ArgumentGroup>,
}

impl ArgumentDescriptor {
    /// All arguments regardless of group, in schema order within each group.
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.groups.iter().flat_map(|group| group.arguments.iter())
    }

    /// Finds the argument generated for `field`.
    pub fn argument(&self, field: &str) -> Option<&ArgumentSpec> {
        self.arguments().find(|argument| argument.field == field)
    }
}

/// One documentation group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentGroup {
    /// Group every argument belongs to.
    pub group: Group,
    /// Help heading, see [`Group::title`].
    pub title: &'static str,
    /// Arguments in schema order.
    pub arguments: Vec<ArgumentSpec>,
}

/// Flag set and rendering variant for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentSpec {
    /// Canonical field name; also the clap argument id.
    pub field: &'static str,
    /// `-alias`, when the field declares one.
    pub short_flag: Option<String>,
    /// `--field_name`.
    pub long_flag: String,
    /// How the value is parsed.
    pub variant: ArgumentVariant,
    /// Field help with the default value appended.
    pub help: String,
}

/// How a flag's value is accepted on the command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum ArgumentVariant {
    /// Case-insensitive member names of an enumeration.
    Choice {
        /// Accepted names.
        choices: Vec<&'static str>,
        /// Name of the default member.
        default: &'static str,
    },
    /// Byte counts in the `parse_size` grammar.
    Size {
        /// Default in bytes.
        default: u64,
    },
    /// A bare flag flipping the field away from its default.
    Toggle {
        /// Effect of giving the flag.
        action: ToggleAction,
    },
    /// A value parsed directly into the field's declared type.
    Scalar {
        /// Declared field type.
        kind: FieldKind,
        /// Value used when the flag is absent.
        default: ParamValue,
    },
}

/// Effect of a toggle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToggleAction {
    /// Default is `false`; the flag sets it.
    Set,
    /// Default is `true`; the flag clears it.
    Clear,
}

/// Builds the argument descriptor for `schema`.
pub fn build_argument_descriptor(schema: &'static [ParameterSpec]) -> ArgumentDescriptor {
    let mut groups: Vec<ArgumentGroup> = Vec::new();
    for spec in schema {
        let argument = argument_for(spec);
        match groups.iter_mut().find(|group| group.group == spec.group) {
            Some(group) => group.arguments.push(argument),
            None => groups.push(ArgumentGroup {
                group: spec.group,
                title: spec.group.title(),
                arguments: vec![argument],
            }),
        }
    }
    ArgumentDescriptor { groups }
}

fn argument_for(spec: &'static ParameterSpec) -> ArgumentSpec {
    let (variant, help) = match (spec.kind, &spec.default) {
        (FieldKind::Codec, default) => {
            let default = match default {
                ParamValue::Codec(codec) => codec.name(),
                _ => CompressionCodec::Default.name(),
            };
            let choices: Vec<&'static str> =
                CompressionCodec::ALL.iter().map(|codec| codec.name()).collect();
            let help = format!(
                "{} (options: {}, default: {default})",
                spec.help,
                choices.join(", ")
            );
            (ArgumentVariant::Choice { choices, default }, help)
        }
        (FieldKind::Integer, ParamValue::Integer(default)) if spec.human_readable_size => {
            let default = u64::try_from(*default).unwrap_or_default();
            let help = format!(
                "{} (accepts 256MB, 1G, etc., default: {default} bytes)",
                spec.help
            );
            (ArgumentVariant::Size { default }, help)
        }
        (FieldKind::Boolean, ParamValue::Boolean(default)) => {
            let action = if *default {
                ToggleAction::Clear
            } else {
                ToggleAction::Set
            };
            let help = format!("{} (default: {default})", spec.help);
            (ArgumentVariant::Toggle { action }, help)
        }
        (kind, default) => {
            let help = format!("{} (default: {default})", spec.help);
            let variant = ArgumentVariant::Scalar {
                kind,
                default: default.clone(),
            };
            (variant, help)
        }
    };
    ArgumentSpec {
        field: spec.name,
        short_flag: (!spec.alias.is_empty()).then(|| format!("-{}", spec.alias)),
        long_flag: format!("--{}", spec.name),
        variant,
        help,
    }
}
