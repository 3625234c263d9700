#![deny(missing_docs)]
#![doc = "Parameter schema, validation and argument rendering for MapReduce streaming jobs."]

pub mod codec;
pub mod errors;
pub mod job;
pub mod schema;
mod size;
pub mod surface;
mod value;

pub use codec::CompressionCodec;
pub use errors::{ErrorInfo, FieldViolation, SweepError, ValidationErrors};
pub use job::{ExecutorSettings, JobConfiguration, DEFAULT_NAMENODE};
pub use schema::{lookup, FieldKind, Group, ParameterSpec, FIELDS, OUTPUT_PATH};
pub use size::parse_size;
pub use surface::{build_argument_descriptor, ArgumentDescriptor, ArgumentSpec, ArgumentVariant};
pub use value::ParamValue;
