use std::error::Error;

use clap::{ArgMatches, Args};
use mrsweep_core::{ArgumentDescriptor, ExecutorSettings};
use tracing::debug;

use super::shell_join;
use crate::surface::from_parsed_arguments;

#[derive(Args, Debug)]
pub struct JobArgs {
    /// Print the command as one shell-quoted line instead of one token per line.
    #[arg(long, conflicts_with = "json")]
    pub shell: bool,
    /// Print the validated configuration as JSON instead of the command.
    #[arg(long)]
    pub json: bool,
    /// Executable launching the job.
    #[arg(long)]
    pub program: Option<String>,
    /// Streaming jar passed after `jar`.
    #[arg(long)]
    pub streaming_jar: Option<String>,
    /// URI prefix added to the `-input` and `-output` operands.
    #[arg(long)]
    pub namenode: Option<String>,
}

impl JobArgs {
    fn executor(&self) -> ExecutorSettings {
        let defaults = ExecutorSettings::default();
        ExecutorSettings {
            program: self.program.clone().unwrap_or(defaults.program),
            streaming_jar: self.streaming_jar.clone().unwrap_or(defaults.streaming_jar),
            namenode: self.namenode.clone().unwrap_or(defaults.namenode),
        }
    }
}

pub fn run(
    args: &JobArgs,
    matches: &ArgMatches,
    descriptor: &ArgumentDescriptor,
) -> Result<(), Box<dyn Error>> {
    let config = from_parsed_arguments(matches, descriptor)?;
    debug!(output_path = config.output_path(), "job configuration parsed");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    let command = args.executor().command(&config);
    if args.shell {
        println!("{}", shell_join(&command));
    } else {
        for token in &command {
            println!("{token}");
        }
    }
    Ok(())
}
