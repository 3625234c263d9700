use std::env;
use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{
    job::{self, JobArgs},
    sweep::{self, SweepArgs},
};
use mrsweep_core::{build_argument_descriptor, FIELDS};
use tracing_subscriber::EnvFilter;

mod commands;
mod surface;

#[derive(Parser, Debug)]
#[command(
    name = "mrsweep",
    version,
    about = "Configuration sweeps for Hadoop streaming jobs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the command line of a single job from schema flags.
    Job(JobArgs),
    /// Expand a sweep file into its jobs and their launch plan.
    Sweep(SweepArgs),
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let descriptor = build_argument_descriptor(&FIELDS);
    let matches = Cli::command()
        .mut_subcommand("job", |job| surface::augment(job, &descriptor))
        .get_matches_from(surface::normalize_short_flags(env::args_os(), &descriptor));
    let cli = Cli::from_arg_matches(&matches)?;
    match cli.command {
        Command::Job(args) => {
            let job_matches = matches
                .subcommand_matches("job")
                .ok_or("job arguments missing")?;
            job::run(&args, job_matches, &descriptor)
        }
        Command::Sweep(args) => sweep::run(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
