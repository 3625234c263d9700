use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use mrsweep_exp::{
    build_report, expand, format_user_selection, load_sweep_file, to_canonical_json_bytes,
    ExpandedGrid, SweepReport,
};
use tracing::info;

use super::shell_join;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML sweep file.
    #[arg(long)]
    pub plan: PathBuf,
    /// Directory receiving `sweep_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Print the sweep settings and the number of jobs, then exit.
    #[arg(short = 'p', long)]
    pub print_configurations_only: bool,
    /// Measure every job under this single session id.
    #[arg(short = 's', long)]
    pub shared_session_id: Option<String>,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let file = load_sweep_file(&args.plan)?;
    let spec = file.specification()?;
    let grid = expand(&spec)?;

    if args.print_configurations_only {
        println!("{}", file.to_yaml_string()?);
        println!("{} job(s), grid hash {}", grid.len(), grid.grid_hash());
        return Ok(());
    }

    let report = build_report(
        &grid,
        &spec,
        &file.executor,
        &file.trigger,
        args.shared_session_id.as_deref(),
    );
    print_report(&report, &grid);
    if let Some(out) = &args.out {
        persist_report(out, &report)?;
    }
    Ok(())
}

fn print_report(report: &SweepReport, grid: &ExpandedGrid) {
    let total = report.jobs.len();
    if let Some(start) = &report.shared_start_trigger {
        println!("start: {}", shell_join(start));
    }
    for (job, entry) in report.jobs.iter().zip(grid) {
        println!("\nJob {} / {total}", job.index + 1);
        if let Some(session_id) = &job.session_id {
            println!("Session ID: {session_id}");
        }
        println!("{}", format_user_selection(&entry.user_selection()));
        if let Some(start) = &job.start_trigger {
            println!("start: {}", shell_join(start));
        }
        println!("run: {}", shell_join(&job.command));
    }
    println!("\nstop: {}", shell_join(&report.stop_trigger));
}

fn persist_report(out: &Path, report: &SweepReport) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(out)?;
    let path = out.join("sweep_report.json");
    fs::write(&path, to_canonical_json_bytes(report)?)?;
    info!(path = %path.display(), jobs = report.jobs.len(), "sweep report written");
    Ok(())
}
