//! Bundle the server templates

use colored::*;
use eyre::{Context, Result};

use crate::bundle::{self, BundleFormat, BundleJob};
use crate::cli::BundleArgs;
use crate::config::Config;

pub fn run(args: BundleArgs, config: &Config, quiet: bool) -> Result<()> {
    let dry_run = args.dry_run;
    let job = job_for(args, config);
    execute(&job, dry_run, quiet)
}

/// Resolve the job from config, letting command-line flags win
fn job_for(args: BundleArgs, config: &Config) -> BundleJob {
    let mut job = BundleJob::from_config(&config.bundle);
    if let Some(root) = args.root {
        job.root = Config::expand_path(&root);
    }
    if let Some(output) = args.output {
        job.output = Config::expand_path(&output);
    }
    if args.pretty {
        job.format = BundleFormat::Pretty;
    }
    job
}

pub fn execute(job: &BundleJob, dry_run: bool, quiet: bool) -> Result<()> {
    let report = bundle::run(job, dry_run)
        .with_context(|| format!("Failed to bundle {}", job.root.display()))?;

    if quiet {
        return Ok(());
    }

    let summary = format!("({} files, {} bytes)", report.bundle.len(), report.json.len());
    if dry_run {
        println!("{} Would write {} {}", "→".blue(), job.output.display(), summary.dimmed());
        for key in report.bundle.keys() {
            println!("    {}", key.dimmed());
        }
    } else {
        println!("{} Wrote {} {}", "✓".green(), job.output.display(), summary.dimmed());
    }

    Ok(())
}
