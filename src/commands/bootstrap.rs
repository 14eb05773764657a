//! Compose the bootstrap loader

use colored::*;
use eyre::{Context, Result};

use crate::bootstrap::{self, BootstrapJob};
use crate::cli::BootstrapArgs;
use crate::config::Config;

pub fn run(args: BootstrapArgs, config: &Config, quiet: bool) -> Result<()> {
    let dry_run = args.dry_run;
    let job = job_for(args, config);
    execute(&job, dry_run, quiet)
}

/// Resolve the job from config, letting command-line flags win
fn job_for(args: BootstrapArgs, config: &Config) -> BootstrapJob {
    let mut job = BootstrapJob::from_config(&config.bootstrap);
    if let Some(package) = args.package {
        job.package = Config::expand_path(&package);
    }
    if let Some(template) = args.template {
        job.template = Config::expand_path(&template);
    }
    if let Some(output) = args.output {
        job.output = Config::expand_path(&output);
    }
    job.nojekyll |= args.nojekyll;
    job
}

pub fn execute(job: &BootstrapJob, dry_run: bool, quiet: bool) -> Result<()> {
    let composition = bootstrap::run(job, dry_run)
        .with_context(|| format!("Failed to compose bootstrap {}", job.output.display()))?;

    if quiet {
        return Ok(());
    }

    let summary = format!(
        "({} bytes, {} placeholder(s) replaced)",
        composition.text.len(),
        composition.replacements
    );
    if dry_run {
        println!("{} Would write {} {}", "→".blue(), job.output.display(), summary.dimmed());
        if let Some(marker) = job.nojekyll_path() {
            println!("{} Would touch {}", "→".blue(), marker.display());
        }
    } else {
        println!("{} Wrote {} {}", "✓".green(), job.output.display(), summary.dimmed());
        if let Some(marker) = job.nojekyll_path() {
            println!("{} Touched {}", "✓".green(), marker.display());
        }
    }

    Ok(())
}
