//! Validate build inputs without writing anything

use colored::*;
use eyre::Result;
use serde::Serialize;
use std::path::Path;

use crate::bootstrap::{self, BootstrapJob};
use crate::bundle::{self, BundleJob};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{BuildError, read_text};

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    path: String,
    ok: bool,
    detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, path: &Path, detail: String) -> Self {
        Self {
            name,
            path: path.display().to_string(),
            ok: true,
            detail,
        }
    }

    fn fail(name: &'static str, path: &Path, err: BuildError) -> Self {
        Self {
            name,
            path: path.display().to_string(),
            ok: false,
            detail: format!("{:#}", eyre::Report::new(err)),
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    ok: bool,
    checks: Vec<CheckResult>,
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let report = check_all(
        &BootstrapJob::from_config(&config.bootstrap),
        &BundleJob::from_config(&config.bundle),
    );

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", "ammbuild check".bold());
            println!("{}", "═".repeat(50));
            println!();

            for check in &report.checks {
                if check.ok {
                    println!("{} {}: {} {}", "✓".green(), check.name, check.path, check.detail.dimmed());
                } else {
                    println!("{} {}: {}", "✗".red(), check.name, check.path);
                    println!("  {}", check.detail);
                }
            }
            println!();
        }
    }

    let failed = report.checks.iter().filter(|c| !c.ok).count();
    if failed > 0 {
        eyre::bail!("{} check(s) failed", failed);
    }

    if format == OutputFormat::Text {
        println!("{}", "All checks passed".green());
    }

    Ok(())
}

fn check_all(bootstrap_job: &BootstrapJob, bundle_job: &BundleJob) -> CheckReport {
    let checks = vec![
        check_package(bootstrap_job),
        check_template(bootstrap_job),
        check_bundle_root(bundle_job),
    ];
    let ok = checks.iter().all(|c| c.ok);
    CheckReport { ok, checks }
}

fn check_package(job: &BootstrapJob) -> CheckResult {
    match read_text(&job.package) {
        Ok(text) => CheckResult::pass("package", &job.package, format!("{} bytes", text.len())),
        Err(e) => CheckResult::fail("package", &job.package, e),
    }
}

fn check_template(job: &BootstrapJob) -> CheckResult {
    let template = match read_text(&job.template) {
        Ok(text) => text,
        Err(e) => return CheckResult::fail("template", &job.template, e),
    };

    let occurrences = bootstrap::render(&template, "", &job.placeholder).replacements;
    if occurrences == 0 {
        return CheckResult::fail(
            "template",
            &job.template,
            BuildError::PlaceholderMissing {
                path: job.template.clone(),
                placeholder: job.placeholder.clone(),
            },
        );
    }

    CheckResult::pass("template", &job.template, format!("{} placeholder(s)", occurrences))
}

fn check_bundle_root(job: &BundleJob) -> CheckResult {
    match bundle::collect(&job.root) {
        Ok(files) => CheckResult::pass("bundle", &job.root, format!("{} file(s)", files.len())),
        Err(e) => CheckResult::fail("bundle", &job.root, e),
    }
}
