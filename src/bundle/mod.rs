//! Template bundler
//!
//! Packs every file under a directory into one JSON object keyed by
//! root-relative posix path, so the server templates ship as a single artifact.

pub mod collect;
pub mod output;

use indexmap::IndexMap;
use log::{debug, info};
use std::path::PathBuf;

use crate::config::{BundleConfig, Config};
use crate::error::BuildError;

pub use collect::collect;
pub use output::{BundleFormat, render, write};

/// Relative posix path -> file text, in traversal order
pub type FileBundle = IndexMap<String, String>;

/// One bundling run, fully resolved
#[derive(Debug, Clone)]
pub struct BundleJob {
    pub root: PathBuf,
    pub output: PathBuf,
    pub format: BundleFormat,
}

impl BundleJob {
    pub fn from_config(config: &BundleConfig) -> Self {
        Self {
            root: Config::expand_path(&config.root),
            output: Config::expand_path(&config.output),
            format: config.format,
        }
    }
}

/// Outcome of a bundling run
#[derive(Debug, Clone)]
pub struct BundleReport {
    pub bundle: FileBundle,
    /// Serialized JSON document
    pub json: String,
}

/// Collect and serialize the bundle, writing it unless `dry_run` is set
pub fn run(job: &BundleJob, dry_run: bool) -> Result<BundleReport, BuildError> {
    let bundle = collect(&job.root)?;
    info!("Collected {} file(s) from {}", bundle.len(), job.root.display());

    let json = render(&bundle, job.format)?;
    if dry_run {
        debug!("Dry run, not writing {}", job.output.display());
    } else {
        write(&job.output, &json)?;
    }

    Ok(BundleReport { bundle, json })
}
