//! Run every pipeline in order

use eyre::Result;
use log::info;

use crate::bootstrap::BootstrapJob;
use crate::bundle::BundleJob;
use crate::config::Config;

use super::{bootstrap, bundle};

pub fn run(dry_run: bool, config: &Config, quiet: bool) -> Result<()> {
    info!("Building bootstrap and template bundle");

    // Bootstrap first; a failure stops the run before the bundle is touched
    bootstrap::execute(&BootstrapJob::from_config(&config.bootstrap), dry_run, quiet)?;
    bundle::execute(&BundleJob::from_config(&config.bundle), dry_run, quiet)?;

    Ok(())
}
