//! Bootstrap composer
//!
//! Inlines the built module package into the bootstrap loader template.

pub mod compose;

pub use compose::{BootstrapJob, DEFAULT_PLACEHOLDER, render, run};
