pub mod bootstrap;
pub mod build;
pub mod bundle;
pub mod check;
pub mod completions;
pub mod config;
