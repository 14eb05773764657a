//! Serialization of a file bundle

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::FileBundle;
use crate::error::{BuildError, write_text};

/// JSON layout of the written bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// Single line, no whitespace
    #[default]
    Compact,
    /// Indented, one key per line
    Pretty,
}

/// Serialize the bundle as a flat JSON object
pub fn render(bundle: &FileBundle, format: BundleFormat) -> Result<String, BuildError> {
    let json = match format {
        BundleFormat::Compact => serde_json::to_string(bundle)?,
        BundleFormat::Pretty => serde_json::to_string_pretty(bundle)?,
    };
    Ok(json)
}

/// Write the serialized bundle, creating parent directories as needed
pub fn write(output: &Path, json: &str) -> Result<(), BuildError> {
    write_text(output, json)?;
    info!("Wrote bundle: {} ({} bytes)", output.display(), json.len());
    Ok(())
}
