use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bootstrap::DEFAULT_PLACEHOLDER;
use crate::bundle::BundleFormat;

/// Name of the project-local config file
pub const CONFIG_FILE_NAME: &str = "ammbuild.yaml";

/// Main ammbuild configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
    pub bootstrap: BootstrapConfig,
    pub bundle: BundleConfig,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Inputs and output of the bootstrap composer
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Built module package to inline
    pub package: PathBuf,
    /// Loader template containing the placeholder
    pub template: PathBuf,
    pub output: PathBuf,
    pub placeholder: String,
    /// Touch a `.nojekyll` marker next to the output (GitHub Pages)
    pub nojekyll: bool,
}

/// Inputs and output of the template bundler
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BundleConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub format: BundleFormat,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            package: PathBuf::from("build/taminomara-amm-ammcore/package"),
            template: PathBuf::from("taminomara-amm-ammcore/_templates/bootstrap/bootstrap.lua"),
            output: PathBuf::from("docs/_build/html/bootstrap.lua"),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            nojekyll: false,
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("server_template"),
            output: PathBuf::from("taminomara-amm-ammcore/_templates/server.json"),
            format: BundleFormat::Compact,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Config files that exist but fail to load are skipped; their errors are
    /// returned alongside the config so they can be reported once logging is up.
    pub fn load(config_path: Option<&PathBuf>) -> Result<(Self, Vec<String>)> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok((config, Vec::new()));
        }

        let env_path = std::env::var_os("AMMBUILD_CONFIG").map(PathBuf::from);
        Ok(Self::load_chain(env_path, Path::new(CONFIG_FILE_NAME)))
    }

    /// Try `env_path`, then `local_path`, then fall back to defaults
    fn load_chain(env_path: Option<PathBuf>, local_path: &Path) -> (Self, Vec<String>) {
        let mut skipped = Vec::new();

        // Check AMMBUILD_CONFIG env var
        if let Some(path) = env_path {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return (config, skipped),
                    Err(e) => {
                        skipped.push(format!("Ignoring AMMBUILD_CONFIG {}: {:#}", path.display(), e));
                    }
                }
            } else {
                log::debug!("AMMBUILD_CONFIG points to missing file: {}", path.display());
            }
        }

        // Try ./ammbuild.yaml next to the project
        if local_path.exists() {
            match Self::load_from_file(local_path) {
                Ok(config) => return (config, skipped),
                Err(e) => {
                    skipped.push(format!("Ignoring local config {}: {:#}", local_path.display(), e));
                }
            }
        }

        log::debug!("No usable config file found, using defaults");
        (Self::default(), skipped)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config = Self::from_yaml(&content)?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse configuration from a YAML string; an empty document yields defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
