use log::{debug, info};
use std::path::PathBuf;

use crate::config::{BootstrapConfig, Config};
use crate::error::{BuildError, read_text, write_text};

/// Marker in the loader template that gets replaced with the package text
pub const DEFAULT_PLACEHOLDER: &str = "[[{ modules }]]";

/// Name of the GitHub Pages marker written next to the output
const NOJEKYLL: &str = ".nojekyll";

/// One bootstrap composition, fully resolved
#[derive(Debug, Clone)]
pub struct BootstrapJob {
    pub package: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub placeholder: String,
    pub nojekyll: bool,
}

impl BootstrapJob {
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self {
            package: Config::expand_path(&config.package),
            template: Config::expand_path(&config.template),
            output: Config::expand_path(&config.output),
            placeholder: config.placeholder.clone(),
            nojekyll: config.nojekyll,
        }
    }

    /// Path of the `.nojekyll` marker, if one is requested
    pub fn nojekyll_path(&self) -> Option<PathBuf> {
        if !self.nojekyll {
            return None;
        }
        Some(match self.output.parent() {
            Some(parent) => parent.join(NOJEKYLL),
            None => PathBuf::from(NOJEKYLL),
        })
    }
}

/// Result of substituting the package into a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub text: String,
    /// Number of placeholder occurrences replaced
    pub replacements: usize,
}

/// Replace every occurrence of `placeholder` in `template` with `package`
pub fn render(template: &str, package: &str, placeholder: &str) -> Composition {
    if placeholder.is_empty() {
        return Composition {
            text: template.to_string(),
            replacements: 0,
        };
    }

    let replacements = template.matches(placeholder).count();
    Composition {
        text: template.replace(placeholder, package),
        replacements,
    }
}

/// Read both inputs and render the loader; a template without the placeholder is rejected
pub fn compose(job: &BootstrapJob) -> Result<Composition, BuildError> {
    let package = read_text(&job.package)?;
    info!("Read package: {} ({} bytes)", job.package.display(), package.len());

    let template = read_text(&job.template)?;
    info!("Read template: {} ({} bytes)", job.template.display(), template.len());

    let composition = render(&template, &package, &job.placeholder);
    if composition.replacements == 0 {
        return Err(BuildError::PlaceholderMissing {
            path: job.template.clone(),
            placeholder: job.placeholder.clone(),
        });
    }
    debug!("Replaced {} placeholder occurrence(s)", composition.replacements);

    Ok(composition)
}

/// Write a composed loader to the job's output
pub fn write(job: &BootstrapJob, composition: &Composition) -> Result<(), BuildError> {
    write_text(&job.output, &composition.text)?;
    info!("Wrote bootstrap: {}", job.output.display());

    if let Some(marker) = job.nojekyll_path() {
        touch(&marker)?;
        info!("Touched {}", marker.display());
    }

    Ok(())
}

/// Compose the loader and write it unless `dry_run` is set
pub fn run(job: &BootstrapJob, dry_run: bool) -> Result<Composition, BuildError> {
    let composition = compose(job)?;
    if dry_run {
        debug!("Dry run, not writing {}", job.output.display());
    } else {
        write(job, &composition)?;
    }
    Ok(composition)
}

/// Create an empty file, leaving an existing one untouched
fn touch(path: &std::path::Path) -> Result<(), BuildError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
}
