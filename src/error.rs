//! Error types shared by the build pipelines
//!
//! Pipelines return [`BuildError`]; the command layer wraps it in `eyre` context.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can abort a pipeline run
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("File is not valid UTF-8 text: {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("File name is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("Template {} does not contain placeholder '{placeholder}'", path.display())]
    PlaceholderMissing { path: PathBuf, placeholder: String },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize bundle")]
    Serialize(#[from] serde_json::Error),
}

impl BuildError {
    /// Classify an `io::Error` for `path`, keeping missing files distinct
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => BuildError::NotFound {
                path: path.to_path_buf(),
            },
            _ => BuildError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Read a whole file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String, BuildError> {
    let bytes = std::fs::read(path).map_err(|e| BuildError::from_io(path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => Err(BuildError::Decode {
            path: path.to_path_buf(),
            source: e.utf8_error(),
        }),
    }
}

/// Write text to `path`, creating parent directories and overwriting any existing file
pub fn write_text(path: &Path, text: &str) -> Result<(), BuildError> {
    ensure_parent(path)?;
    std::fs::write(path, text).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent(path: &Path) -> Result<(), BuildError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| BuildError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
