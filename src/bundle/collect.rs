//! Directory traversal for the template bundler

use log::debug;
use std::path::{Component, Path};
use walkdir::WalkDir;

use super::FileBundle;
use crate::error::{BuildError, read_text};

/// Read every file under `root` into a bundle keyed by relative posix path
pub fn collect(root: &Path) -> Result<FileBundle, BuildError> {
    let metadata = std::fs::metadata(root).map_err(|e| BuildError::from_io(root, e))?;
    if !metadata.is_dir() {
        return Err(BuildError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut bundle = FileBundle::new();

    // Sorted so repeated runs serialize identically
    let walker = WalkDir::new(root).sort_by_file_name().into_iter();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(source) => BuildError::from_io(&path, source),
                None => BuildError::Io {
                    path,
                    source: std::io::Error::other("filesystem loop"),
                },
            }
        })?;

        let path = entry.path();
        if entry.file_type().is_dir() {
            continue;
        }
        // Symlinks count only when they resolve to a regular file; dangling ones are missing inputs
        if entry.file_type().is_symlink() && !path.is_file() {
            if !path.exists() {
                return Err(BuildError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!("Skipping symlink to a directory: {}", path.display());
            continue;
        }

        let key = relative_key(root, path)?;
        let content = read_text(path)?;
        debug!("Bundled {} ({} bytes)", key, content.len());
        bundle.insert(key, content);
    }

    Ok(bundle)
}

/// Path of `path` relative to `root`, joined with forward slashes
pub fn relative_key(root: &Path, path: &Path) -> Result<String, BuildError> {
    let relative = path.strip_prefix(root).map_err(|_| BuildError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(format!("path is outside of {}", root.display())),
    })?;

    // Keys must stay distinct per file, so non-UTF-8 names are rejected
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| BuildError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}
