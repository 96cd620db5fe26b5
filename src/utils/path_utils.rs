//! Path utility functions
//!
//! Utilities for normalizing scan-file paths against the root data
//! directory. Stored paths use posix separators regardless of platform.

use std::path::{Component, Path, PathBuf};
use crate::scanfile::errors::{ScanError, ScanResult};

/// Expresses `path` relative to `root` using posix separators
///
/// The path must be a strict descendant of the root; the root itself or
/// anything outside it is a resolution error.
///
/// # Arguments
/// * `path` - Absolute path to a scan file
/// * `root` - The configured root data directory
///
/// # Returns
/// The relative path as a posix-style string
pub fn relative_posix_path(path: &Path, root: &Path) -> ScanResult<String> {
    let relative = path.strip_prefix(root).map_err(|_| ScanError::PathOutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;

    if relative.as_os_str().is_empty() {
        return Err(ScanError::PathOutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        });
    }

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            _ => {
                return Err(ScanError::PathOutsideRoot {
                    path: path.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
        }
    }

    Ok(parts.join("/"))
}

/// Joins a posix-style relative path back onto a root directory
///
/// Inverse of `relative_posix_path`, used to re-locate files from a
/// stored record.
pub fn join_posix_path(root: &Path, relative: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in relative.split('/').filter(|p| !p.is_empty()) {
        path.push(part);
    }
    path
}
