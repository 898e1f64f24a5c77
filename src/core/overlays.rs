//! Values overlay collection.
//!
//! Overlays are handed to helm as `--values` flags in order, so a later file
//! wins over an earlier one on conflicting keys. Callers control precedence
//! through the order of the directories they pass.
//!
//! Symbolic links are followed; dangling links are ignored.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::constants::{DECRYPTED_MARKER, OVERLAY_EXTENSION};
use crate::core::secrets::is_encrypted;

/// Whether a file qualifies as an overlay.
///
/// Only the encrypted marker is excluded. Decrypted `.dec.yaml` siblings
/// pass this filter.
pub fn is_overlay(path: &Path) -> bool {
    let is_yaml = path
        .extension()
        .map(|ext| ext == OVERLAY_EXTENSION)
        .unwrap_or(false);
    is_yaml && !is_encrypted(path)
}

/// Whether a collected overlay is a decrypted secret.
///
/// Like [`is_encrypted`], this matches the ASCII marker in names that are not
/// valid UTF-8.
pub fn is_decrypted(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(DECRYPTED_MARKER))
        .unwrap_or(false)
}

/// Collect overlay files under `dirs`.
///
/// Directories are visited in the order given. Within a directory, files are
/// sorted by their path relative to it. Missing or unreadable entries are
/// skipped silently.
pub fn collect_overlays(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut overlays = Vec::new();

    for dir in dirs {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_overlay(e.path()))
            .map(|e| e.into_path())
            .collect();
        files.sort();

        trace!(dir = %dir.display(), count = files.len(), "overlays found");
        overlays.extend(files);
    }

    debug!(count = overlays.len(), "overlays collected");
    overlays
}
