//! Secret decryption pipeline.
//!
//! Encrypted files carry `.enc.` in their name and are checked into the
//! repository. Each one is decrypted to a sibling with `.dec.` in place of
//! the marker. Decrypted files are left on disk.
//!
//! Symbolic links are followed. A link whose target is missing is skipped
//! with a warning.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::core::constants::{DECRYPTED_MARKER, ENCRYPTED_MARKER};
use crate::core::runner::Runner;
use crate::core::tools::Tools;
use crate::error::{Result, SecretError};

/// Whether a file name carries the encrypted marker.
///
/// The marker is ASCII, so a name that is not valid UTF-8 is still detected.
pub fn is_encrypted(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(ENCRYPTED_MARKER))
        .unwrap_or(false)
}

/// Sibling path a file decrypts to.
///
/// Exactly one `.enc.` in the file name becomes `.dec.`; the rest of the
/// path is untouched.
///
/// # Errors
///
/// - `SecretError::DegenerateMarker` if the name carries no marker
/// - `SecretError::RepeatedMarker` if the name carries more than one, since
///   the result would still look encrypted
/// - `SecretError::NonUtf8Name` if the name is not valid UTF-8
pub fn decrypted_path(encrypted: &Path) -> Result<PathBuf> {
    let Some(name) = encrypted.file_name() else {
        return Err(SecretError::DegenerateMarker(encrypted.to_path_buf()).into());
    };
    let name = name
        .to_str()
        .ok_or_else(|| SecretError::NonUtf8Name(encrypted.to_path_buf()))?;

    if !name.contains(ENCRYPTED_MARKER) {
        return Err(SecretError::DegenerateMarker(encrypted.to_path_buf()).into());
    }
    let renamed = name.replacen(ENCRYPTED_MARKER, DECRYPTED_MARKER, 1);
    if renamed.contains(ENCRYPTED_MARKER) {
        return Err(SecretError::RepeatedMarker(encrypted.to_path_buf()).into());
    }

    Ok(encrypted.with_file_name(renamed))
}

/// Every encrypted file under `dirs`, at any depth.
///
/// Directories are visited in order; files within one directory are sorted
/// by path. Missing directories contribute nothing. Overlapping directories
/// are not de-duplicated.
///
/// # Errors
///
/// Returns `SecretError::Walk` if an existing directory cannot be read.
pub fn find_encrypted(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for dir in dirs {
        if !dir.exists() {
            debug!(dir = %dir.display(), "skipping missing directory");
            continue;
        }

        let mut matches = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling(&err) => {
                    warn!(path = ?err.path(), "skipping dangling link");
                    continue;
                }
                Err(source) => {
                    return Err(SecretError::Walk {
                        path: dir.clone(),
                        source,
                    }
                    .into())
                }
            };
            if entry.file_type().is_file() && is_encrypted(entry.path()) {
                matches.push(entry.into_path());
            }
        }
        matches.sort();

        trace!(dir = %dir.display(), count = matches.len(), "encrypted files found");
        found.extend(matches);
    }

    Ok(found)
}

fn is_dangling(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_none()
        && err
            .io_error()
            .map(|e| e.kind() == ErrorKind::NotFound)
            .unwrap_or(false)
}

/// Decrypt every encrypted file under `dirs`.
///
/// All destinations are computed before the first decryption runs, so a
/// naming violation aborts without touching anything. The first tool
/// failure aborts the rest.
///
/// Returns the number of files decrypted.
pub fn decrypt_all(dirs: &[PathBuf], runner: &dyn Runner, tools: &Tools) -> Result<usize> {
    let plan = find_encrypted(dirs)?
        .into_iter()
        .map(|source| decrypted_path(&source).map(|dest| (source, dest)))
        .collect::<Result<Vec<_>>>()?;

    debug!(files = plan.len(), "decrypting");
    for (source, dest) in &plan {
        trace!(source = %source.display(), dest = %dest.display(), "decrypt");
        runner.run(&tools.decrypt(source, dest))?;
    }

    Ok(plan.len())
}
