//! Artifact paths and writes
//!
//! A binary dataset is a storage pair: `<path>` holds the payload and
//! `<path>.meta` the header. Writes go through [`write_artifact`], which
//! optionally stages into `<artifact>.tmp` and renames into place.

use crate::error::{IoResultExt, Result};
use dsio_core::constants::{META_SUFFIX, STAGING_SUFFIX};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Append a suffix to the full file name (not replacing an extension)
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Metadata artifact path for a payload path
pub fn meta_path(path: &Path) -> PathBuf {
    with_suffix(path, META_SUFFIX)
}

pub(crate) fn staging_path(path: &Path) -> PathBuf {
    with_suffix(path, STAGING_SUFFIX)
}

/// Payload path for a path that may name either half of a storage pair
pub fn payload_path(path: &Path) -> PathBuf {
    match path.to_str().and_then(|s| s.strip_suffix(META_SUFFIX)) {
        Some(base) if !base.is_empty() => PathBuf::from(base),
        _ => path.to_path_buf(),
    }
}

/// Write `bytes` to `path`, staging through a temporary sibling when asked
pub(crate) fn write_artifact(path: &Path, bytes: &[u8], staged: bool) -> Result<()> {
    if !staged {
        let mut file = File::create(path).at_path(path)?;
        file.write_all(bytes).at_path(path)?;
        return file.flush().at_path(path);
    }

    let tmp = staging_path(path);
    let written = (|| {
        let mut file = File::create(&tmp).at_path(&tmp)?;
        file.write_all(bytes).at_path(&tmp)?;
        file.sync_all().at_path(&tmp)?;
        fs::rename(&tmp, path).at_path(path)
    })();

    if written.is_err() {
        if let Err(err) = fs::remove_file(&tmp) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %tmp.display(), error = %err, "failed to remove staging file");
            }
        }
    } else {
        debug!(path = %path.display(), bytes = bytes.len(), "artifact committed");
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_suffix_paths() {
        assert_eq!(meta_path(Path::new("dir/points.dat")), PathBuf::from("dir/points.dat.meta"));
        assert_eq!(staging_path(Path::new("points")), PathBuf::from("points.tmp"));
        assert_eq!(payload_path(Path::new("dir/points.dat.meta")), PathBuf::from("dir/points.dat"));
        assert_eq!(payload_path(Path::new("dir/points.dat")), PathBuf::from("dir/points.dat"));
        assert_eq!(payload_path(Path::new(".meta")), PathBuf::from(".meta"));
    }

    #[test]
    fn test_staged_write_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact");

        write_artifact(&path, b"hello", true).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert!(!staging_path(&path).exists());

        write_artifact(&path, b"replaced", false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"replaced");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("artifact");
        for staged in [true, false] {
            let err = write_artifact(&path, b"x", staged).unwrap_err();
            assert!(matches!(err, crate::Error::Io { .. }));
        }
    }
}
