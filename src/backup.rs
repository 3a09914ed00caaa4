//! Sibling backup copy of the compose file.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::constants::BACKUP_SUFFIX;

/// Path of the backup for `path`: the same path with `.backup` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` to its backup location, replacing any earlier backup.
///
/// Contents and permissions are copied by [`fs::copy`]; access and
/// modification times are carried over afterwards.
pub fn create_backup(path: &Path) -> io::Result<PathBuf> {
    let dest = backup_path(path);
    fs::copy(path, &dest)?;

    let meta = fs::metadata(path)?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(&dest, atime, mtime)?;

    tracing::debug!(from = %path.display(), to = %dest.display(), "backup written");
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("deploy/docker-compose.yml")),
            PathBuf::from("deploy/docker-compose.yml.backup")
        );
    }

    #[test]
    fn backup_copies_bytes_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("docker-compose.yml");
        fs::write(&src, "services: {}\n").unwrap();
        let stamp = FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&src, stamp).unwrap();

        let dest = create_backup(&src).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"services: {}\n");
        let meta = fs::metadata(&dest).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), stamp);
    }

    #[test]
    fn backup_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("c.yml");
        fs::write(backup_path(&src), "stale").unwrap();
        fs::write(&src, "fresh").unwrap();

        create_backup(&src).unwrap();

        assert_eq!(fs::read_to_string(backup_path(&src)).unwrap(), "fresh");
    }

    #[test]
    fn backup_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create_backup(&dir.path().join("absent.yml")).is_err());
    }
}
