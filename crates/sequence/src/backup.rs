//! Timestamped backups of settings files before a run overwrites them.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::discovery::SIDECAR_EXTENSION;
use crate::error::SettingsError;

/// Prefix of backup directory names.
pub const BACKUP_PREFIX: &str = "lapse-backup_";

/// Outcome of a backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub dir: PathBuf,
    pub files: usize,
}

/// Copy every settings file in `dir` into a new timestamped subdirectory.
///
/// Returns `None` when there is nothing to back up.
pub fn backup_settings(dir: &Path) -> Result<Option<Backup>, SettingsError> {
    backup_settings_at(dir, Local::now())
}

/// [`backup_settings`] with an explicit timestamp.
pub fn backup_settings_at(
    dir: &Path,
    timestamp: DateTime<Local>,
) -> Result<Option<Backup>, SettingsError> {
    let mut sources = vec![];
    for entry in std::fs::read_dir(dir).map_err(|e| SettingsError::io(dir, e))? {
        let path = entry.map_err(|e| SettingsError::io(dir, e))?.path();
        let is_settings = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SIDECAR_EXTENSION));
        if is_settings {
            sources.push(path);
        }
    }
    if sources.is_empty() {
        return Ok(None);
    }

    let backup_dir = dir.join(format!(
        "{BACKUP_PREFIX}{}",
        timestamp.format("%Y%m%d_%H%M%S")
    ));
    std::fs::create_dir_all(&backup_dir).map_err(|e| SettingsError::io(&backup_dir, e))?;

    for source in &sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = backup_dir.join(name);
        std::fs::copy(source, &target).map_err(|e| SettingsError::io(&target, e))?;
    }

    tracing::info!(dir = %backup_dir.display(), files = sources.len(), "Backed up settings files");

    Ok(Some(Backup {
        dir: backup_dir,
        files: sources.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_backup_copies_settings_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.NEF"), b"raw").unwrap();
        std::fs::write(dir.path().join("a.NEF.pp3"), "[Crop]\nEnabled=false\n").unwrap();
        std::fs::write(dir.path().join("b.NEF.pp3"), "[Crop]\nEnabled=true\n").unwrap();

        let stamp = Local.with_ymd_and_hms(2024, 3, 9, 18, 5, 7).unwrap();
        let backup = backup_settings_at(dir.path(), stamp).unwrap().unwrap();

        assert_eq!(backup.files, 2);
        assert_eq!(
            backup.dir.file_name().unwrap().to_string_lossy(),
            "lapse-backup_20240309_180507"
        );
        assert_eq!(
            std::fs::read_to_string(backup.dir.join("b.NEF.pp3")).unwrap(),
            "[Crop]\nEnabled=true\n"
        );
        assert!(!backup.dir.join("a.NEF").exists());
    }

    #[test]
    fn test_nothing_to_back_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.NEF"), b"raw").unwrap();
        assert_eq!(backup_settings(dir.path()).unwrap(), None);
    }
}
