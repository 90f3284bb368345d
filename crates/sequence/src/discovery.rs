//! Finding the raw frames of a sequence and their sidecars.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Sidecar extension appended to the raw file name.
pub const SIDECAR_EXTENSION: &str = "pp3";

/// One raw frame and the location of its settings sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFile {
    pub index: usize,
    pub raw: PathBuf,
    pub sidecar: PathBuf,
}

impl FrameFile {
    /// Whether the sidecar exists, i.e. the frame is annotated.
    pub fn is_annotated(&self) -> bool {
        self.sidecar.is_file()
    }

    /// Sidecar file name for display.
    pub fn sidecar_name(&self) -> String {
        self.sidecar
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// `foo.NEF` -> `foo.NEF.pp3`.
pub fn sidecar_path(raw: &Path) -> PathBuf {
    let mut name = raw.as_os_str().to_owned();
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    PathBuf::from(name)
}

/// List raw frames in `dir` whose extension is in `extensions`, compared
/// case-insensitively, sorted by file name.
pub fn discover_frames(dir: &Path, extensions: &[String]) -> Result<Vec<FrameFile>, SettingsError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SettingsError::io(dir, e))?;

    let mut raws = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| SettingsError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
        if matches {
            raws.push(path);
        }
    }
    raws.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(dir = %dir.display(), count = raws.len(), "Discovered raw frames");

    Ok(raws
        .into_iter()
        .enumerate()
        .map(|(index, raw)| FrameFile {
            index,
            sidecar: sidecar_path(&raw),
            raw,
        })
        .collect())
}
