//! Loading a sequence directory: frames, keyframes, and their documents.

use std::path::{Path, PathBuf};

use lapse_core::{discover_source_rect, PipelineError, Sequence, SourceLookup};
use lapse_model::{ExposureWarning, Keyframe, SettingsRecord};

use crate::discovery::{discover_frames, FrameFile};
use crate::error::SettingsError;
use crate::pp3::Pp3Document;
use crate::settings::read_record;
use crate::writer::Pp3Writer;

/// A keyframe together with the document it was read from.
#[derive(Debug, Clone)]
pub struct LoadedKeyframe {
    pub frame: FrameFile,
    pub keyframe: Keyframe,
    pub record: SettingsRecord,
    /// Untouched document, used as the template for dependent frames.
    pub document: Pp3Document,
    pub warnings: Vec<ExposureWarning>,
}

/// An annotated frame whose sidecar could not be used.
#[derive(Debug)]
pub struct FailedSidecar {
    pub frame: FrameFile,
    pub error: SettingsError,
}

/// A sequence directory as found on disk.
#[derive(Debug)]
pub struct LoadedSequence {
    pub root: PathBuf,
    pub frames: Vec<FrameFile>,
    /// Sorted by frame index.
    pub keyframes: Vec<LoadedKeyframe>,
    pub failed: Vec<FailedSidecar>,
}

impl LoadedSequence {
    /// Scan `root` for raw frames with one of `extensions` and read every
    /// existing sidecar.
    ///
    /// Only directory-level failures are errors; a sidecar that cannot be
    /// read is logged and recorded in [`LoadedSequence::failed`].
    pub fn load(root: impl AsRef<Path>, extensions: &[String]) -> Result<Self, SettingsError> {
        let root = root.as_ref().to_path_buf();
        let frames = discover_frames(&root, extensions)?;

        let mut keyframes = vec![];
        let mut failed = vec![];
        for frame in frames.iter().filter(|f| f.is_annotated()) {
            match load_keyframe(frame) {
                Ok(loaded) => keyframes.push(loaded),
                Err(error) => {
                    tracing::warn!(file = %frame.sidecar_name(), %error, "Skipping unreadable settings file");
                    failed.push(FailedSidecar {
                        frame: frame.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            frames = frames.len(),
            keyframes = keyframes.len(),
            failed = failed.len(),
            "Loaded sequence"
        );

        Ok(Self {
            root,
            frames,
            keyframes,
            failed,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&FrameFile> {
        self.frames.get(index)
    }

    /// Indices of every frame with a sidecar, usable or not.
    pub fn annotated_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .keyframes
            .iter()
            .map(|kf| kf.keyframe.index)
            .chain(self.failed.iter().map(|f| f.frame.index))
            .collect();
        indices.sort_unstable();
        indices
    }

    pub fn keyframe(&self, index: usize) -> Option<&LoadedKeyframe> {
        self.keyframes
            .binary_search_by_key(&index, |kf| kf.keyframe.index)
            .ok()
            .map(|i| &self.keyframes[i])
    }

    /// The engine's view of this directory.
    pub fn sequence(&self) -> Result<Sequence, PipelineError> {
        Sequence::new(
            self.frame_count(),
            self.keyframes.iter().map(|kf| kf.keyframe).collect(),
            self.annotated_indices(),
        )
    }

    /// Source size read from the lowest-index keyframe.
    pub fn source_lookup(&self) -> SourceLookup {
        discover_source_rect(self.keyframes.first().map(|kf| &kf.record))
    }

    /// A sink that writes computed frames next to their raw files.
    pub fn writer(&self) -> Pp3Writer<'_> {
        Pp3Writer::new(self)
    }
}

fn load_keyframe(frame: &FrameFile) -> Result<LoadedKeyframe, SettingsError> {
    let document = Pp3Document::load(&frame.sidecar)?;
    let record = read_record(&document, &frame.sidecar)?;

    let missing = record.missing_exposure_fields();
    if !missing.is_empty() {
        tracing::warn!(
            file = %frame.sidecar_name(),
            fields = ?missing,
            "Missing exposure fields, using defaults"
        );
    }

    let (keyframe, warnings) = record.to_keyframe(frame.index);
    for warning in &warnings {
        tracing::warn!(file = %frame.sidecar_name(), "{warning}");
    }

    Ok(LoadedKeyframe {
        frame: frame.clone(),
        keyframe,
        record,
        document,
        warnings,
    })
}
