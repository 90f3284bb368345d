//! Frame pipeline: per-frame exposure, crop, and zoom.
//!
//! # Algorithm
//!
//! For every frame index in ascending order:
//!
//! 1. **Skip** frames that already carry settings, except keyframes,
//!    whose own frame is re-emitted with their own exposure values.
//! 2. **Resolve** the bracketing keyframes and compute exposure values.
//! 3. **Crop** the source to 16:9 at the frame's progress through the
//!    sequence, using the configured drift mode.
//! 4. **Zoom** the crop when a field-of-view range is configured.
//! 5. **Emit** the completed [`FrameRecord`] to a [`FrameSink`].

use lapse_common::LapseResult;
use lapse_model::{
    CropRect, DriftMode, ExposureValues, OutputResolution, ResizeSpec, SourceRect, ZoomSpec,
};
use serde::Serialize;

use crate::crop::crop_16x9;
use crate::interpolate::exposure_for;
use crate::resolver::{resolve, Bracket};
use crate::sequence::{PipelineError, Sequence};
use crate::zoom::apply_zoom;

/// Number of written frames between progress log events.
const PROGRESS_INTERVAL: usize = 100;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub drift: DriftMode,
    pub zoom: ZoomSpec,
    pub output: OutputResolution,
    /// Re-emit keyframe frames with their crop and resize.
    pub rewrite_keyframes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            drift: DriftMode::Center,
            zoom: ZoomSpec::default(),
            output: OutputResolution::Res4k,
            rewrite_keyframes: true,
        }
    }
}

/// Where a frame's exposure values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameKind {
    /// The frame is a keyframe; its own values are kept.
    Keyframe,
    /// Blended between two keyframes.
    Interpolated { prev: usize, next: usize },
    /// Copied from the nearest keyframe.
    Held { keyframe: usize },
}

/// Everything computed for one frame, ready for the settings writer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    pub index: usize,
    pub kind: FrameKind,
    pub exposure: ExposureValues,
    pub progress: f64,
    /// Field of view applied, when zoom is active.
    pub fov: Option<f64>,
    pub crop: CropRect,
    pub resize: ResizeSpec,
}

impl FrameRecord {
    /// Index of the keyframe whose settings this frame starts from.
    pub fn template_keyframe(&self) -> usize {
        match self.kind {
            FrameKind::Keyframe => self.index,
            FrameKind::Interpolated { prev, .. } => prev,
            FrameKind::Held { keyframe } => keyframe,
        }
    }
}

/// Receives computed frames. Implemented by the settings writer.
pub trait FrameSink {
    fn write_frame(&mut self, record: &FrameRecord) -> LapseResult<()>;
}

impl FrameSink for Vec<FrameRecord> {
    fn write_frame(&mut self, record: &FrameRecord) -> LapseResult<()> {
        self.push(*record);
        Ok(())
    }
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    /// Frames in the sequence.
    pub frames: usize,
    pub keyframes_rewritten: usize,
    pub interpolated: usize,
    pub held: usize,
    /// Annotated non-keyframe frames, plus keyframes when not rewritten.
    pub skipped_annotated: usize,
}

impl RunReport {
    /// New annotations created by the run.
    pub fn created(&self) -> usize {
        self.interpolated + self.held
    }
}

/// Per-run context: configuration plus the cached source size.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    config: PipelineConfig,
    source: SourceRect,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig, source: SourceRect) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn source(&self) -> SourceRect {
        self.source
    }

    /// Crop at `progress`, plus the field of view when zoom is active.
    pub fn crop_at(&self, progress: f64) -> (CropRect, Option<f64>) {
        let base = crop_16x9(self.source, self.config.drift, progress);
        if !self.config.zoom.is_active() {
            return (base, None);
        }
        let fov = self.config.zoom.fov_at(progress);
        let zoomed = apply_zoom(base, self.source, fov, self.config.zoom.anchor);
        (zoomed, Some(fov))
    }

    /// Compute frame `index`, or `None` when it is skipped.
    pub fn compute_frame(&self, sequence: &Sequence, index: usize) -> Option<FrameRecord> {
        let (kind, exposure) = if let Some(keyframe) = sequence.keyframe_at(index) {
            if !self.config.rewrite_keyframes {
                return None;
            }
            (FrameKind::Keyframe, keyframe.exposure)
        } else if sequence.is_annotated(index) {
            return None;
        } else {
            let bracket = resolve(sequence.keyframes(), index);
            let exposure = exposure_for(&bracket, index)?;
            let kind = match bracket {
                Bracket::Between { prev, next } => FrameKind::Interpolated {
                    prev: prev.index,
                    next: next.index,
                },
                other => FrameKind::Held {
                    keyframe: other.held()?.index,
                },
            };
            (kind, exposure)
        };

        let progress = sequence.progress(index);
        let (crop, fov) = self.crop_at(progress);

        Some(FrameRecord {
            index,
            kind,
            exposure,
            progress,
            fov,
            crop,
            resize: self.config.output.resize_spec(),
        })
    }

    /// Compute every frame in ascending order and hand each to `sink`.
    ///
    /// Stops at the first sink error.
    pub fn run<S: FrameSink + ?Sized>(
        &self,
        sequence: &Sequence,
        sink: &mut S,
    ) -> Result<RunReport, PipelineError> {
        if sequence.frame_count() == 0 {
            return Err(PipelineError::NoFrames);
        }
        if sequence.keyframes().is_empty() {
            return Err(PipelineError::NoKeyframes);
        }

        let mut report = RunReport {
            frames: sequence.frame_count(),
            ..Default::default()
        };

        for index in 0..sequence.frame_count() {
            let Some(record) = self.compute_frame(sequence, index) else {
                if sequence.is_annotated(index) {
                    report.skipped_annotated += 1;
                }
                continue;
            };

            tracing::debug!(
                index,
                kind = ?record.kind,
                temperature = record.exposure.temperature,
                crop = ?record.crop,
                "Computed frame"
            );

            sink.write_frame(&record)
                .map_err(|source| PipelineError::Sink { index, source })?;

            match record.kind {
                FrameKind::Keyframe => {
                    report.keyframes_rewritten += 1;
                    continue;
                }
                FrameKind::Interpolated { .. } => report.interpolated += 1,
                FrameKind::Held { .. } => report.held += 1,
            }

            if report.created() % PROGRESS_INTERVAL == 0 {
                tracing::info!(created = report.created(), total = report.frames, "Progress");
            }
        }

        Ok(report)
    }
}
