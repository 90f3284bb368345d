//! The ordered frame sequence and the keyframes annotating it.

use std::collections::BTreeSet;

use lapse_common::LapseError;
use lapse_model::Keyframe;

/// Errors that stop a run before or while frames are emitted.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No source frames found")]
    NoFrames,

    #[error("No valid keyframes found")]
    NoKeyframes,

    #[error("Keyframe at index {index} is outside the sequence of {frame_count} frames")]
    KeyframeOutOfRange { index: usize, frame_count: usize },

    #[error("Duplicate keyframe at index {index}")]
    DuplicateKeyframe { index: usize },

    #[error("Failed to write frame {index}: {source}")]
    Sink {
        index: usize,
        #[source]
        source: LapseError,
    },
}

/// Frame indices `0..frame_count` plus their annotations.
///
/// Keyframes are sorted by index and unique. Every keyframe's frame is
/// annotated; other annotated frames carry settings that could not be
/// used as keyframes and are left alone.
#[derive(Debug, Clone)]
pub struct Sequence {
    frame_count: usize,
    keyframes: Vec<Keyframe>,
    annotated: BTreeSet<usize>,
}

impl Sequence {
    /// Build a sequence, sorting keyframes and validating their indices.
    pub fn new(
        frame_count: usize,
        mut keyframes: Vec<Keyframe>,
        annotated: impl IntoIterator<Item = usize>,
    ) -> Result<Self, PipelineError> {
        keyframes.sort_by_key(|kf| kf.index);

        if let Some(kf) = keyframes.iter().find(|kf| kf.index >= frame_count) {
            return Err(PipelineError::KeyframeOutOfRange {
                index: kf.index,
                frame_count,
            });
        }
        if let Some(pair) = keyframes.windows(2).find(|w| w[0].index == w[1].index) {
            return Err(PipelineError::DuplicateKeyframe {
                index: pair[0].index,
            });
        }

        let mut annotated: BTreeSet<usize> = annotated
            .into_iter()
            .filter(|&index| index < frame_count)
            .collect();
        annotated.extend(keyframes.iter().map(|kf| kf.index));

        Ok(Self {
            frame_count,
            keyframes,
            annotated,
        })
    }

    /// A sequence where only the keyframes are annotated.
    pub fn with_keyframes(
        frame_count: usize,
        keyframes: Vec<Keyframe>,
    ) -> Result<Self, PipelineError> {
        Self::new(frame_count, keyframes, [])
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Keyframes in ascending index order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn keyframe_at(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes
            .binary_search_by_key(&index, |kf| kf.index)
            .ok()
            .map(|i| &self.keyframes[i])
    }

    /// Whether the frame already has settings of its own.
    pub fn is_annotated(&self, index: usize) -> bool {
        self.annotated.contains(&index)
    }

    /// Position of `index` in the sequence, `0.0` to `1.0`.
    ///
    /// A single-frame sequence is always at `0.0`.
    pub fn progress(&self, index: usize) -> f64 {
        if self.frame_count > 1 {
            index as f64 / (self.frame_count - 1) as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapse_model::ExposureValues;

    fn kf(index: usize) -> Keyframe {
        Keyframe::new(index, ExposureValues::DEFAULT)
    }

    #[test]
    fn test_keyframes_are_sorted() {
        let seq = Sequence::with_keyframes(10, vec![kf(9), kf(0), kf(4)]).unwrap();
        let indices: Vec<usize> = seq.keyframes().iter().map(|k| k.index).collect();
        assert_eq!(indices, vec![0, 4, 9]);
        assert!(seq.keyframe_at(4).is_some());
        assert!(seq.keyframe_at(5).is_none());
    }

    #[test]
    fn test_rejects_duplicates_and_out_of_range() {
        assert!(matches!(
            Sequence::with_keyframes(10, vec![kf(3), kf(3)]),
            Err(PipelineError::DuplicateKeyframe { index: 3 })
        ));
        assert!(matches!(
            Sequence::with_keyframes(5, vec![kf(5)]),
            Err(PipelineError::KeyframeOutOfRange {
                index: 5,
                frame_count: 5
            })
        ));
    }

    #[test]
    fn test_keyframes_count_as_annotated() {
        let seq = Sequence::new(6, vec![kf(1)], [3, 42]).unwrap();
        assert!(seq.is_annotated(1));
        assert!(seq.is_annotated(3));
        assert!(!seq.is_annotated(2));
        assert!(!seq.is_annotated(42));
    }

    #[test]
    fn test_progress() {
        let seq = Sequence::with_keyframes(5, vec![kf(0)]).unwrap();
        assert_eq!(seq.progress(0), 0.0);
        assert_eq!(seq.progress(2), 0.5);
        assert_eq!(seq.progress(4), 1.0);

        let single = Sequence::with_keyframes(1, vec![kf(0)]).unwrap();
        assert_eq!(single.progress(0), 0.0);
    }
}
