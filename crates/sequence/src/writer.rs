//! Writing computed frames to PP3 sidecars.

use lapse_common::{LapseError, LapseResult};
use lapse_core::{FrameRecord, FrameSink};

use crate::loader::LoadedSequence;
use crate::settings::apply_frame;

/// Writes each frame onto a copy of its template keyframe's document and
/// saves it as the frame's sidecar.
#[derive(Debug)]
pub struct Pp3Writer<'a> {
    sequence: &'a LoadedSequence,
}

impl<'a> Pp3Writer<'a> {
    pub fn new(sequence: &'a LoadedSequence) -> Self {
        Self { sequence }
    }
}

impl FrameSink for Pp3Writer<'_> {
    fn write_frame(&mut self, record: &FrameRecord) -> LapseResult<()> {
        let frame = self.sequence.frame(record.index).ok_or_else(|| {
            LapseError::pipeline(format!("frame {} is not in the sequence", record.index))
        })?;
        let template_index = record.template_keyframe();
        let template = self.sequence.keyframe(template_index).ok_or_else(|| {
            LapseError::pipeline(format!("no settings loaded for keyframe {template_index}"))
        })?;

        let mut document = template.document.clone();
        apply_frame(&mut document, record);
        document.save(&frame.sidecar)?;

        tracing::trace!(file = %frame.sidecar_name(), "Wrote settings");
        Ok(())
    }
}
