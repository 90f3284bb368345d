//! Discovery of the unmodified source image size.
//!
//! The size is read once, from the first keyframe's settings before any
//! crop is written back, and then passed explicitly to the pipeline.

use lapse_model::{SettingsRecord, SourceRect};

/// Why the default sensor size was used instead of a discovered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFallback {
    /// The first keyframe already has cropping enabled.
    CropEnabled,
    /// The first keyframe carries no usable width/height.
    MissingDimensions,
}

/// Result of looking up the source size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLookup {
    pub rect: SourceRect,
    /// Set when `rect` is [`SourceRect::DEFAULT_SENSOR`] rather than discovered.
    pub fallback: Option<SourceFallback>,
}

/// Determine the source size from the first keyframe's settings.
///
/// Never fails: when the size cannot be derived, logs a warning and
/// returns the default sensor size.
pub fn discover_source_rect(first_keyframe: Option<&SettingsRecord>) -> SourceLookup {
    if let Some(rect) = first_keyframe.and_then(SettingsRecord::uncropped_dimensions) {
        return SourceLookup {
            rect,
            fallback: None,
        };
    }

    let default = SourceRect::DEFAULT_SENSOR;
    let reason = match first_keyframe {
        Some(record) if record.crop_enabled == Some(true) => {
            tracing::warn!(
                width = default.width,
                height = default.height,
                "Crop is enabled in the first keyframe, using default dimensions. \
                 For best results, disable crop in the first keyframe."
            );
            SourceFallback::CropEnabled
        }
        _ => {
            tracing::warn!(
                width = default.width,
                height = default.height,
                "Could not read image dimensions from the first keyframe, using defaults"
            );
            SourceFallback::MissingDimensions
        }
    };

    SourceLookup {
        rect: default,
        fallback: Some(reason),
    }
}
