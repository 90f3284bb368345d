//! Exposure value interpolation between keyframes.

use lapse_model::{Easing, ExposureValues, Keyframe};

use crate::resolver::Bracket;

/// Exposure blending always uses the cubic smoothstep, independent of the
/// zoom easing setting.
pub const EXPOSURE_EASING: Easing = Easing::EaseInOut;

/// Blend `prev` toward `next` at `frame_index`, then clamp to each domain.
pub fn interpolate(prev: &Keyframe, next: &Keyframe, frame_index: usize) -> ExposureValues {
    let span = next.index.saturating_sub(prev.index);
    if span == 0 {
        return prev.exposure.clamped();
    }

    let raw = frame_index.saturating_sub(prev.index) as f64 / span as f64;
    let eased = EXPOSURE_EASING.apply(raw);
    ExposureValues::lerp(&prev.exposure, &next.exposure, eased).clamped()
}

/// Exposure for a frame given its bracket. Held values are clamped too.
///
/// Returns `None` for [`Bracket::Unresolved`].
pub fn exposure_for(bracket: &Bracket<'_>, frame_index: usize) -> Option<ExposureValues> {
    match bracket {
        Bracket::Between { prev, next } => Some(interpolate(prev, next, frame_index)),
        Bracket::Unresolved => None,
        held => held.held().map(|kf| kf.exposure.clamped()),
    }
}
