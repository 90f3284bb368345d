pub mod info;
pub mod interpolate;
pub mod resolutions;

use lapse_common::RunDefaults;
use lapse_core::{SourceFallback, SourceLookup};

/// Extensions given on the command line, or the configured ones.
pub fn extensions_or(defaults: &RunDefaults, extensions: Vec<String>) -> Vec<String> {
    if extensions.is_empty() {
        defaults.raw_extensions.clone()
    } else {
        extensions
    }
}

/// `6000x4000`, or the default size marked with why it was used.
pub fn source_summary(lookup: &SourceLookup) -> String {
    let size = format!("{}x{}", lookup.rect.width, lookup.rect.height);
    match lookup.fallback {
        None => size,
        Some(SourceFallback::CropEnabled) => {
            format!("{size} (default: crop already enabled in first keyframe)")
        }
        Some(SourceFallback::MissingDimensions) => {
            format!("{size} (default: no dimensions in first keyframe)")
        }
    }
}
