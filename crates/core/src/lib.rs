//! Lapse Core — the keyframe and geometry engine
//!
//! Turns a sparse set of keyframes into per-frame develop settings:
//! - **Crop:** 16:9 window over an arbitrary source with vertical drift
//! - **Zoom:** Field-of-view reduction composed onto the crop
//! - **Resolver:** Bracketing keyframes for every frame index
//! - **Interpolation:** Eased, clamped blending of exposure values
//! - **Pipeline:** Per-frame orchestration feeding a [`FrameSink`]
//!
//! This crate is pure computation: no I/O, no file formats.
//! All inputs are data; all outputs are data.

pub mod crop;
pub mod interpolate;
pub mod pipeline;
pub mod resolver;
pub mod sequence;
pub mod source;
pub mod zoom;

pub use crop::crop_16x9;
pub use interpolate::interpolate;
pub use pipeline::{FrameKind, FramePipeline, FrameRecord, FrameSink, PipelineConfig, RunReport};
pub use resolver::{resolve, Bracket};
pub use sequence::{PipelineError, Sequence};
pub use source::{discover_source_rect, SourceFallback, SourceLookup};
pub use zoom::apply_zoom;
