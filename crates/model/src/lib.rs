//! Lapse Data Model
//!
//! Defines the data contracts shared by every Lapse crate:
//! - **Geometry:** Source image size, crop rectangles, and resize targets
//! - **Exposure:** White-balance/exposure values, their domains, and keyframes
//! - **Options:** Drift mode, zoom range/anchor, and output resolution
//! - **Easing:** Progress curves used by exposure blending and zoom
//!
//! Crop rectangles are integer pixel coordinates in the space of the
//! unmodified source image.

pub mod easing;
pub mod exposure;
pub mod geometry;
pub mod options;
pub mod record;

pub use easing::*;
pub use exposure::*;
pub use geometry::*;
pub use options::*;
pub use record::*;
