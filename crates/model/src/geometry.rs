//! Pixel-space rectangles for cropping and resizing.
//!
//! All coordinates are integer pixels in the space of the unmodified
//! source image, `(0, 0)` being its top-left corner.

use serde::{Deserialize, Serialize};

/// Dimensions of the unmodified source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRect {
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    /// Sensor size assumed when the real size cannot be discovered
    /// (a 24.5 MP full-frame body).
    pub const DEFAULT_SENSOR: SourceRect = SourceRect {
        width: 6056,
        height: 4032,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The crop covering the whole image.
    pub fn full_crop(&self) -> CropRect {
        CropRect::new(0, 0, self.width, self.height)
    }

    /// Whether `crop` lies entirely inside this image.
    pub fn contains(&self, crop: &CropRect) -> bool {
        crop.right() <= u64::from(self.width) && crop.bottom() <= u64::from(self.height)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// A crop window inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive). Widened so it cannot overflow.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Bottom edge (exclusive). Widened so it cannot overflow.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Target size the cropped area is resampled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResizeSpec {
    pub width: u32,
    pub height: u32,
}

impl ResizeSpec {
    pub fn long_edge(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn short_edge(&self) -> u32 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_crop_is_contained() {
        let source = SourceRect::new(6000, 4000);
        let crop = source.full_crop();
        assert_eq!(crop, CropRect::new(0, 0, 6000, 4000));
        assert!(source.contains(&crop));
    }

    #[test]
    fn test_contains_rejects_overhang() {
        let source = SourceRect::new(100, 100);
        assert!(source.contains(&CropRect::new(50, 50, 50, 50)));
        assert!(!source.contains(&CropRect::new(51, 0, 50, 50)));
        assert!(!source.contains(&CropRect::new(0, 60, 10, 41)));
    }

    #[test]
    fn test_edges_do_not_overflow() {
        let crop = CropRect::new(u32::MAX, u32::MAX, u32::MAX, 1);
        assert_eq!(crop.right(), 2 * u64::from(u32::MAX));
        assert_eq!(crop.bottom(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_resize_edges() {
        let spec = ResizeSpec {
            width: 1080,
            height: 1920,
        };
        assert_eq!(spec.long_edge(), 1920);
        assert_eq!(spec.short_edge(), 1080);
    }
}
