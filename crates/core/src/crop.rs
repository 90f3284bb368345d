//! 16:9 crop geometry.
//!
//! Sources taller than 16:9 lose height, placed vertically by the drift
//! mode. Sources wider than 16:9 lose width, always centered.

use lapse_model::{CropRect, DriftMode, SourceRect};

/// Compute the 16:9 crop of `source`.
///
/// `progress` is the position in the sequence (`0.0` first frame,
/// `1.0` last) and only matters for the animated drift modes. It is
/// clamped to `[0, 1]`.
pub fn crop_16x9(source: SourceRect, drift: DriftMode, progress: f64) -> CropRect {
    let width = u64::from(source.width);
    let height = u64::from(source.height);
    let target_height = width * 9 / 16;

    if height < target_height {
        let crop_width = height * 16 / 9;
        let x = (width - crop_width) / 2;
        return CropRect::new(x as u32, 0, crop_width as u32, source.height);
    }

    let available = height - target_height;
    let y = drift_offset(available, drift, progress);
    CropRect::new(0, y as u32, source.width, target_height as u32)
}

/// Vertical offset for `drift` given `available` spare rows.
fn drift_offset(available: u64, drift: DriftMode, progress: f64) -> u64 {
    let progress = progress.clamp(0.0, 1.0);
    match drift {
        DriftMode::Center => available / 2,
        DriftMode::Top => 0,
        DriftMode::Bottom => available,
        DriftMode::TopToBottom => (available as f64 * progress).floor() as u64,
        DriftMode::BottomToTop => (available as f64 * (1.0 - progress)).floor() as u64,
    }
}

/// Rows (or columns) removed by the 16:9 crop, for reporting.
pub fn crop_loss(source: SourceRect) -> (u32, u32) {
    let crop = crop_16x9(source, DriftMode::Center, 0.0);
    (source.width - crop.width, source.height - crop.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_BY_TWO: SourceRect = SourceRect {
        width: 6000,
        height: 4000,
    };

    #[test]
    fn test_center_crop_of_three_by_two() {
        let crop = crop_16x9(THREE_BY_TWO, DriftMode::Center, 0.0);
        assert_eq!(crop, CropRect::new(0, 312, 6000, 3375));
    }

    #[test]
    fn test_wide_source_crops_width() {
        let crop = crop_16x9(SourceRect::new(4000, 1000), DriftMode::Center, 0.0);
        assert_eq!(crop, CropRect::new(1111, 0, 1777, 1000));
    }

    #[test]
    fn test_wide_source_ignores_drift() {
        let wide = SourceRect::new(4000, 1000);
        for drift in [DriftMode::Top, DriftMode::Bottom, DriftMode::BottomToTop] {
            assert_eq!(crop_16x9(wide, drift, 0.3).y, 0);
        }
    }

    #[test]
    fn test_exact_sixteen_by_nine_is_identity() {
        let source = SourceRect::new(1920, 1080);
        for drift in [DriftMode::Center, DriftMode::Bottom, DriftMode::TopToBottom] {
            assert_eq!(crop_16x9(source, drift, 0.7), source.full_crop());
        }
    }

    #[test]
    fn test_static_drift_modes() {
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::Top, 0.5).y, 0);
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::Bottom, 0.5).y, 625);
    }

    #[test]
    fn test_animated_drift_endpoints() {
        let available = 625;
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::TopToBottom, 0.0).y, 0);
        assert_eq!(
            crop_16x9(THREE_BY_TWO, DriftMode::TopToBottom, 1.0).y,
            available
        );
        assert_eq!(
            crop_16x9(THREE_BY_TWO, DriftMode::BottomToTop, 0.0).y,
            available
        );
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::BottomToTop, 1.0).y, 0);
    }

    #[test]
    fn test_animated_drift_is_linear() {
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::TopToBottom, 0.5).y, 312);
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::TopToBottom, 0.25).y, 156);
        assert_eq!(crop_16x9(THREE_BY_TWO, DriftMode::BottomToTop, 0.25).y, 468);
    }

    #[test]
    fn test_crop_loss() {
        assert_eq!(crop_loss(THREE_BY_TWO), (0, 625));
        assert_eq!(crop_loss(SourceRect::new(4000, 1000)), (2223, 0));
    }
}
