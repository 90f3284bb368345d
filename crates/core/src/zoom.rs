//! Zoom compositor: shrinks a crop toward an anchor, inside source bounds.

use lapse_model::{CropRect, SourceRect, ZoomAnchor};

/// Shrink `crop` to `fov` of its size.
///
/// The result is centered horizontally within `crop`; vertically the
/// `anchor` edge (or center) stays put. The position is then clamped so
/// the result never leaves `source`, which can override the anchor.
/// `fov >= 1.0` returns `crop` unchanged. The result is never smaller
/// than 1x1 unless `crop` itself is empty.
pub fn apply_zoom(crop: CropRect, source: SourceRect, fov: f64, anchor: ZoomAnchor) -> CropRect {
    if fov >= 1.0 || fov.is_nan() {
        return crop;
    }
    let fov = fov.max(0.0);

    let new_width = ((f64::from(crop.width) * fov).floor() as u32)
        .max(1)
        .min(crop.width);
    let new_height = ((f64::from(crop.height) * fov).floor() as u32)
        .max(1)
        .min(crop.height);

    let x = crop.x + (crop.width - new_width) / 2;
    let y = match anchor {
        ZoomAnchor::Top => crop.y,
        ZoomAnchor::Bottom => crop.y + (crop.height - new_height),
        ZoomAnchor::Center => crop.y + (crop.height - new_height) / 2,
    };

    let x = x.min(source.width.saturating_sub(new_width));
    let y = y.min(source.height.saturating_sub(new_height));

    CropRect::new(x, y, new_width, new_height)
}
