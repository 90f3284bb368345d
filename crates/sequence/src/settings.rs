//! Mapping between PP3 documents and the engine's settings view.

use std::path::Path;

use lapse_core::FrameRecord;
use lapse_model::SettingsRecord;

use crate::error::SettingsError;
use crate::pp3::Pp3Document;

pub const WHITE_BALANCE: &str = "White Balance";
pub const EXPOSURE: &str = "Exposure";
pub const CROP: &str = "Crop";
pub const RESIZE: &str = "Resize";

/// Read the fields the engine needs from `doc`.
///
/// Exposure fields that are present but not numeric are an error;
/// crop fields that do not parse are treated as absent.
pub fn read_record(doc: &Pp3Document, path: &Path) -> Result<SettingsRecord, SettingsError> {
    Ok(SettingsRecord {
        temperature: strict(doc, path, WHITE_BALANCE, "Temperature", "an integer")?,
        green: strict(doc, path, WHITE_BALANCE, "Green", "a number")?,
        compensation: strict(doc, path, EXPOSURE, "Compensation", "a number")?,
        crop_enabled: doc
            .get(CROP, "Enabled")
            .map(|v| v.eq_ignore_ascii_case("true")),
        crop_x: lenient(doc, CROP, "X"),
        crop_y: lenient(doc, CROP, "Y"),
        crop_width: lenient(doc, CROP, "W"),
        crop_height: lenient(doc, CROP, "H"),
    })
}

fn strict<T: std::str::FromStr>(
    doc: &Pp3Document,
    path: &Path,
    section: &str,
    key: &str,
    expected: &'static str,
) -> Result<Option<T>, SettingsError> {
    let Some(raw) = doc.get(section, key) else {
        return Ok(None);
    };
    raw.parse()
        .map(Some)
        .map_err(|_| SettingsError::InvalidValue {
            path: path.to_path_buf(),
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            expected,
        })
}

fn lenient<T: std::str::FromStr>(doc: &Pp3Document, section: &str, key: &str) -> Option<T> {
    doc.get(section, key)?.parse().ok()
}

/// Write a computed frame's exposure, crop, and resize onto `doc`.
///
/// Every other entry in `doc` is left untouched.
pub fn apply_frame(doc: &mut Pp3Document, frame: &FrameRecord) {
    let exposure = &frame.exposure;
    doc.set(
        WHITE_BALANCE,
        "Temperature",
        (exposure.temperature as i64).to_string(),
    );
    doc.set(WHITE_BALANCE, "Green", format!("{:.3}", exposure.green));
    doc.set(EXPOSURE, "Compensation", format!("{:.3}", exposure.compensation));

    let crop = &frame.crop;
    doc.set(CROP, "Enabled", "true");
    doc.set(CROP, "X", crop.x.to_string());
    doc.set(CROP, "Y", crop.y.to_string());
    doc.set(CROP, "W", crop.width.to_string());
    doc.set(CROP, "H", crop.height.to_string());
    doc.set(CROP, "FixedRatio", "true");
    doc.set(CROP, "Ratio", "16:9");
    doc.set(CROP, "Orientation", "As Image");
    doc.set(CROP, "Guide", "Frame");

    let resize = &frame.resize;
    doc.set(RESIZE, "Enabled", "true");
    doc.set(RESIZE, "Scale", "1");
    doc.set(RESIZE, "AppliesTo", "Cropped area");
    doc.set(RESIZE, "Method", "Lanczos");
    doc.set(RESIZE, "DataSpecified", "3");
    doc.set(RESIZE, "Width", resize.width.to_string());
    doc.set(RESIZE, "Height", resize.height.to_string());
    doc.set(RESIZE, "LongEdge", resize.long_edge().to_string());
    doc.set(RESIZE, "ShortEdge", resize.short_edge().to_string());
}
