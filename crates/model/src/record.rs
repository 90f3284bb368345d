//! The settings-file view the engine reads from each annotated frame.

use serde::{Deserialize, Serialize};

use crate::exposure::{ExposureValues, ExposureWarning, Keyframe};
use crate::geometry::{CropRect, SourceRect};

/// Fields read from a frame's settings file. `None` means "not present".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// Integer Kelvin.
    pub temperature: Option<i64>,
    pub green: Option<f64>,
    pub compensation: Option<f64>,
    pub crop_enabled: Option<bool>,
    pub crop_x: Option<u32>,
    pub crop_y: Option<u32>,
    pub crop_width: Option<u32>,
    pub crop_height: Option<u32>,
}

impl SettingsRecord {
    /// Exposure values with documented defaults substituted for missing fields.
    pub fn exposure(&self) -> ExposureValues {
        let defaults = ExposureValues::DEFAULT;
        ExposureValues {
            temperature: self
                .temperature
                .map(|t| t as f64)
                .unwrap_or(defaults.temperature),
            green: self.green.unwrap_or(defaults.green),
            compensation: self.compensation.unwrap_or(defaults.compensation),
        }
    }

    /// Names of exposure fields that were absent and defaulted.
    pub fn missing_exposure_fields(&self) -> Vec<&'static str> {
        let mut missing = vec![];
        if self.temperature.is_none() {
            missing.push("Temperature");
        }
        if self.green.is_none() {
            missing.push("Green");
        }
        if self.compensation.is_none() {
            missing.push("Compensation");
        }
        missing
    }

    /// The stored crop, if every coordinate is present.
    pub fn crop(&self) -> Option<CropRect> {
        Some(CropRect::new(
            self.crop_x?,
            self.crop_y?,
            self.crop_width?,
            self.crop_height?,
        ))
    }

    /// Full image size, when the crop block is disabled and still describes it.
    ///
    /// An enabled crop no longer reveals the original dimensions.
    pub fn uncropped_dimensions(&self) -> Option<SourceRect> {
        if self.crop_enabled.unwrap_or(false) {
            return None;
        }
        match (self.crop_width?, self.crop_height?) {
            (0, _) | (_, 0) => None,
            (width, height) => Some(SourceRect::new(width, height)),
        }
    }

    /// Build the keyframe for `index`, plus any out-of-domain warnings.
    ///
    /// Out-of-domain values are kept as-is.
    pub fn to_keyframe(&self, index: usize) -> (Keyframe, Vec<ExposureWarning>) {
        let exposure = self.exposure();
        (Keyframe::new(index, exposure), exposure.out_of_range())
    }
}
