//! Exposure parameters, their valid domains, and keyframes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive numeric domain of an exposure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// White-balance temperature domain (Kelvin).
pub const TEMPERATURE_RANGE: ValueRange = ValueRange::new(2000.0, 10000.0);

/// Green/tint multiplier domain.
pub const GREEN_RANGE: ValueRange = ValueRange::new(0.1, 2.0);

/// Exposure compensation domain (EV).
pub const COMPENSATION_RANGE: ValueRange = ValueRange::new(-5.0, 5.0);

/// One of the interpolated exposure parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureField {
    Temperature,
    Green,
    Compensation,
}

impl ExposureField {
    pub const ALL: [ExposureField; 3] = [Self::Temperature, Self::Green, Self::Compensation];

    pub fn range(self) -> ValueRange {
        match self {
            Self::Temperature => TEMPERATURE_RANGE,
            Self::Green => GREEN_RANGE,
            Self::Compensation => COMPENSATION_RANGE,
        }
    }
}

impl fmt::Display for ExposureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Temperature => "Temperature",
            Self::Green => "Green",
            Self::Compensation => "Compensation",
        })
    }
}

/// A parsed value that lies outside its domain. Non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureWarning {
    pub field: ExposureField,
    pub value: f64,
}

impl fmt::Display for ExposureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = self.field.range();
        match self.field {
            ExposureField::Temperature => write!(
                f,
                "Temperature {}K outside range [{}, {}]",
                self.value, range.min, range.max
            ),
            _ => write!(
                f,
                "{} {} outside range [{}, {}]",
                self.field, self.value, range.min, range.max
            ),
        }
    }
}

/// White balance and exposure settings of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureValues {
    /// Kelvin.
    pub temperature: f64,
    /// Tint multiplier.
    pub green: f64,
    /// EV.
    pub compensation: f64,
}

impl ExposureValues {
    /// Values assumed for fields missing from a settings file.
    pub const DEFAULT: ExposureValues = ExposureValues {
        temperature: 5500.0,
        green: 1.0,
        compensation: 0.0,
    };

    pub fn new(temperature: f64, green: f64, compensation: f64) -> Self {
        Self {
            temperature,
            green,
            compensation,
        }
    }

    pub fn get(&self, field: ExposureField) -> f64 {
        match field {
            ExposureField::Temperature => self.temperature,
            ExposureField::Green => self.green,
            ExposureField::Compensation => self.compensation,
        }
    }

    /// Blend every field from `a` toward `b` by `t`.
    pub fn lerp(a: &ExposureValues, b: &ExposureValues, t: f64) -> ExposureValues {
        ExposureValues {
            temperature: a.temperature + (b.temperature - a.temperature) * t,
            green: a.green + (b.green - a.green) * t,
            compensation: a.compensation + (b.compensation - a.compensation) * t,
        }
    }

    /// Every field clamped to its domain.
    pub fn clamped(&self) -> ExposureValues {
        ExposureValues {
            temperature: TEMPERATURE_RANGE.clamp(self.temperature),
            green: GREEN_RANGE.clamp(self.green),
            compensation: COMPENSATION_RANGE.clamp(self.compensation),
        }
    }

    /// Fields lying outside their domain.
    pub fn out_of_range(&self) -> Vec<ExposureWarning> {
        ExposureField::ALL
            .into_iter()
            .filter_map(|field| {
                let value = self.get(field);
                (!field.range().contains(value)).then_some(ExposureWarning { field, value })
            })
            .collect()
    }
}

impl Default for ExposureValues {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Operator-authored exposure settings anchored to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the sequence.
    pub index: usize,
    pub exposure: ExposureValues,
}

impl Keyframe {
    pub fn new(index: usize, exposure: ExposureValues) -> Self {
        Self { index, exposure }
    }

    pub fn temperature(&self) -> f64 {
        self.exposure.temperature
    }

    pub fn green(&self) -> f64 {
        self.exposure.green
    }

    pub fn compensation(&self) -> f64 {
        self.exposure.compensation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_limits_every_field() {
        let wild = ExposureValues::new(12000.0, 0.05, -7.5);
        let clamped = wild.clamped();
        assert_eq!(clamped.temperature, 10000.0);
        assert_eq!(clamped.green, 0.1);
        assert_eq!(clamped.compensation, -5.0);
    }

    #[test]
    fn test_out_of_range_reports_fields() {
        let values = ExposureValues::new(1500.0, 1.0, 6.0);
        let warnings = values.out_of_range();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field, ExposureField::Temperature);
        assert_eq!(warnings[1].field, ExposureField::Compensation);
        assert!(warnings[0].to_string().contains("1500K"));

        assert!(ExposureValues::DEFAULT.out_of_range().is_empty());
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = ExposureValues::new(5000.0, 0.8, -1.0);
        let b = ExposureValues::new(7000.0, 1.2, 1.0);
        let mid = ExposureValues::lerp(&a, &b, 0.5);
        assert!((mid.temperature - 6000.0).abs() < 1e-9);
        assert!((mid.green - 1.0).abs() < 1e-9);
        assert!(mid.compensation.abs() < 1e-9);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(TEMPERATURE_RANGE.contains(2000.0));
        assert!(TEMPERATURE_RANGE.contains(10000.0));
        assert!(!GREEN_RANGE.contains(2.01));
    }
}
