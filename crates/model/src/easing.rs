//! Easing curves mapping linear progress in `[0, 1]` onto eased progress.

use serde::{Deserialize, Serialize};

use crate::options::OptionKey;

/// Easing curve applied to a progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Easing {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow end.
    EaseOut,
    /// Cubic smoothstep `3t² - 2t³`.
    EaseInOut,
    /// Steep symmetric curve built from two exponential halves.
    Exponential,
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => smoothstep(t),
            Self::Exponential => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    0.5 * 2f64.powf(20.0 * t - 10.0)
                } else {
                    1.0 - 0.5 * 2f64.powf(-20.0 * t + 10.0)
                }
            }
        }
    }
}

/// Cubic smoothstep. Exposure blending always uses this curve.
pub fn smoothstep(t: f64) -> f64 {
    3.0 * t * t - 2.0 * t * t * t
}

impl OptionKey for Easing {
    const KIND: &'static str = "easing";
    const ALL: &'static [Self] = &[
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Exponential,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Exponential => "exponential",
        }
    }
}

crate::options::impl_option_key_conversions!(Easing);
