//! Run options: drift mode, zoom range and anchor, output resolution.
//!
//! Every option is a closed enumeration keyed by a kebab-case string.
//! Unknown keys never fail a run: [`OptionKey::parse_lenient`] logs a
//! warning and substitutes the option's default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::geometry::ResizeSpec;

/// A closed set of options addressed by string keys.
pub trait OptionKey: Copy + Default + 'static {
    /// Human-readable option name used in diagnostics.
    const KIND: &'static str;

    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// The canonical key for this variant.
    fn key(self) -> &'static str;

    /// Strict lookup. Keys are matched case-insensitively after trimming.
    fn from_key(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.key().eq_ignore_ascii_case(value))
    }

    /// Lookup that falls back to the default variant for unknown keys.
    fn parse_lenient(value: &str) -> Self {
        match Self::from_key(value) {
            Some(option) => option,
            None => {
                let fallback = Self::default();
                tracing::warn!(
                    kind = Self::KIND,
                    value,
                    fallback = fallback.key(),
                    "Unrecognized option value, using fallback"
                );
                fallback
            }
        }
    }

    /// All keys joined for help and error messages.
    fn key_list() -> String {
        Self::ALL
            .iter()
            .map(|option| option.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Derives `Display`, strict `FromStr`, and the lenient `String` conversions
/// serde uses for an [`OptionKey`] type.
macro_rules! impl_option_key_conversions {
    ($ty:ty) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::options::OptionKey::key(*self))
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::options::OptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::options::OptionKey>::from_key(s).ok_or_else(|| {
                    $crate::options::OptionError::UnknownKey {
                        kind: <$ty as $crate::options::OptionKey>::KIND,
                        value: s.to_string(),
                        expected: <$ty as $crate::options::OptionKey>::key_list(),
                    }
                })
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                <$ty as $crate::options::OptionKey>::parse_lenient(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                $crate::options::OptionKey::key(value).to_string()
            }
        }
    };
}

pub(crate) use impl_option_key_conversions;

/// Errors produced when parsing option values strictly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownKey {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("Malformed zoom range '{value}': {reason}")]
    MalformedZoomRange { value: String, reason: String },
}

/// Vertical placement policy for the 16:9 crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriftMode {
    /// Crop equally from top and bottom.
    #[default]
    Center,
    /// Keep the top edge, crop from the bottom.
    Top,
    /// Keep the bottom edge, crop from the top.
    Bottom,
    /// Move from the top edge at the first frame to the bottom at the last.
    TopToBottom,
    /// Move from the bottom edge at the first frame to the top at the last.
    BottomToTop,
}

impl OptionKey for DriftMode {
    const KIND: &'static str = "drift mode";
    const ALL: &'static [Self] = &[
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::TopToBottom,
        Self::BottomToTop,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::TopToBottom => "top-to-bottom",
            Self::BottomToTop => "bottom-to-top",
        }
    }
}

impl_option_key_conversions!(DriftMode);

/// Point of the crop held fixed while zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoomAnchor {
    #[default]
    Center,
    Top,
    Bottom,
}

impl OptionKey for ZoomAnchor {
    const KIND: &'static str = "zoom anchor";
    const ALL: &'static [Self] = &[Self::Center, Self::Top, Self::Bottom];

    fn key(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl_option_key_conversions!(ZoomAnchor);

/// Output resolution presets. All are 16:9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputResolution {
    /// 1920x1080 (Full HD).
    Hd1080,
    /// 2048x1152 (2K).
    Res2k,
    /// 3840x2160 (4K UHD).
    #[default]
    Res4k,
    /// 5120x2880 (5K).
    Res5k,
    /// 6144x3456 (6K).
    Res6k,
    /// 7680x4320 (8K UHD).
    Res8k,
}

impl OutputResolution {
    /// Pixel dimensions as `(width, height)`.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Hd1080 => (1920, 1080),
            Self::Res2k => (2048, 1152),
            Self::Res4k => (3840, 2160),
            Self::Res5k => (5120, 2880),
            Self::Res6k => (6144, 3456),
            Self::Res8k => (7680, 4320),
        }
    }

    /// Short description shown in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hd1080 => "Full HD",
            Self::Res2k => "2K",
            Self::Res4k => "4K UHD",
            Self::Res5k => "5K",
            Self::Res6k => "6K",
            Self::Res8k => "8K UHD",
        }
    }

    pub fn resize_spec(self) -> ResizeSpec {
        let (width, height) = self.dimensions();
        ResizeSpec { width, height }
    }
}

impl OptionKey for OutputResolution {
    const KIND: &'static str = "output resolution";
    const ALL: &'static [Self] = &[
        Self::Hd1080,
        Self::Res2k,
        Self::Res4k,
        Self::Res5k,
        Self::Res6k,
        Self::Res8k,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Hd1080 => "1080p",
            Self::Res2k => "2k",
            Self::Res4k => "4k",
            Self::Res5k => "5k",
            Self::Res6k => "6k",
            Self::Res8k => "8k",
        }
    }
}

impl_option_key_conversions!(OutputResolution);

/// Field-of-view range over the sequence, as fractions of the base crop.
///
/// `1.0` keeps the whole 16:9 crop, smaller values zoom in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoomRange {
    pub start_fov: f64,
    pub end_fov: f64,
}

impl ZoomRange {
    /// No zoom at any frame.
    pub const NONE: ZoomRange = ZoomRange {
        start_fov: 1.0,
        end_fov: 1.0,
    };

    /// Smallest accepted field of view (1%).
    pub const MIN_FOV: f64 = 0.01;

    /// Build a range from fractions, rejecting values outside `[MIN_FOV, 1]`.
    pub fn new(start_fov: f64, end_fov: f64) -> Result<Self, OptionError> {
        for fov in [start_fov, end_fov] {
            if !(Self::MIN_FOV..=1.0).contains(&fov) {
                return Err(OptionError::MalformedZoomRange {
                    value: format!("{}-{}", start_fov * 100.0, end_fov * 100.0),
                    reason: format!("field of view {}% is outside [1, 100]", fov * 100.0),
                });
            }
        }
        Ok(Self { start_fov, end_fov })
    }

    /// Parse `"100-70"` (start-end percentages) or a single `"80"`.
    ///
    /// A single value describes a constant field of view, which is inactive.
    pub fn parse(value: &str) -> Result<Self, OptionError> {
        let malformed = |reason: &str| OptionError::MalformedZoomRange {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = value.trim().split('-').map(str::trim).collect();
        let percentages = parts
            .iter()
            .map(|part| part.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed("expected percentages like '100-70'"))?;

        let (start, end) = match percentages.as_slice() {
            [single] => (*single, *single),
            [start, end] => (*start, *end),
            _ => return Err(malformed("expected at most two percentages")),
        };

        Self::new(start / 100.0, end / 100.0).map_err(|_| {
            malformed("field of view percentages must be between 1 and 100")
        })
    }

    /// Whether the field of view changes over the sequence.
    pub fn is_active(&self) -> bool {
        self.start_fov != self.end_fov
    }

    /// Field of view at `progress` through the sequence.
    ///
    /// Inactive ranges always return `1.0`.
    pub fn fov_at(&self, progress: f64, easing: Easing) -> f64 {
        if !self.is_active() {
            return 1.0;
        }
        let eased = easing.apply(progress);
        self.start_fov + (self.end_fov - self.start_fov) * eased
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for ZoomRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_percent(self.start_fov),
            format_percent(self.end_fov)
        )
    }
}

impl TryFrom<String> for ZoomRange {
    type Error = OptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ZoomRange> for String {
    fn from(value: ZoomRange) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for ZoomRange {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{}", percent.round() as i64)
    } else {
        format!("{percent}")
    }
}

/// Complete zoom configuration for a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomSpec {
    pub range: ZoomRange,
    pub anchor: ZoomAnchor,
    pub easing: Easing,
}

impl ZoomSpec {
    pub fn is_active(&self) -> bool {
        self.range.is_active()
    }

    /// Field of view at `progress`, eased with the zoom easing.
    pub fn fov_at(&self, progress: f64) -> f64 {
        self.range.fov_at(progress, self.easing)
    }
}
