// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::config::GeometryError;

/// Horizontal flip state of the content layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "i8", try_from = "i8")
)]
pub enum ScaleX {
    /// Not flipped (`1`).
    #[default]
    Normal,
    /// Mirrored horizontally (`-1`).
    Flipped,
}

impl ScaleX {
    /// Returns the other flip state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Flipped,
            Self::Flipped => Self::Normal,
        }
    }

    /// The horizontal scale a render surface applies: `1.0` or `-1.0`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::Flipped => -1.0,
        }
    }

    /// Maps a sign to a flip state; negative values mean flipped.
    #[must_use]
    pub fn from_sign(sign: f64) -> Self {
        if sign < 0.0 { Self::Flipped } else { Self::Normal }
    }
}

impl From<ScaleX> for i8 {
    fn from(s: ScaleX) -> Self {
        match s {
            ScaleX::Normal => 1,
            ScaleX::Flipped => -1,
        }
    }
}

impl TryFrom<i8> for ScaleX {
    type Error = GeometryError;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Self::Normal),
            -1 => Ok(Self::Flipped),
            other => Err(GeometryError::InvalidScaleX(other)),
        }
    }
}

/// Read-only projection of the geometry state.
///
/// Sizes and offsets are in normalized viewport units. Serialized as the flat
/// record `{w, h, x, y, degrees, scaleX}`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Content width as a multiple of the viewport width.
    #[cfg_attr(feature = "serde", serde(rename = "w"))]
    pub content_width: f64,
    /// Content height as a multiple of the viewport height.
    #[cfg_attr(feature = "serde", serde(rename = "h"))]
    pub content_height: f64,
    /// Horizontal offset of the viewport into the content.
    #[cfg_attr(feature = "serde", serde(rename = "x"))]
    pub offset_x: f64,
    /// Vertical offset of the viewport into the content.
    #[cfg_attr(feature = "serde", serde(rename = "y"))]
    pub offset_y: f64,
    /// Tracked rotation in degrees, in `[0, 360)`.
    #[cfg_attr(feature = "serde", serde(rename = "degrees"))]
    pub rotation_degrees: i32,
    /// Horizontal flip.
    #[cfg_attr(feature = "serde", serde(rename = "scaleX"))]
    pub scale_x: ScaleX,
}

/// Persisted geometry to restore once the image is ready.
///
/// Serialized as `{w, h, x, y, scaleX}`; `scaleX` may be omitted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageData {
    /// Content width in viewport units.
    pub w: f64,
    /// Content height in viewport units.
    pub h: f64,
    /// Horizontal offset in viewport units.
    pub x: f64,
    /// Vertical offset in viewport units.
    pub y: f64,
    /// Horizontal flip.
    #[cfg_attr(feature = "serde", serde(rename = "scaleX", default))]
    pub scale_x: ScaleX,
}

impl From<Snapshot> for ImageData {
    fn from(s: Snapshot) -> Self {
        Self {
            w: s.content_width,
            h: s.content_height,
            x: s.offset_x,
            y: s.offset_y,
            scale_x: s.scale_x,
        }
    }
}
