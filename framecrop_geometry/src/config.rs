// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Errors reported while building geometry inputs.
///
/// Interactive operations never fail; these only surface at the boundaries
/// where sizes enter the engine.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The viewport size was zero, negative or not finite.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport {
        /// Requested viewport width in pixels.
        width: f64,
        /// Requested viewport height in pixels.
        height: f64,
    },
    /// The natural image size was zero, negative or not finite.
    #[error("invalid natural image size {width}x{height}")]
    InvalidNaturalSize {
        /// Reported natural width in pixels.
        width: f64,
        /// Reported natural height in pixels.
        height: f64,
    },
    /// A horizontal flip value other than `1` or `-1`.
    #[error("invalid horizontal flip value {0}, expected 1 or -1")]
    InvalidScaleX(i8),
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Fixed viewport the content is cropped to.
///
/// The aspect ratio never changes after construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    target_width: f64,
    target_height: f64,
}

impl ViewportConfig {
    /// Viewport used when nothing else is configured: 400x300 pixels.
    pub const DEFAULT: Self = Self {
        target_width: 400.0,
        target_height: 300.0,
    };

    /// Creates a viewport of `target_width` x `target_height` pixels.
    pub fn new(target_width: f64, target_height: f64) -> Result<Self, GeometryError> {
        if !is_positive(target_width) || !is_positive(target_height) {
            return Err(GeometryError::InvalidViewport {
                width: target_width,
                height: target_height,
            });
        }
        Ok(Self {
            target_width,
            target_height,
        })
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn target_width(&self) -> f64 {
        self.target_width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn target_height(&self) -> f64 {
        self.target_height
    }

    /// Returns `target_height / target_width`.
    #[must_use]
    pub fn image_ratio(&self) -> f64 {
        self.target_height / self.target_width
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.target_width, self.target_height)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pixel dimensions of the decoded image, as reported by the loader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NaturalSize {
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
}

impl NaturalSize {
    /// Creates a natural size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns an error unless both dimensions are positive and finite.
    pub fn validate(self) -> Result<Self, GeometryError> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(self)
        } else {
            Err(GeometryError::InvalidNaturalSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl From<NaturalSize> for Size {
    fn from(n: NaturalSize) -> Self {
        Self::new(n.width, n.height)
    }
}

/// Initial sizing policy.
///
/// Consulted by [`crate::CropGeometry::should_fit`] and by hosts sequencing
/// the first layout after an image becomes ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FitPolicy {
    /// Always fit on initialization, even when the image covers the viewport.
    pub fit_on_init: bool,
    /// Center the content on initialization.
    pub center_on_init: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_degenerate_sizes() {
        assert!(ViewportConfig::new(0.0, 300.0).is_err());
        assert!(ViewportConfig::new(400.0, -1.0).is_err());
        assert!(ViewportConfig::new(f64::NAN, 300.0).is_err());
        assert!(ViewportConfig::new(f64::INFINITY, 300.0).is_err());
    }

    #[test]
    fn default_viewport_ratio() {
        let cfg = ViewportConfig::default();
        assert_eq!(cfg.size(), Size::new(400.0, 300.0));
        assert_eq!(cfg.image_ratio(), 0.75);
    }

    #[test]
    fn natural_size_validation() {
        assert!(NaturalSize::new(800.0, 300.0).validate().is_ok());
        assert_eq!(
            NaturalSize::new(0.0, 10.0).validate(),
            Err(GeometryError::InvalidNaturalSize {
                width: 0.0,
                height: 10.0
            })
        );
    }
}
