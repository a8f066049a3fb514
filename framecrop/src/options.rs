// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use framecrop_geometry::{FitPolicy, ImageData, ViewportConfig};
use serde::{Deserialize, Serialize};

use crate::error::CropperError;

/// Construction options for a [`Cropper`](crate::Cropper).
///
/// Deserializes from camelCase JSON; every field is optional and falls back
/// to its default. `width`/`height` and `zoomStepFraction` are accepted as
/// aliases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropperOptions {
    /// Viewport width in pixels. Default `400`.
    #[serde(alias = "width")]
    pub target_width: f64,
    /// Viewport height in pixels. Default `300`.
    #[serde(alias = "height")]
    pub target_height: f64,
    /// Image to load; plain URL or `data:` URL. Required.
    pub image_url: Option<String>,
    /// Relative zoom per wheel step. Default `0.01`.
    #[serde(alias = "zoomStepFraction")]
    pub zoom_step: f64,
    /// Fit the image even when it already covers the viewport. Default `false`.
    pub fit_on_init: bool,
    /// Center the image once sized. Default `false`.
    pub center_on_init: bool,
    /// Load cross-origin images anonymously with a cache-busting timestamp.
    /// Default `false`.
    pub check_cross_origin: bool,
    /// Geometry to restore once the image is ready.
    pub image_data: Option<ImageData>,
}

impl Default for CropperOptions {
    fn default() -> Self {
        Self {
            target_width: ViewportConfig::DEFAULT.target_width(),
            target_height: ViewportConfig::DEFAULT.target_height(),
            image_url: None,
            zoom_step: framecrop_gesture::DEFAULT_ZOOM_STEP,
            fit_on_init: false,
            center_on_init: false,
            check_cross_origin: false,
            image_data: None,
        }
    }
}

impl CropperOptions {
    /// Default options loading `image_url`.
    pub fn with_image_url(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            ..Self::default()
        }
    }

    /// Parses options from JSON and validates them.
    pub fn from_json(json: &str) -> Result<Self, CropperError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks every option that has a constraint.
    pub fn validate(&self) -> Result<(), CropperError> {
        self.viewport()?;
        if self.image_url.as_deref().is_none_or(str::is_empty) {
            return Err(CropperError::MissingImageUrl);
        }
        if !(self.zoom_step > 0.0 && self.zoom_step < 1.0) {
            return Err(CropperError::InvalidZoomStep(self.zoom_step));
        }
        Ok(())
    }

    /// The viewport described by `target_width` x `target_height`.
    pub fn viewport(&self) -> Result<ViewportConfig, CropperError> {
        Ok(ViewportConfig::new(self.target_width, self.target_height)?)
    }

    /// Initial sizing policy.
    #[must_use]
    pub fn fit_policy(&self) -> FitPolicy {
        FitPolicy {
            fit_on_init: self.fit_on_init,
            center_on_init: self.center_on_init,
        }
    }
}
