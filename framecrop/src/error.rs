// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for widget construction and option parsing.

use framecrop_geometry::GeometryError;
use thiserror::Error;

/// Errors that can occur while configuring a [`Cropper`](crate::Cropper).
///
/// Interactive operations never fail; every runtime input is clamped or
/// ignored instead.
#[derive(Error, Debug)]
pub enum CropperError {
    /// Target viewport size is unusable.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// No image URL was configured.
    #[error("missing required option: imageUrl")]
    MissingImageUrl,

    /// Zoom step must be a fraction strictly between 0 and 1.
    #[error("invalid zoom step {0}, expected a value in (0, 1)")]
    InvalidZoomStep(f64),

    /// Options JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
