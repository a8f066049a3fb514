// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=framecrop_geometry --heading-base-level=0

//! Framecrop Geometry: normalized crop geometry for a fixed-aspect viewport.
//!
//! This crate provides a small, headless model of an image layer that is
//! panned and zoomed behind a fixed viewport. It focuses on:
//! - Sizing the content from the image's natural dimensions.
//! - Fitting, centering and zooming while keeping the viewport covered.
//! - Clamping offsets so the content never exposes an empty edge.
//! - Producing a flat [`Snapshot`] that hosts render and persist.
//!
//! All sizes and offsets are **normalized**: one unit is one viewport width
//! (horizontally) or one viewport height (vertically). Pixel values are only
//! derived at the render boundary, see [`CropGeometry::pixel_offset`].
//!
//! It does **not** load images, touch a DOM, or interpret pointer input.
//! Callers are expected to:
//! - Report natural image dimensions with
//!   [`CropGeometry::initialize_from_natural_size`].
//! - Wire pointer and wheel input into offset and zoom operations at a higher
//!   layer (for example `framecrop_gesture`).
//! - Observe changes through a [`ChangeNotifier`].
//!
//! ## Minimal example
//!
//! ```rust
//! use framecrop_geometry::{CropGeometry, FitPolicy, NaturalSize, ViewportConfig};
//!
//! let config = ViewportConfig::new(400.0, 300.0).unwrap();
//! let mut geometry = CropGeometry::new(config);
//!
//! // An 800x300 image is two viewports wide and exactly one tall.
//! geometry
//!     .initialize_from_natural_size(NaturalSize::new(800.0, 300.0))
//!     .unwrap();
//! assert!(!geometry.should_fit(FitPolicy::default()));
//!
//! // Offsets are clamped so the viewport stays covered.
//! geometry.set_offset(Some(5.0), None);
//! assert_eq!(geometry.snapshot().offset_x, 1.0);
//!
//! // Zooming out below the fitted size saturates.
//! geometry.zoom(0.5);
//! assert_eq!(geometry.snapshot().content_height, 1.0);
//! ```
//!
//! ## Observing changes
//!
//! ```rust
//! use framecrop_geometry::{CropGeometry, NaturalSize, Snapshot, ViewportConfig};
//!
//! let mut geometry = CropGeometry::with_notifier(ViewportConfig::DEFAULT, Vec::<Snapshot>::new());
//! geometry
//!     .initialize_from_natural_size(NaturalSize::new(800.0, 600.0))
//!     .unwrap();
//! geometry.center();
//! geometry.flip_horizontal();
//! assert_eq!(geometry.notifier().len(), 2);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod config;
mod geometry;
mod notify;
mod snapshot;

pub use config::{FitPolicy, GeometryError, NaturalSize, ViewportConfig};
pub use geometry::CropGeometry;
pub use notify::{ChangeNotifier, FnNotifier};
pub use snapshot::{ImageData, ScaleX, Snapshot};
