// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framecrop: an interactive, fixed-aspect image cropping widget core.
//!
//! A [`Cropper`] shows an image through a fixed-size viewport. The user pans
//! by dragging and zooms with the wheel or the runtime API; the widget keeps
//! the viewport covered at all times and reports every change as a
//! [`Snapshot`] that can be persisted and restored later through
//! [`CropperOptions::image_data`].
//!
//! The crate does no rendering or image decoding. The host:
//! - asks for a [`LoadRequest`] and loads the image,
//! - reports back with a [`LoadOutcome`],
//! - forwards pointer and wheel input, honoring the returned [`Response`],
//! - renders from [`Cropper::geometry`] whenever a change is published.
//!
//! Geometry lives in [`framecrop_geometry`], the notification bus in
//! [`framecrop_events`] and drag/wheel handling in [`framecrop_gesture`].
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use framecrop::{Cropper, CropperOptions, LoadOutcome, NaturalSize};
//!
//! let options = CropperOptions::from_json(r#"{"imageUrl": "photo.jpg", "centerOnInit": true}"#)
//!     .unwrap();
//! let mut cropper = Cropper::new(options, "crop-1").unwrap();
//!
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let sink = changes.clone();
//! cropper.subscribe_changed(move |event| sink.borrow_mut().push(event.snapshot));
//!
//! let request = cropper.load_request(None, 0);
//! assert_eq!(request.url, "photo.jpg");
//!
//! cropper.complete_load(LoadOutcome::Loaded {
//!     natural: NaturalSize::new(800.0, 450.0),
//!     bytes: None,
//! });
//! assert!(cropper.is_initialized());
//!
//! // Content is 2 x 1.5 viewports, centered.
//! let snapshot = cropper.snapshot();
//! assert_eq!((snapshot.offset_x, snapshot.offset_y), (0.5, 0.25));
//! assert_eq!(changes.borrow().len(), 1);
//! ```

mod cropper;
mod error;
pub mod loader;
mod options;

pub use cropper::{Cropper, Lifecycle};
pub use error::CropperError;
pub use loader::{CrossOrigin, LoadOutcome, LoadRequest, Origin};
pub use options::CropperOptions;

pub use framecrop_events::{ChangedEvent, EventBus, ImageReadyEvent, ListenerId, Notification};
pub use framecrop_geometry::{ImageData, NaturalSize, ScaleX, Snapshot};
pub use framecrop_gesture::{Buttons, Listeners, PointerEvent, PointerKind, PointerPhase, Response};
