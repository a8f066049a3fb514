// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=framecrop_events --heading-base-level=0

//! Framecrop Events: a small, typed notification bus for crop widgets.
//!
//! Widgets publish two kinds of [`Notification`]:
//!
//! - [`ImageReadyEvent`]: the loader finished and natural dimensions are known.
//! - [`ChangedEvent`]: the crop geometry changed; carries the new
//!   [`Snapshot`](framecrop_geometry::Snapshot).
//!
//! Both carry the host's attachment-point reference `K`, so several widgets
//! can share one bus (or one loader) without reacting to each other's events.
//!
//! Delivery is synchronous: [`EventBus::publish`] returns only after every
//! listener of the variant ran, in registration order. There is no queueing,
//! no threading and no ordering across variants.
//!
//! [`BusNotifier`] plugs a shared bus into
//! [`CropGeometry`](framecrop_geometry::CropGeometry) so every geometry change
//! is published as a [`Notification::Changed`]:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use framecrop_events::{BusNotifier, EventBus};
//! use framecrop_geometry::{CropGeometry, NaturalSize, ViewportConfig};
//!
//! let bus = Rc::new(RefCell::new(EventBus::new()));
//! let last = Rc::new(RefCell::new(None));
//! let sink = last.clone();
//! bus.borrow_mut().on_changed(move |e| *sink.borrow_mut() = Some(e.snapshot));
//!
//! let mut geometry =
//!     CropGeometry::with_notifier(ViewportConfig::DEFAULT, BusNotifier::new(bus.clone(), 1_u32));
//! geometry
//!     .initialize_from_natural_size(NaturalSize::new(800.0, 600.0))
//!     .unwrap();
//! geometry.flip_horizontal();
//!
//! assert_eq!(*last.borrow(), Some(geometry.snapshot()));
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod bus;
mod notification;
mod notifier;

pub use bus::{EventBus, ListenerId};
pub use notification::{ChangedEvent, ImageReadyEvent, Notification};
pub use notifier::BusNotifier;
