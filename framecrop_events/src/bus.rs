// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry and synchronous publishing.
//!
//! Listeners are grouped per notification variant and called in registration
//! order. Publishing completes every listener call before returning.
//!
//! ## Minimal example
//!
//! ```
//! use framecrop_events::{EventBus, ImageReadyEvent, Notification};
//! use framecrop_geometry::NaturalSize;
//!
//! let mut bus = EventBus::<&'static str>::new();
//! let id = bus.on_image_ready(|e| assert_eq!(e.target, "left"));
//!
//! let delivered = bus.publish(&Notification::ImageReady(ImageReadyEvent {
//!     natural: NaturalSize::new(640.0, 480.0),
//!     target: "left",
//! }));
//! assert_eq!(delivered, 1);
//!
//! assert!(bus.remove(id));
//! assert_eq!(bus.listener_count(), 0);
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::notification::{ChangedEvent, ImageReadyEvent, Notification};

/// Handle returned when registering a listener, used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Most widgets have one or two listeners per variant.
const INLINE_LISTENERS: usize = 2;

type ListenerList<E> = SmallVec<[(ListenerId, Listener<E>); INLINE_LISTENERS]>;

/// Named-variant publish/subscribe for one or more widgets.
///
/// `K` is the host's attachment-point reference; it travels with every
/// notification so listeners shared between widgets can tell them apart.
pub struct EventBus<K> {
    next_id: u64,
    image_ready: ListenerList<ImageReadyEvent<K>>,
    changed: ListenerList<ChangedEvent<K>>,
}

impl<K> EventBus<K> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            image_ready: SmallVec::new(),
            changed: SmallVec::new(),
        }
    }

    /// Registers a listener for [`Notification::ImageReady`].
    pub fn on_image_ready(
        &mut self,
        listener: impl FnMut(&ImageReadyEvent<K>) + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.image_ready.push((id, Box::new(listener)));
        id
    }

    /// Registers a listener for [`Notification::Changed`].
    pub fn on_changed(
        &mut self,
        listener: impl FnMut(&ChangedEvent<K>) + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.changed.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` is not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        remove_from(&mut self.image_ready, id) || remove_from(&mut self.changed, id)
    }

    /// Total number of registered listeners across all variants.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.image_ready.len() + self.changed.len()
    }

    /// Delivers `notification` to every listener of its variant, in
    /// registration order. Returns the number of listeners called.
    pub fn publish(&mut self, notification: &Notification<K>) -> usize {
        match notification {
            Notification::ImageReady(e) => dispatch(&mut self.image_ready, e),
            Notification::Changed(e) => dispatch(&mut self.changed, e),
        }
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<K> Default for EventBus<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for EventBus<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("image_ready", &self.image_ready.len())
            .field("changed", &self.changed.len())
            .finish()
    }
}

fn dispatch<E>(listeners: &mut ListenerList<E>, event: &E) -> usize {
    for (_, listener) in listeners.iter_mut() {
        listener(event);
    }
    listeners.len()
}

fn remove_from<E>(listeners: &mut ListenerList<E>, id: ListenerId) -> bool {
    match listeners.iter().position(|(l, _)| *l == id) {
        Some(index) => {
            drop(listeners.remove(index));
            true
        }
        None => false,
    }
}
