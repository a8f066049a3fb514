// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

use framecrop_geometry::{ChangeNotifier, Snapshot};

use crate::bus::EventBus;
use crate::notification::{ChangedEvent, Notification};

/// Publishes every geometry change onto a shared [`EventBus`] as
/// [`Notification::Changed`], tagged with this widget's target.
///
/// Listeners must not publish on the same bus from inside their callback;
/// such nested notifications are dropped with a warning.
pub struct BusNotifier<K> {
    bus: Rc<RefCell<EventBus<K>>>,
    target: K,
}

impl<K> BusNotifier<K> {
    /// Creates a notifier publishing to `bus` on behalf of `target`.
    pub fn new(bus: Rc<RefCell<EventBus<K>>>, target: K) -> Self {
        Self { bus, target }
    }

    /// Shared bus this notifier publishes to.
    pub fn bus(&self) -> &Rc<RefCell<EventBus<K>>> {
        &self.bus
    }

    /// Attachment point changes are tagged with.
    pub fn target(&self) -> &K {
        &self.target
    }
}

impl<K: Clone> ChangeNotifier for BusNotifier<K> {
    fn changed(&mut self, snapshot: &Snapshot) {
        let notification = Notification::Changed(ChangedEvent {
            snapshot: *snapshot,
            target: self.target.clone(),
        });
        match self.bus.try_borrow_mut() {
            Ok(mut bus) => {
                bus.publish(&notification);
            }
            Err(_) => log::warn!("dropping change notification published from a listener"),
        }
    }
}

impl<K: core::fmt::Debug> core::fmt::Debug for BusNotifier<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BusNotifier")
            .field("bus", &self.bus)
            .field("target", &self.target)
            .finish()
    }
}
