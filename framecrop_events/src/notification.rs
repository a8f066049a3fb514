// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use framecrop_geometry::{NaturalSize, Snapshot};

/// The image for `target` finished loading.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageReadyEvent<K> {
    /// Natural image dimensions in pixels.
    pub natural: NaturalSize,
    /// Attachment point of the widget the image belongs to.
    pub target: K,
}

impl<K: PartialEq> ImageReadyEvent<K> {
    /// Returns `true` if this event belongs to the widget attached at `target`.
    pub fn is_for(&self, target: &K) -> bool {
        self.target == *target
    }
}

/// The geometry of the widget attached at `target` changed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangedEvent<K> {
    /// State after the change.
    pub snapshot: Snapshot,
    /// Attachment point of the widget that changed.
    pub target: K,
}

/// Every notification a widget publishes.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification<K> {
    /// See [`ImageReadyEvent`].
    ImageReady(ImageReadyEvent<K>),
    /// See [`ChangedEvent`].
    Changed(ChangedEvent<K>),
}

impl<K> Notification<K> {
    /// Attachment point the notification is about.
    pub fn target(&self) -> &K {
        match self {
            Self::ImageReady(e) => &e.target,
            Self::Changed(e) => &e.target,
        }
    }
}

impl<K> From<ImageReadyEvent<K>> for Notification<K> {
    fn from(e: ImageReadyEvent<K>) -> Self {
        Self::ImageReady(e)
    }
}

impl<K> From<ChangedEvent<K>> for Notification<K> {
    fn from(e: ChangedEvent<K>) -> Self {
        Self::Changed(e)
    }
}
