// Copyright 2026 the Framecrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::snapshot::Snapshot;

/// Receives a snapshot after every geometry mutation.
///
/// Called synchronously once the state is fully updated, so implementations
/// always observe a consistent snapshot.
pub trait ChangeNotifier {
    /// The geometry changed; `snapshot` is the new state.
    fn changed(&mut self, snapshot: &Snapshot);
}

/// Discards notifications.
impl ChangeNotifier for () {
    fn changed(&mut self, _snapshot: &Snapshot) {}
}

/// Records every snapshot, oldest first.
impl ChangeNotifier for Vec<Snapshot> {
    fn changed(&mut self, snapshot: &Snapshot) {
        self.push(*snapshot);
    }
}

/// Adapts a closure into a [`ChangeNotifier`].
#[derive(Clone, Debug)]
pub struct FnNotifier<F>(pub F);

impl<F: FnMut(&Snapshot)> ChangeNotifier for FnNotifier<F> {
    fn changed(&mut self, snapshot: &Snapshot) {
        (self.0)(snapshot);
    }
}
