use std::sync::{Arc, RwLock};

use super::Snapshot;

/// The currently published snapshot.
///
/// Readers take an `Arc` and resolve against it without holding the lock,
/// so a [`replace`](SnapshotHandle::replace) never disturbs requests already in flight.
#[derive(Debug)]
pub struct SnapshotHandle {
	current: RwLock<Arc<Snapshot>>,
}

impl SnapshotHandle {
	pub fn new(snapshot: Snapshot) -> Self {
		Self {
			current: RwLock::new(Arc::new(snapshot)),
		}
	}

	pub fn current(&self) -> Arc<Snapshot> {
		/* the guarded value is only ever swapped whole, a poisoned lock still holds a complete snapshot */
		let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
		Arc::clone(&guard)
	}

	/// Publishes `snapshot` and returns the one it replaced.
	pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
		let snapshot = Arc::new(snapshot);
		let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
		log::info!("Publishing snapshot with last_change {}", snapshot.raw_last_change());
		std::mem::replace(&mut *guard, snapshot)
	}
}
