use tracing::{trace, warn};

use super::layout::{LayoutChange, LayoutSnapshot, RegionIndex};

/// Activation transition observed for a tracked region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEvent {
	Focused,
	Blurred,
}

/// Errors raised when binding a [`RegionHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
	/// No region was supplied and the layout has no active region.
	#[error("no active region")]
	NoActiveRegion,
	/// The supplied region is not part of the layout.
	#[error("region {0} is not live")]
	NotLive(RegionIndex),
}

/// Proxy over one physical region that follows it across renumbering.
///
/// The handle remembers the layout revision it was bound against. Batches at
/// or below that revision are already reflected in the tracked index and are
/// ignored; newer batches shift the index when regions open or close at or
/// before it. The tracked index only addresses a snapshot of the same
/// revision: against any other snapshot the handle reports nothing until the
/// pending batches have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHandle {
	index: RegionIndex,
	revision: u64,
	closed: bool,
}

impl RegionHandle {
	/// Binds to `existing`, or to the snapshot's active region when `None`.
	pub fn bind(snapshot: &LayoutSnapshot, existing: Option<RegionIndex>) -> Result<Self, RegionError> {
		let index = match existing {
			Some(index) if snapshot.contains(index) => index,
			Some(index) => return Err(RegionError::NotLive(index)),
			None => snapshot.active().ok_or(RegionError::NoActiveRegion)?,
		};
		Ok(Self {
			index,
			revision: snapshot.revision(),
			closed: false,
		})
	}

	/// Last index this handle computed, without consulting the layout.
	///
	/// Only meaningful for comparisons made against the same revision; use
	/// [`Self::current_index`] before addressing the region.
	pub fn tracked_index(&self) -> RegionIndex {
		self.index
	}

	/// Latest layout revision folded into the tracked index.
	pub fn observed_revision(&self) -> u64 {
		self.revision
	}

	/// Returns `true` once a batch reported this region as closed.
	pub fn is_closed(&self) -> bool {
		self.closed
	}

	/// Returns `true` if every batch up to `snapshot` has been applied.
	pub fn is_current(&self, snapshot: &LayoutSnapshot) -> bool {
		snapshot.revision() == self.revision
	}

	/// Re-derives the region's index against `snapshot`.
	///
	/// `None` once the region is gone, or while `snapshot` is at a revision
	/// this handle has not caught up with.
	pub fn current_index(&self, snapshot: &LayoutSnapshot) -> Option<RegionIndex> {
		self.is_live(snapshot).then_some(self.index)
	}

	/// Returns `true` if the tracked region exists in the current `snapshot`.
	pub fn is_live(&self, snapshot: &LayoutSnapshot) -> bool {
		!self.closed && self.is_current(snapshot) && snapshot.contains(self.index)
	}

	/// Number of documents open in the region.
	///
	/// `None` if the region is gone or `snapshot` is not current.
	pub fn tab_count(&self, snapshot: &LayoutSnapshot) -> Option<usize> {
		if self.closed || !self.is_current(snapshot) {
			return None;
		}
		snapshot.get(self.index).map(|r| r.tabs)
	}

	/// Folds one layout batch into the tracked index.
	///
	/// Opens and closes at or before the index are counted against the index
	/// the batch started from, so the net shift does not depend on their order
	/// inside the batch. A close at exactly the tracked index marks the handle
	/// closed. Activation entries are then matched against the adjusted index.
	pub fn apply(&mut self, change: &LayoutChange) -> Option<RegionEvent> {
		if self.closed {
			return None;
		}
		if change.revision <= self.revision {
			// Equal revisions are the batch that produced the bound snapshot.
			if change.is_structural() && (change.revision == 0 || change.revision < self.revision) {
				warn!(
					revision = change.revision,
					observed = self.revision,
					"region.stale_batch"
				);
			}
			return None;
		}
		self.revision = change.revision;

		let start = self.index;
		let opened = change.opened.iter().filter(|&&i| i <= start).count();
		let closed = change.closed.iter().filter(|&&i| i <= start).count();
		if change.closed.contains(&start) {
			self.closed = true;
		}

		let adjusted = (start.0 + opened).saturating_sub(closed);
		if adjusted != start.0 {
			trace!(from = start.0, to = adjusted, revision = change.revision, "region.reindex");
		}
		self.index = RegionIndex(adjusted);

		if self.closed {
			return None;
		}

		change
			.activation
			.iter()
			.rev()
			.find(|a| a.index == self.index)
			.map(|a| if a.active { RegionEvent::Focused } else { RegionEvent::Blurred })
	}
}
