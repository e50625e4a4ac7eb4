//! Host layout snapshots and change batches.
//!
//! The host owns the live set of regions. The engine only ever reads it
//! through a [`LayoutSnapshot`] and learns about changes through
//! [`LayoutChange`] batches, both stamped with the layout revision they
//! describe.

use std::fmt;

use smallvec::SmallVec;

/// A volatile region position, valid only against one layout revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionIndex(pub usize);

impl fmt::Display for RegionIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One live region as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
	/// Position of the region in the layout.
	pub index: RegionIndex,
	/// Whether the region currently has activation.
	pub active: bool,
	/// Number of open documents in the region.
	pub tabs: usize,
}

/// The host's live region set at one layout revision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSnapshot {
	revision: u64,
	regions: Vec<RegionInfo>,
}

impl LayoutSnapshot {
	/// Creates a snapshot of `regions` taken at `revision`.
	pub fn new(revision: u64, regions: Vec<RegionInfo>) -> Self {
		Self { revision, regions }
	}

	/// Layout revision this snapshot reflects.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// All live regions in layout order.
	pub fn regions(&self) -> &[RegionInfo] {
		&self.regions
	}

	/// Returns the region at `index`, if it is live.
	pub fn get(&self, index: RegionIndex) -> Option<&RegionInfo> {
		self.regions.iter().find(|r| r.index == index)
	}

	/// Returns `true` if a region exists at `index`.
	pub fn contains(&self, index: RegionIndex) -> bool {
		self.get(index).is_some()
	}

	/// Returns the index of the active region.
	pub fn active(&self) -> Option<RegionIndex> {
		self.regions.iter().find(|r| r.active).map(|r| r.index)
	}
}

/// Activation flag change for a single region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationChange {
	pub index: RegionIndex,
	pub active: bool,
}

/// A batch of layout changes delivered by the host.
///
/// `opened` and `closed` are expressed against the layout the batch
/// transforms; `activation` indices are in the coordinates of the layout the
/// batch produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutChange {
	/// Layout revision produced by this batch. Strictly increasing per host,
	/// starting above the initial snapshot's revision, so never `0`.
	pub revision: u64,
	pub opened: SmallVec<[RegionIndex; 2]>,
	pub closed: SmallVec<[RegionIndex; 2]>,
	pub activation: SmallVec<[ActivationChange; 2]>,
}

impl LayoutChange {
	/// Creates an empty batch producing `revision`.
	pub fn new(revision: u64) -> Self {
		Self {
			revision,
			opened: SmallVec::new(),
			closed: SmallVec::new(),
			activation: SmallVec::new(),
		}
	}

	/// Adds a region opened at `index`.
	pub fn opened(mut self, index: usize) -> Self {
		self.opened.push(RegionIndex(index));
		self
	}

	/// Adds a region closed at `index`.
	pub fn closed(mut self, index: usize) -> Self {
		self.closed.push(RegionIndex(index));
		self
	}

	/// Adds an activation change for the region at `index`.
	pub fn activation(mut self, index: usize, active: bool) -> Self {
		self.activation.push(ActivationChange {
			index: RegionIndex(index),
			active,
		});
		self
	}

	/// Returns `true` if the batch opens or closes any region.
	pub fn is_structural(&self) -> bool {
		!self.opened.is_empty() || !self.closed.is_empty()
	}
}
