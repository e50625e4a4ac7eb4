//! The editor host seam.
//!
//! The engine never owns the window layout. It reads a [`LayoutSnapshot`],
//! receives [`HostEvent`]s, and issues fire-and-forget requests through
//! [`Host`]. Every request is a point where the layout may have moved on, so
//! callers re-query the snapshot before addressing a region again.

mod memory;

use std::path::{Path, PathBuf};

pub use memory::{HostRequest, MemoryHost};

use crate::region::{LayoutChange, LayoutSnapshot, RegionIndex};

/// A document open in a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
	pub path: PathBuf,
	/// Preview tabs are transient and never captured into groups.
	pub preview: bool,
}

impl Tab {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			preview: false,
		}
	}
}

/// Notifications delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	/// Regions opened, closed, or changed activation.
	LayoutChanged(LayoutChange),
	/// The active document view changed; `None` when nothing is active.
	ActiveRegionChanged(Option<RegionIndex>),
	/// Documents were opened or closed inside a region.
	RegionContentsChanged(RegionIndex),
}

/// Failure of a single host request.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
	/// The addressed region does not exist in the current layout.
	#[error("region {0} does not exist")]
	NoSuchRegion(RegionIndex),
	/// The host rejected the request.
	#[error("{request} failed: {message}")]
	Rejected {
		request: &'static str,
		message: String,
	},
}

/// Window-layout primitives the engine drives.
pub trait Host {
	/// Current live regions.
	///
	/// The revision starts at `0` and every change to the region list or the
	/// active flag bumps it and queues exactly one
	/// [`HostEvent::LayoutChanged`] carrying the new revision.
	fn snapshot(&self) -> LayoutSnapshot;

	/// Documents open in `region`, in tab order.
	fn tabs(&self, region: RegionIndex) -> Vec<Tab>;

	/// Drains events queued since the last call.
	fn poll_events(&mut self) -> Vec<HostEvent>;

	/// Creates a new region and makes it active.
	fn create_region(&mut self) -> Result<(), HostError>;

	fn open_document(&mut self, region: RegionIndex, path: &Path) -> Result<(), HostError>;

	fn activate_region(&mut self, region: RegionIndex) -> Result<(), HostError>;

	fn maximize_region(&mut self, region: RegionIndex) -> Result<(), HostError>;

	/// Locks `region` so new documents open elsewhere.
	fn lock_region(&mut self, region: RegionIndex) -> Result<(), HostError>;

	/// Closes every document in `region`, then the region itself.
	fn close_region(&mut self, region: RegionIndex) -> Result<(), HostError>;

	/// Moves `region` out of this layout into a new top-level window.
	fn move_region_to_window(&mut self, region: RegionIndex) -> Result<(), HostError>;
}
