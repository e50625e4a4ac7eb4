//! Deterministic in-memory host.
//!
//! Keeps a flat list of regions, records every request it receives, and
//! queues the events a real editor would emit for each layout change. The
//! `user_*` methods simulate changes made outside the engine.

use std::path::{Path, PathBuf};

use super::{Host, HostError, HostEvent, Tab};
use crate::region::{LayoutChange, LayoutSnapshot, RegionIndex, RegionInfo};

/// A request received by [`MemoryHost`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
	CreateRegion,
	OpenDocument { region: RegionIndex, path: PathBuf },
	ActivateRegion(RegionIndex),
	MaximizeRegion(RegionIndex),
	LockRegion(RegionIndex),
	CloseRegion(RegionIndex),
	MoveRegionToWindow(RegionIndex),
}

#[derive(Debug, Clone, Default)]
struct Region {
	tabs: Vec<Tab>,
	maximized: bool,
	locked: bool,
}

/// In-memory [`Host`] used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryHost {
	revision: u64,
	regions: Vec<Region>,
	active: Option<usize>,
	events: Vec<HostEvent>,
	requests: Vec<HostRequest>,
	windows: Vec<Vec<Tab>>,
}

impl MemoryHost {
	/// A host with a single empty, active region.
	pub fn new() -> Self {
		Self::with_regions(1)
	}

	/// A host with `count` empty regions; the first one is active.
	pub fn with_regions(count: usize) -> Self {
		Self {
			regions: vec![Region::default(); count],
			active: (count > 0).then_some(0),
			..Self::default()
		}
	}

	/// Requests received so far.
	pub fn requests(&self) -> &[HostRequest] {
		&self.requests
	}

	/// Returns and clears the recorded requests.
	pub fn take_requests(&mut self) -> Vec<HostRequest> {
		std::mem::take(&mut self.requests)
	}

	pub fn region_count(&self) -> usize {
		self.regions.len()
	}

	pub fn active_region(&self) -> Option<RegionIndex> {
		self.active.map(RegionIndex)
	}

	/// Paths open in `region`, in tab order.
	pub fn region_paths(&self, region: usize) -> Vec<PathBuf> {
		self.regions
			.get(region)
			.map(|r| r.tabs.iter().map(|t| t.path.clone()).collect())
			.unwrap_or_default()
	}

	pub fn is_maximized(&self, region: usize) -> bool {
		self.regions.get(region).is_some_and(|r| r.maximized)
	}

	pub fn is_locked(&self, region: usize) -> bool {
		self.regions.get(region).is_some_and(|r| r.locked)
	}

	/// Number of regions moved out into their own windows.
	pub fn window_count(&self) -> usize {
		self.windows.len()
	}

	/// The user opens an empty region at `at` without moving activation.
	pub fn user_open_region(&mut self, at: usize) {
		let at = at.min(self.regions.len());
		self.regions.insert(at, Region::default());
		if let Some(active) = self.active.as_mut()
			&& *active >= at
		{
			*active += 1;
		}
		let change = self.next_change().opened(at);
		self.events.push(HostEvent::LayoutChanged(change));
	}

	/// The user closes the region at `at`.
	pub fn user_close_region(&mut self, at: usize) {
		self.remove_region(at);
	}

	/// The user clicks into the region at `at`.
	pub fn user_activate(&mut self, at: usize) {
		self.activate(at);
	}

	/// The user opens `path` in `region` (as a preview tab when `preview`).
	pub fn user_open_document(&mut self, region: usize, path: impl Into<PathBuf>, preview: bool) {
		let Some(r) = self.regions.get_mut(region) else {
			return;
		};
		r.tabs.push(Tab {
			path: path.into(),
			preview,
		});
		self.events.push(HostEvent::RegionContentsChanged(RegionIndex(region)));
	}

	/// The user closes the tab for `path` in `region`.
	///
	/// Closing the last tab of the active region leaves no active editor.
	pub fn user_close_document(&mut self, region: usize, path: impl AsRef<Path>) {
		let Some(r) = self.regions.get_mut(region) else {
			return;
		};
		r.tabs.retain(|t| t.path != path.as_ref());
		let emptied = r.tabs.is_empty();
		self.events.push(HostEvent::RegionContentsChanged(RegionIndex(region)));
		if emptied && self.active == Some(region) {
			self.events.push(HostEvent::ActiveRegionChanged(None));
		}
	}

	fn next_change(&mut self) -> LayoutChange {
		self.revision += 1;
		LayoutChange::new(self.revision)
	}

	fn region_mut(&mut self, region: RegionIndex) -> Result<&mut Region, HostError> {
		self.regions.get_mut(region.0).ok_or(HostError::NoSuchRegion(region))
	}

	fn activate(&mut self, at: usize) {
		if at >= self.regions.len() || self.active == Some(at) {
			return;
		}
		let mut change = self.next_change();
		if let Some(old) = self.active {
			change = change.activation(old, false);
		}
		self.active = Some(at);
		self.events.push(HostEvent::LayoutChanged(change.activation(at, true)));
	}

	fn remove_region(&mut self, at: usize) -> Option<Region> {
		if at >= self.regions.len() {
			return None;
		}
		let removed = self.regions.remove(at);
		let mut change = self.next_change().closed(at);
		match self.active {
			Some(active) if active == at => {
				let next = (!self.regions.is_empty()).then(|| at.saturating_sub(1));
				self.active = next;
				if let Some(next) = next {
					change = change.activation(next, true);
				}
			}
			Some(active) if active > at => self.active = Some(active - 1),
			_ => {}
		}
		self.events.push(HostEvent::LayoutChanged(change));
		Some(removed)
	}
}

impl Host for MemoryHost {
	fn snapshot(&self) -> LayoutSnapshot {
		LayoutSnapshot::new(
			self.revision,
			self.regions
				.iter()
				.enumerate()
				.map(|(i, r)| RegionInfo {
					index: RegionIndex(i),
					active: self.active == Some(i),
					tabs: r.tabs.len(),
				})
				.collect(),
		)
	}

	fn tabs(&self, region: RegionIndex) -> Vec<Tab> {
		self.regions.get(region.0).map(|r| r.tabs.clone()).unwrap_or_default()
	}

	fn poll_events(&mut self) -> Vec<HostEvent> {
		std::mem::take(&mut self.events)
	}

	fn create_region(&mut self) -> Result<(), HostError> {
		self.requests.push(HostRequest::CreateRegion);
		let at = self.active.map_or(self.regions.len(), |a| a + 1);
		self.regions.insert(at, Region::default());

		let mut change = self.next_change().opened(at);
		if let Some(old) = self.active {
			change = change.activation(old, false);
		}
		self.active = Some(at);
		self.events.push(HostEvent::LayoutChanged(change.activation(at, true)));
		Ok(())
	}

	fn open_document(&mut self, region: RegionIndex, path: &Path) -> Result<(), HostError> {
		self.requests.push(HostRequest::OpenDocument {
			region,
			path: path.to_path_buf(),
		});
		let r = self.region_mut(region)?;
		if !r.tabs.iter().any(|t| t.path == path) {
			r.tabs.push(Tab::new(path));
		}
		self.events.push(HostEvent::RegionContentsChanged(region));
		Ok(())
	}

	fn activate_region(&mut self, region: RegionIndex) -> Result<(), HostError> {
		self.requests.push(HostRequest::ActivateRegion(region));
		self.region_mut(region)?;
		self.activate(region.0);
		Ok(())
	}

	fn maximize_region(&mut self, region: RegionIndex) -> Result<(), HostError> {
		self.requests.push(HostRequest::MaximizeRegion(region));
		self.region_mut(region)?.maximized = true;
		Ok(())
	}

	fn lock_region(&mut self, region: RegionIndex) -> Result<(), HostError> {
		self.requests.push(HostRequest::LockRegion(region));
		self.region_mut(region)?.locked = true;
		Ok(())
	}

	fn close_region(&mut self, region: RegionIndex) -> Result<(), HostError> {
		self.requests.push(HostRequest::CloseRegion(region));
		self.remove_region(region.0)
			.map(drop)
			.ok_or(HostError::NoSuchRegion(region))
	}

	fn move_region_to_window(&mut self, region: RegionIndex) -> Result<(), HostError> {
		self.requests.push(HostRequest::MoveRegionToWindow(region));
		let moved = self.remove_region(region.0).ok_or(HostError::NoSuchRegion(region))?;
		self.windows.push(moved.tabs);
		Ok(())
	}
}
