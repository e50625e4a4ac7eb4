//! Groups and their region-binding state machine.
//!
//! ```text
//!            focus()                     host activates another region
//! Detached ──────────► Focused ◄────────────────────────────────► Blurred
//!    ▲                    │                     focus()               │
//!    └────────────────────┴─── detach() / try_detach() / lost ────────┘
//! ```
//!
//! A group owns its pages and, while materialized, one [`RegionHandle`].
//! Every request that addresses the region re-derives the index from a fresh
//! host snapshot first, and is skipped while that snapshot is ahead of the
//! layout batches the group has observed.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::host::{Host, HostError};
use crate::notify::{Change, Notifier};
use crate::page::Page;
use crate::region::{LayoutChange, LayoutSnapshot, RegionEvent, RegionHandle, RegionIndex};


/// Binding state of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupState {
	/// No region bound.
	#[default]
	Detached,
	/// Bound and active.
	Focused,
	/// Bound, but another region is active.
	Blurred,
}

/// Host requests issued after a group materializes a new region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOptions {
	pub maximize: bool,
	pub lock: bool,
}

impl Default for FocusOptions {
	fn default() -> Self {
		Self {
			maximize: true,
			lock: true,
		}
	}
}

/// Result of [`Group::focus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
	/// The group has no pages; nothing was requested.
	Empty,
	/// The group was already focused on a live region.
	AlreadyFocused,
	/// An existing bound region was activated.
	Activated,
	/// A new region was created and populated.
	Materialized,
	/// The host never produced an active region to bind.
	Unavailable,
	/// Layout batches are pending for the bound region; nothing was requested.
	Stale,
}

impl FocusOutcome {
	/// Returns `true` if the group ends up focused.
	pub fn is_focused(self) -> bool {
		matches!(self, Self::AlreadyFocused | Self::Activated | Self::Materialized)
	}

	/// Returns `true` if this call moved the group into `Focused`.
	pub fn transitioned(self) -> bool {
		matches!(self, Self::Activated | Self::Materialized)
	}
}

/// What a layout batch meant for a bound group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Observation {
	Unchanged,
	Focused,
	Blurred,
	/// The bound region closed; the group is now detached.
	Lost,
}

/// A named, ordered collection of pages, optionally bound to a region.
#[derive(Debug)]
pub struct Group {
	name: String,
	pages: Vec<Page>,
	region: Option<RegionHandle>,
	state: GroupState,
	notifier: Notifier,
}

impl Group {
	pub(crate) fn new(name: String, notifier: Notifier) -> Self {
		Self {
			name,
			pages: Vec::new(),
			region: None,
			state: GroupState::Detached,
			notifier,
		}
	}

	/// Rebuilds a detached group from persisted pages, dropping duplicate paths.
	pub(crate) fn restored(name: String, notifier: Notifier, pages: Vec<Page>) -> Self {
		let mut group = Self::new(name, notifier);
		for page in pages {
			if !group.contains(page.path()) {
				group.pages.push(page);
			}
		}
		group
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Pages in open order.
	pub fn pages(&self) -> &[Page] {
		&self.pages
	}

	pub fn state(&self) -> GroupState {
		self.state
	}

	pub fn is_focused(&self) -> bool {
		self.state == GroupState::Focused
	}

	/// The bound region handle, if materialized.
	pub fn region(&self) -> Option<&RegionHandle> {
		self.region.as_ref()
	}

	/// Index of the bound region in `snapshot`, if it is still live.
	pub fn bound_index(&self, snapshot: &LayoutSnapshot) -> Option<RegionIndex> {
		self.region.as_ref().and_then(|r| r.current_index(snapshot))
	}

	pub fn contains(&self, path: &Path) -> bool {
		self.pages.iter().any(|p| p.path() == path)
	}

	/// Appends `page` unless a page with the same path exists.
	pub fn add_page(&mut self, mut page: Page) -> bool {
		if self.contains(page.path()) {
			return false;
		}
		page.set_group(&self.name);
		self.pages.push(page);
		self.changed();
		true
	}

	/// Removes the page at `path`, if present.
	pub fn remove_page(&mut self, path: &Path) -> bool {
		let Some(pos) = self.pages.iter().position(|p| p.path() == path) else {
			return false;
		};
		self.pages.remove(pos);
		self.changed();
		true
	}

	pub fn clear_pages(&mut self) {
		self.pages.clear();
		self.changed();
	}

	/// Clears the pages and appends `pages`, skipping duplicate paths.
	pub fn replace_pages(&mut self, pages: impl IntoIterator<Item = Page>) {
		self.clear_pages();
		for page in pages {
			self.add_page(page);
		}
	}

	/// Brings the group on screen.
	///
	/// A live bound region is activated in place. Otherwise a new region is
	/// created, every page is opened into it in order, a fresh handle is bound
	/// to the resulting active region, and the region is maximized and locked
	/// as `options` ask. A group without pages issues no requests.
	pub fn focus(&mut self, host: &mut dyn Host, options: FocusOptions) -> FocusOutcome {
		if self.pages.is_empty() {
			debug!(group = %self.name, "group.focus.empty");
			return FocusOutcome::Empty;
		}

		let snapshot = host.snapshot();
		if let Some(region) = &self.region
			&& !region.is_closed()
			&& !region.is_current(&snapshot)
		{
			warn!(
				group = %self.name,
				observed = region.observed_revision(),
				revision = snapshot.revision(),
				"group.focus.stale_layout"
			);
			return FocusOutcome::Stale;
		}
		if let Some(index) = self.bound_index(&snapshot) {
			if self.is_focused() {
				return FocusOutcome::AlreadyFocused;
			}
			report(host.activate_region(index), "activate_region", &self.name);
			self.set_state(GroupState::Focused);
			debug!(group = %self.name, index = index.0, "group.focus.activate");
			return FocusOutcome::Activated;
		}

		if self.region.take().is_some() {
			debug!(group = %self.name, "group.focus.stale_region");
		}
		self.materialize(host, options)
	}

	fn materialize(&mut self, host: &mut dyn Host, options: FocusOptions) -> FocusOutcome {
		report(host.create_region(), "create_region", &self.name);

		for page in &self.pages {
			let Some(target) = host.snapshot().active() else {
				warn!(group = %self.name, "group.focus.no_active_region");
				break;
			};
			report(host.open_document(target, page.path()), "open_document", &self.name);
		}

		let handle = match RegionHandle::bind(&host.snapshot(), None) {
			Ok(handle) => handle,
			Err(error) => {
				warn!(group = %self.name, %error, "group.focus.unbound");
				self.detach();
				return FocusOutcome::Unavailable;
			}
		};

		if options.maximize
			&& let Some(index) = handle.current_index(&host.snapshot())
		{
			report(host.maximize_region(index), "maximize_region", &self.name);
		}
		if options.lock
			&& let Some(index) = handle.current_index(&host.snapshot())
		{
			report(host.lock_region(index), "lock_region", &self.name);
		}

		debug!(
			group = %self.name,
			index = handle.tracked_index().0,
			pages = self.pages.len(),
			"group.focus.materialize"
		);
		self.region = Some(handle);
		self.set_state(GroupState::Focused);
		FocusOutcome::Materialized
	}

	/// Focused → Blurred. No-op in any other state.
	pub fn blur(&mut self) -> bool {
		if !self.is_focused() {
			return false;
		}
		self.set_state(GroupState::Blurred);
		true
	}

	/// Drops the bound region without closing it.
	pub fn detach(&mut self) {
		self.region = None;
		self.state = GroupState::Detached;
		self.changed();
	}

	/// Detaches if the bound region is gone or has no documents left.
	///
	/// Does nothing while layout batches are pending for the region.
	pub fn try_detach(&mut self, host: &dyn Host) -> bool {
		let Some(region) = &self.region else {
			return false;
		};
		let snapshot = host.snapshot();
		if !region.is_closed() && !region.is_current(&snapshot) {
			trace!(group = %self.name, "group.detach.pending_layout");
			return false;
		}
		if region.tab_count(&snapshot).unwrap_or(0) > 0 {
			return false;
		}
		debug!(group = %self.name, "group.detach.empty_region");
		self.detach();
		true
	}

	/// Asks the host to close the bound region and its documents.
	///
	/// State is left untouched; the resulting layout batch reconciles it.
	pub fn close(&mut self, host: &mut dyn Host) -> bool {
		let Some(index) = self.bound_index(&host.snapshot()) else {
			return false;
		};
		report(host.close_region(index), "close_region", &self.name);
		true
	}

	/// Moves the bound region into a new window and detaches.
	pub fn pop_out(&mut self, host: &mut dyn Host) -> bool {
		let Some(index) = self.bound_index(&host.snapshot()) else {
			return false;
		};
		report(host.move_region_to_window(index), "move_region_to_window", &self.name);
		self.detach();
		true
	}

	pub(crate) fn rename(&mut self, name: &str) {
		self.name = name.to_owned();
		for page in &mut self.pages {
			page.set_group(name);
		}
		self.changed();
	}

	/// Folds a host layout batch into the bound region.
	pub(crate) fn observe(&mut self, change: &LayoutChange) -> Observation {
		let Some(region) = self.region.as_mut() else {
			return Observation::Unchanged;
		};
		let event = region.apply(change);
		if region.is_closed() {
			debug!(group = %self.name, revision = change.revision, "group.region_lost");
			self.detach();
			return Observation::Lost;
		}
		match event {
			Some(RegionEvent::Focused) if self.pages.is_empty() => {
				debug!(group = %self.name, "group.focus.empty");
				Observation::Unchanged
			}
			Some(RegionEvent::Focused) => {
				self.set_state(GroupState::Focused);
				Observation::Focused
			}
			Some(RegionEvent::Blurred) => {
				self.blur();
				Observation::Blurred
			}
			None => Observation::Unchanged,
		}
	}

	fn set_state(&mut self, state: GroupState) {
		if self.state != state {
			self.state = state;
			self.changed();
		}
	}

	fn changed(&self) {
		self.notifier.notify(Change::Group(self.name.clone()));
	}
}

fn report(result: Result<(), HostError>, request: &'static str, group: &str) {
	if let Err(error) = result {
		warn!(group, request, %error, "host request failed");
	}
}
