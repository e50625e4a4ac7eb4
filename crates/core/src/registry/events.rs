//! Host event reconciliation.
//!
//! Event handlers never fail. Anything that no longer lines up with the
//! layout (a closed region, an emptied region) detaches the affected group.

use tracing::{debug, trace};

use super::Registry;
use crate::group::Observation;
use crate::host::{Host, HostEvent};
use crate::region::{LayoutChange, RegionIndex};

impl Registry {
	/// Drains and handles every event the host has queued.
	///
	/// Layout batches are applied first, in order, so bindings are current
	/// before any emptied region is looked for. Content and activation
	/// events then trigger one emptiness check over every bound group, since
	/// the indices they carry may predate the batches just applied.
	pub fn pump(&mut self, host: &mut dyn Host) {
		loop {
			let events = host.poll_events();
			if events.is_empty() {
				break;
			}
			let mut check_empty = false;
			for event in events {
				match event {
					HostEvent::LayoutChanged(change) => self.apply_layout_change(&change),
					HostEvent::ActiveRegionChanged(Some(index)) => {
						trace!(index = index.0, "host.active_region");
					}
					HostEvent::ActiveRegionChanged(None) | HostEvent::RegionContentsChanged(_) => {
						check_empty = true;
					}
				}
			}
			if check_empty {
				self.detach_emptied(None, host);
			}
		}
	}

	/// Reconciles groups with one host event.
	pub fn handle_event(&mut self, event: HostEvent, host: &dyn Host) {
		match event {
			HostEvent::LayoutChanged(change) => self.apply_layout_change(&change),
			HostEvent::ActiveRegionChanged(None) => self.detach_emptied(None, host),
			HostEvent::ActiveRegionChanged(Some(index)) => {
				trace!(index = index.0, "host.active_region");
			}
			HostEvent::RegionContentsChanged(index) => self.detach_emptied(Some(index), host),
		}
	}

	fn apply_layout_change(&mut self, change: &LayoutChange) {
		let mut focused = Vec::new();
		let mut lost = Vec::new();
		for (name, group) in &mut self.groups {
			match group.observe(change) {
				Observation::Focused => focused.push(name.clone()),
				Observation::Lost => lost.push(name.clone()),
				Observation::Blurred | Observation::Unchanged => {}
			}
		}
		for name in &lost {
			self.recent.shift_remove(name);
		}
		for name in &focused {
			self.set_latest_group(name);
		}
		if !lost.is_empty() || !focused.is_empty() {
			debug!(revision = change.revision, ?focused, ?lost, "layout.reconcile");
		}
	}

	/// Runs `try_detach` on groups bound to `region`, or on every bound group.
	fn detach_emptied(&mut self, region: Option<RegionIndex>, host: &dyn Host) {
		let snapshot = host.snapshot();
		let mut detached = Vec::new();
		for (name, group) in &mut self.groups {
			if group.region().is_none() {
				continue;
			}
			if let Some(region) = region
				&& group.bound_index(&snapshot) != Some(region)
			{
				continue;
			}
			if group.try_detach(host) {
				detached.push(name.clone());
			}
		}
		for name in &detached {
			self.recent.shift_remove(name);
		}
	}
}
