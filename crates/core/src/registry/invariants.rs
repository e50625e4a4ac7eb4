use std::path::{Path, PathBuf};

use crate::group::GroupState;
use crate::host::{Host, HostEvent, HostRequest, MemoryHost};
use crate::notify::Notifier;
use crate::page::WorkspaceRoots;
use crate::region::{LayoutChange, RegionIndex};
use crate::registry::Registry;

fn registry_with(groups: &[(&str, &[&str])]) -> Registry {
	let mut reg = Registry::new(WorkspaceRoots::single("/ws"), Notifier::detached());
	for (name, pages) in groups {
		reg.create_group(name).unwrap();
		for page in *pages {
			reg.add_page(name, *page).unwrap();
		}
	}
	reg
}

/// Must re-derive the region index from the latest layout before addressing it.
///
/// * Enforced in: `RegionHandle::current_index`, `Group::bound_index`,
///   `Group::close`, `Group::focus`
/// * Failure symptom: Closing a group closes an unrelated region after another
///   region opened to its left.
#[cfg_attr(test, test)]
pub(crate) fn test_region_index_follows_inserts() {
	let mut host = MemoryHost::with_regions(3);
	let mut reg = registry_with(&[("Docs", &["/ws/a.md"])]);
	reg.focus_group("Docs", &mut host).unwrap();
	assert_eq!(reg.group("Docs").unwrap().region().unwrap().tracked_index(), RegionIndex(1));

	host.user_open_region(1);
	reg.pump(&mut host);

	host.take_requests();
	reg.close_group("Docs", &mut host).unwrap();
	assert_eq!(host.requests()[0], HostRequest::CloseRegion(RegionIndex(2)));
}

/// Must ignore layout batches already reflected in the snapshot a handle was bound against.
///
/// * Enforced in: `RegionHandle::apply`
/// * Failure symptom: A freshly materialized group shifts past its own region
///   when the creation batch is delivered.
#[cfg_attr(test, test)]
pub(crate) fn test_own_creation_batch_does_not_shift() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("Docs", &["/ws/a.md"])]);
	reg.focus_group("Docs", &mut host).unwrap();

	let group = reg.group("Docs").unwrap();
	assert_eq!(group.bound_index(&host.snapshot()), Some(RegionIndex(1)));
	assert!(group.is_focused());
}

/// Must not materialize a region for a group without pages.
///
/// * Enforced in: `Group::focus`, `Registry::focus_group`
/// * Failure symptom: An empty, maximized, locked region appears.
#[cfg_attr(test, test)]
pub(crate) fn test_empty_group_never_materializes() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("Empty", &[])]);
	reg.focus_group("Empty", &mut host).unwrap();
	assert!(host.requests().is_empty());
	assert_eq!(host.region_count(), 1);
	assert_eq!(reg.group("Empty").unwrap().state(), GroupState::Detached);
}

/// Must keep at most one group focused.
///
/// * Enforced in: `Registry::blur_all_groups`, `Registry::focus_group`
/// * Failure symptom: Two groups render as active in the tree.
#[cfg_attr(test, test)]
pub(crate) fn test_single_focused_group() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("A", &["/ws/a.md"]), ("B", &["/ws/b.md"]), ("C", &["/ws/c.md"])]);
	for name in ["A", "B", "C", "A", "C"] {
		reg.focus_group(name, &mut host).unwrap();
		assert_eq!(reg.groups().filter(|g| g.is_focused()).count(), 1);
	}
}

/// Must only hold recency entries for groups that exist.
///
/// * Enforced in: `Registry::delete_group`, `Registry::rename_group`
/// * Failure symptom: Refocus after close targets a deleted group.
#[cfg_attr(test, test)]
pub(crate) fn test_recency_tracks_registry() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("A", &["/ws/a.md"]), ("B", &["/ws/b.md"])]);
	reg.focus_group("A", &mut host).unwrap();
	reg.focus_group("B", &mut host).unwrap();
	reg.rename_group("A", "Z").unwrap();
	reg.delete_group("B");
	assert_eq!(reg.recent().collect::<Vec<_>>(), ["Z"]);
}

/// Must detach, never fail, when an event references a region that no longer exists.
///
/// * Enforced in: `Registry::handle_event`, `Registry::pump`, `Group::observe`,
///   `Group::try_detach`
/// * Failure symptom: A stale binding keeps a group `Focused` on a closed region.
#[cfg_attr(test, test)]
pub(crate) fn test_stale_events_detach() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("Docs", &["/ws/a.md"])]);
	reg.focus_group("Docs", &mut host).unwrap();

	host.user_close_region(1);
	reg.handle_event(HostEvent::RegionContentsChanged(RegionIndex(7)), &host);
	reg.handle_event(HostEvent::ActiveRegionChanged(None), &host);
	reg.pump(&mut host);
	assert_eq!(reg.group("Docs").unwrap().state(), GroupState::Detached);

	reg.handle_event(HostEvent::LayoutChanged(LayoutChange::new(99).closed(4)), &host);
	reg.handle_event(HostEvent::ActiveRegionChanged(None), &host);
	assert_eq!(reg.group("Docs").unwrap().state(), GroupState::Detached);
}

/// Must apply queued layout batches before addressing a bound region.
///
/// * Enforced in: `RegionHandle::is_current`, `Registry::focus_group`,
///   `Registry::close_group`, `Registry::try_focus_latest_group`
/// * Failure symptom: Focusing a group activates an empty region that opened
///   to its left, and the group reports `Focused` on the wrong region.
#[cfg_attr(test, test)]
pub(crate) fn test_queued_layout_applied_before_addressing() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("Docs", &["/ws/a.md"]), ("Refs", &["/ws/r.md"])]);
	reg.focus_group("Docs", &mut host).unwrap();
	reg.focus_group("Refs", &mut host).unwrap();

	host.user_open_region(0);
	host.take_requests();
	reg.focus_group("Docs", &mut host).unwrap();

	assert_eq!(host.requests(), &[HostRequest::ActivateRegion(RegionIndex(2))]);
	assert_eq!(host.active_region(), Some(RegionIndex(2)));
	assert_eq!(host.region_paths(2), [PathBuf::from("/ws/a.md")]);
	let docs = reg.group("Docs").unwrap();
	assert!(docs.is_focused());
	assert_eq!(docs.bound_index(&host.snapshot()), Some(RegionIndex(2)));

	host.user_open_region(0);
	host.take_requests();
	reg.close_group("Refs", &mut host).unwrap();
	assert_eq!(host.requests()[0], HostRequest::CloseRegion(RegionIndex(4)));
	assert_eq!(host.region_paths(3), [PathBuf::from("/ws/a.md")]);
}

/// Must never move a group without pages into `Focused`.
///
/// * Enforced in: `Group::focus`, `Group::observe`, `Registry::focus_group`
/// * Failure symptom: Clicking into the region of a group whose pages were all
///   removed marks the empty group as the focused one.
#[cfg_attr(test, test)]
pub(crate) fn test_pageless_group_never_focuses() {
	let mut host = MemoryHost::new();
	let mut reg = registry_with(&[("Docs", &["/ws/a.md"])]);
	reg.focus_group("Docs", &mut host).unwrap();
	reg.remove_page("Docs", Path::new("/ws/a.md")).unwrap();

	host.user_activate(0);
	reg.pump(&mut host);
	assert_eq!(reg.group("Docs").unwrap().state(), GroupState::Blurred);

	host.user_activate(1);
	reg.pump(&mut host);
	let docs = reg.group("Docs").unwrap();
	assert_eq!(docs.pages().len(), 0);
	assert_eq!(docs.state(), GroupState::Blurred);
}
