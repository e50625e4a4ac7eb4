//! The group registry.
//!
//! [`Registry`] owns every [`Group`], keeps names unique, and remembers the
//! order in which groups were focused so a closed group can hand attention
//! back to whichever group held it before.
//!
//! # Modules
//!
//! - `events` - host event reconciliation (`handle_event`, `pump`)
//! - `invariants` - invariant catalog (tests only)

mod events;

#[cfg(test)]
mod invariants;

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{GroupError, Result};
use crate::group::{FocusOptions, FocusOutcome, Group};
use crate::host::Host;
use crate::notify::{Change, Notifier};
use crate::page::{Page, WorkspaceRoots};
use crate::store::{GroupRecord, GroupsSnapshot};

/// Which group regains focus after a group is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefocusPolicy {
	/// The most recently focused group that is still on screen.
	#[default]
	Recent,
	/// The next group in list order that is still on screen.
	List,
}

/// One node of the tree projection handed to the view layer.
#[derive(Debug, Clone, Copy)]
pub enum TreeItem<'a> {
	Group(&'a Group),
	Page(&'a Page),
}

/// Owns all groups and the focus recency stack.
#[derive(Debug)]
pub struct Registry {
	/// Groups by name, in display order.
	groups: IndexMap<String, Group>,
	/// Focus history, most recent last.
	recent: IndexSet<String>,
	roots: WorkspaceRoots,
	focus: FocusOptions,
	refocus: RefocusPolicy,
	notifier: Notifier,
}

impl Registry {
	/// Creates an empty registry naming pages against `roots`.
	pub fn new(roots: WorkspaceRoots, notifier: Notifier) -> Self {
		Self {
			groups: IndexMap::new(),
			recent: IndexSet::new(),
			roots,
			focus: FocusOptions::default(),
			refocus: RefocusPolicy::default(),
			notifier,
		}
	}

	pub fn with_focus_options(mut self, focus: FocusOptions) -> Self {
		self.focus = focus;
		self
	}

	pub fn with_refocus_policy(mut self, refocus: RefocusPolicy) -> Self {
		self.refocus = refocus;
		self
	}

	pub fn roots(&self) -> &WorkspaceRoots {
		&self.roots
	}

	pub fn focus_options(&self) -> FocusOptions {
		self.focus
	}

	pub fn refocus_policy(&self) -> RefocusPolicy {
		self.refocus
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	/// Groups in display order.
	pub fn groups(&self) -> impl Iterator<Item = &Group> {
		self.groups.values()
	}

	pub fn group(&self, name: &str) -> Option<&Group> {
		self.groups.get(name)
	}

	/// Tree projection: top-level groups for `None`, a group's pages otherwise.
	pub fn children(&self, parent: Option<&str>) -> Vec<TreeItem<'_>> {
		match parent {
			None => self.groups.values().map(TreeItem::Group).collect(),
			Some(name) => self
				.groups
				.get(name)
				.map(|g| g.pages().iter().map(TreeItem::Page).collect())
				.unwrap_or_default(),
		}
	}

	/// Focus history, oldest first.
	pub fn recent(&self) -> impl Iterator<Item = &str> {
		self.recent.iter().map(String::as_str)
	}

	/// The most recently focused group.
	pub fn latest(&self) -> Option<&str> {
		self.recent.last().map(String::as_str)
	}

	/// The group currently in the `Focused` state.
	pub fn focused(&self) -> Option<&Group> {
		self.groups.values().find(|g| g.is_focused())
	}

	/// Creates an empty, detached group.
	pub fn create_group(&mut self, name: &str) -> Result<&mut Group> {
		if self.groups.contains_key(name) {
			return Err(GroupError::NameConflict(name.to_owned()));
		}
		debug!(group = name, "group.create");
		let group = Group::new(name.to_owned(), self.notifier.clone());
		self.notifier.notify(Change::Tree);
		Ok(self.groups.entry(name.to_owned()).or_insert(group))
	}

	/// Creates a group holding the active region's non-preview documents.
	pub fn create_group_from_active(&mut self, name: &str, host: &dyn Host) -> Result<&mut Group> {
		let pages = self.active_pages(name, host);
		let group = self.create_group(name)?;
		for page in pages {
			group.add_page(page);
		}
		Ok(group)
	}

	/// Removes a group without touching its physical region.
	pub fn delete_group(&mut self, name: &str) -> Option<Group> {
		let group = self.groups.shift_remove(name)?;
		self.recent.shift_remove(name);
		debug!(group = name, "group.delete");
		self.notifier.notify(Change::Tree);
		Some(group)
	}

	/// Renames a group in place, keeping its list and recency positions.
	pub fn rename_group(&mut self, old: &str, new: &str) -> Result<()> {
		if old != new && self.groups.contains_key(new) {
			return Err(GroupError::NameConflict(new.to_owned()));
		}
		let index = self
			.groups
			.get_index_of(old)
			.ok_or_else(|| GroupError::NotFound(old.to_owned()))?;
		if old == new {
			return Ok(());
		}

		let Some((_, mut group)) = self.groups.shift_remove_index(index) else {
			return Err(GroupError::NotFound(old.to_owned()));
		};
		group.rename(new);
		self.groups.shift_insert(index, new.to_owned(), group);

		if let Some(pos) = self.recent.get_index_of(old) {
			self.recent.shift_remove_index(pos);
			self.recent.shift_insert(pos, new.to_owned());
		}

		debug!(from = old, to = new, "group.rename");
		self.notifier.notify(Change::Tree);
		Ok(())
	}

	/// Adds `path` to `group`. Returns `false` if it was already present.
	pub fn add_page(&mut self, group: &str, path: impl Into<PathBuf>) -> Result<bool> {
		let page = Page::new(group, path, &self.roots);
		Ok(self.group_mut(group)?.add_page(page))
	}

	/// Removes `path` from `group`. Returns `false` if it was absent.
	pub fn remove_page(&mut self, group: &str, path: &Path) -> Result<bool> {
		Ok(self.group_mut(group)?.remove_page(path))
	}

	/// Replaces the pages of `group` with the active region's documents.
	pub fn update_group_from_active(&mut self, group: &str, host: &dyn Host) -> Result<()> {
		let pages = self.active_pages(group, host);
		self.group_mut(group)?.replace_pages(pages);
		Ok(())
	}

	/// Blurs every group not bound to the same region as `except`.
	///
	/// With no exception, or an exception that has no live region, every
	/// other group is blurred. Bindings are compared against the current
	/// snapshot, so queued host events should be pumped first.
	pub fn blur_all_groups(&mut self, except: Option<&str>, host: &dyn Host) {
		let snapshot = host.snapshot();
		let keep = except
			.and_then(|name| self.groups.get(name))
			.and_then(|g| g.bound_index(&snapshot));

		for (name, group) in &mut self.groups {
			if except == Some(name.as_str()) {
				continue;
			}
			let shares_region = keep.is_some() && group.bound_index(&snapshot) == keep;
			if !shares_region {
				group.blur();
			}
		}
	}

	/// Moves `name` to the top of the recency stack.
	pub fn set_latest_group(&mut self, name: &str) {
		self.recent.shift_remove(name);
		self.recent.insert(name.to_owned());
	}

	/// Focuses the most recent group that still has a live region.
	///
	/// Entries for groups that are gone, detached, or whose region closed are
	/// discarded on the way down.
	pub fn try_focus_latest_group(&mut self, host: &mut dyn Host) -> Option<String> {
		self.pump(host);
		while let Some(name) = self.recent.pop() {
			let snapshot = host.snapshot();
			let live = self
				.groups
				.get(&name)
				.is_some_and(|g| g.bound_index(&snapshot).is_some());
			if !live {
				trace!(group = %name, "recent.discard");
				continue;
			}
			if matches!(self.focus_group(&name, host), Ok(outcome) if outcome.is_focused()) {
				return Some(name);
			}
		}
		None
	}

	/// Blurs the other groups, then focuses `name`.
	pub fn focus_group(&mut self, name: &str, host: &mut dyn Host) -> Result<FocusOutcome> {
		if self.group_mut(name)?.pages().is_empty() {
			debug!(group = name, "group.focus.empty");
			return Ok(FocusOutcome::Empty);
		}
		self.pump(host);

		self.blur_all_groups(Some(name), host);
		let focus = self.focus;
		let outcome = self.group_mut(name)?.focus(host, focus);
		if outcome.is_focused() {
			self.set_latest_group(name);
		}
		self.pump(host);
		Ok(outcome)
	}

	/// Closes the group's region and hands focus to the next group.
	///
	/// Returns the name of the group that was refocused, if any.
	pub fn close_group(&mut self, name: &str, host: &mut dyn Host) -> Result<Option<String>> {
		let position = self
			.groups
			.get_index_of(name)
			.ok_or_else(|| GroupError::NotFound(name.to_owned()))?;
		self.pump(host);
		let closing = self.group_mut(name)?.close(host);
		self.recent.shift_remove(name);
		if !closing {
			return Ok(None);
		}

		// Activation the host hands out while the region closes is not a user
		// focus and must not reorder the stack.
		let stack = self.recent.clone();
		self.pump(host);
		self.recent = stack
			.into_iter()
			.filter(|n| self.groups.contains_key(n))
			.collect();

		let next = match self.refocus {
			RefocusPolicy::Recent => self.try_focus_latest_group(host),
			RefocusPolicy::List => self.try_focus_next_in_list(position, host),
		};
		debug!(group = name, next = ?next, "group.close");
		Ok(next)
	}

	/// Unbinds the group's region without closing it.
	pub fn detach_group(&mut self, name: &str) -> Result<()> {
		self.group_mut(name)?.detach();
		Ok(())
	}

	/// Focuses the group, then moves its region into its own window and
	/// detaches it.
	pub fn pop_out_group(&mut self, name: &str, host: &mut dyn Host) -> Result<bool> {
		if !self.focus_group(name, host)?.is_focused() {
			return Ok(false);
		}
		let moved = self.group_mut(name)?.pop_out(host);
		if moved {
			self.recent.shift_remove(name);
		}
		self.pump(host);
		Ok(moved)
	}

	/// Asks the view layer to re-render one group, or everything.
	pub fn refresh(&self, group: Option<&str>) {
		let change = group.map_or(Change::Tree, |name| Change::Group(name.to_owned()));
		self.notifier.notify(change);
	}

	/// Persistable form of the registry: names and ordered page paths.
	pub fn snapshot(&self) -> GroupsSnapshot {
		GroupsSnapshot {
			groups: self
				.groups
				.values()
				.map(|g| {
					let record = GroupRecord {
						name: g.name().to_owned(),
						pages: g.pages().iter().map(|p| p.path().to_path_buf()).collect(),
					};
					(record.name.clone(), record)
				})
				.collect(),
		}
	}

	/// Replaces every group with the contents of `snapshot`, all detached.
	pub fn restore(&mut self, snapshot: GroupsSnapshot) {
		self.groups.clear();
		self.recent.clear();
		for (key, record) in snapshot.groups {
			if record.name != key {
				warn!(key = %key, name = %record.name, "stored group key differs from its name");
			}
			if self.groups.contains_key(&record.name) {
				warn!(group = %record.name, "skipping duplicate stored group");
				continue;
			}
			let pages = record
				.pages
				.into_iter()
				.map(|path| Page::new(record.name.as_str(), path, &self.roots))
				.collect();
			let group = Group::restored(record.name.clone(), self.notifier.clone(), pages);
			self.groups.insert(record.name, group);
		}
		debug!(groups = self.groups.len(), "registry.restore");
		self.notifier.notify(Change::Tree);
	}

	fn group_mut(&mut self, name: &str) -> Result<&mut Group> {
		self.groups
			.get_mut(name)
			.ok_or_else(|| GroupError::NotFound(name.to_owned()))
	}

	fn try_focus_next_in_list(&mut self, after: usize, host: &mut dyn Host) -> Option<String> {
		let len = self.groups.len();
		for offset in 1..=len {
			let snapshot = host.snapshot();
			let Some((name, group)) = self.groups.get_index((after + offset) % len) else {
				continue;
			};
			if group.bound_index(&snapshot).is_none() {
				continue;
			}
			let name = name.clone();
			if matches!(self.focus_group(&name, host), Ok(outcome) if outcome.is_focused()) {
				return Some(name);
			}
		}
		None
	}

	fn active_pages(&self, group: &str, host: &dyn Host) -> Vec<Page> {
		let Some(active) = host.snapshot().active() else {
			return Vec::new();
		};
		host.tabs(active)
			.into_iter()
			.filter(|tab| !tab.preview)
			.map(|tab| Page::new(group, tab.path, &self.roots))
			.collect()
	}
}
