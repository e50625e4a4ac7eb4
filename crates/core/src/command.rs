//! User commands and the session that executes them.
//!
//! A [`Session`] ties a [`Registry`] to a [`Host`] and a [`GroupStore`].
//! Commands that change what the user sees in the tree are persisted before
//! [`Session::execute`] returns; focus commands are not, since region
//! bindings never reach the store.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{GroupError, Result};
use crate::group::FocusOutcome;
use crate::host::{Host, HostEvent};
use crate::registry::Registry;
use crate::store::GroupStore;

/// A user-issued command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	CreateGroup { name: String, pages: Vec<PathBuf> },
	/// Creates a group from the active region's non-preview documents.
	CreateGroupFromActive { name: String },
	RenameGroup { from: String, to: String },
	DeleteGroup { name: String },
	FocusGroup { name: String },
	CloseGroup { name: String },
	DetachGroup { name: String },
	PopOutGroup { name: String },
	/// Replaces a group's pages with the active region's documents.
	UpdateGroup { name: String },
	AddPage { group: String, path: PathBuf },
	RemovePage { group: String, path: PathBuf },
	Refresh { group: Option<String> },
}

impl Command {
	/// Returns `true` if the command can change persisted state.
	pub fn is_structural(&self) -> bool {
		matches!(
			self,
			Self::CreateGroup { .. }
				| Self::CreateGroupFromActive { .. }
				| Self::RenameGroup { .. }
				| Self::DeleteGroup { .. }
				| Self::UpdateGroup { .. }
				| Self::AddPage { .. }
				| Self::RemovePage { .. }
		)
	}
}

/// What a command did, for the message channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Done,
	/// A focus request ended without a focused group.
	NotFocused(FocusOutcome),
	/// A close handed focus to another group.
	Refocused(Option<String>),
	/// Nothing changed (duplicate page, missing page, unbound group).
	Unchanged,
}

/// A registry bound to a host and a store.
pub struct Session<H, S> {
	registry: Registry,
	host: H,
	store: S,
}

impl<H: Host, S: GroupStore> Session<H, S> {
	/// Loads the stored groups into `registry` and wraps everything up.
	pub fn open(mut registry: Registry, host: H, mut store: S) -> Result<Self> {
		let snapshot = store.load()?;
		info!(groups = snapshot.len(), "session.open");
		registry.restore(snapshot);
		Ok(Self { registry, host, store })
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	/// Handles every event the host has queued.
	pub fn pump(&mut self) {
		self.registry.pump(&mut self.host);
	}

	/// Handles one event pushed by the host.
	pub fn handle_event(&mut self, event: HostEvent) {
		self.registry.handle_event(event, &self.host);
	}

	/// Refocuses the most recent group still on screen.
	pub fn focus_latest(&mut self) -> Option<String> {
		self.registry.try_focus_latest_group(&mut self.host)
	}

	/// Runs one command, persisting structural changes.
	pub fn execute(&mut self, command: Command) -> Result<Outcome> {
		debug!(?command, "session.execute");
		let structural = command.is_structural();
		let outcome = self.dispatch(command)?;
		if structural && outcome != Outcome::Unchanged {
			self.persist()?;
		}
		Ok(outcome)
	}

	fn dispatch(&mut self, command: Command) -> Result<Outcome> {
		let registry = &mut self.registry;
		let host = &mut self.host;
		let outcome = match command {
			Command::CreateGroup { name, pages } => {
				registry.create_group(&name)?;
				for path in pages {
					registry.add_page(&name, path)?;
				}
				Outcome::Done
			}
			Command::CreateGroupFromActive { name } => {
				registry.create_group_from_active(&name, host)?;
				Outcome::Done
			}
			Command::RenameGroup { from, to } => {
				registry.rename_group(&from, &to)?;
				Outcome::Done
			}
			Command::DeleteGroup { name } => match registry.delete_group(&name) {
				Some(_) => Outcome::Done,
				None => Outcome::Unchanged,
			},
			Command::FocusGroup { name } => match registry.focus_group(&name, host)? {
				outcome if outcome.is_focused() => Outcome::Done,
				outcome => Outcome::NotFocused(outcome),
			},
			Command::CloseGroup { name } => Outcome::Refocused(registry.close_group(&name, host)?),
			Command::DetachGroup { name } => {
				registry.detach_group(&name)?;
				Outcome::Done
			}
			Command::PopOutGroup { name } => match registry.pop_out_group(&name, host)? {
				true => Outcome::Done,
				false => Outcome::Unchanged,
			},
			Command::UpdateGroup { name } => {
				registry.update_group_from_active(&name, host)?;
				Outcome::Done
			}
			Command::AddPage { group, path } => match registry.add_page(&group, path)? {
				true => Outcome::Done,
				false => Outcome::Unchanged,
			},
			Command::RemovePage { group, path } => match registry.remove_page(&group, &path)? {
				true => Outcome::Done,
				false => Outcome::Unchanged,
			},
			Command::Refresh { group } => {
				if let Some(name) = &group
					&& registry.group(name).is_none()
				{
					return Err(GroupError::NotFound(name.clone()));
				}
				registry.refresh(group.as_deref());
				Outcome::Done
			}
		};
		Ok(outcome)
	}

	fn persist(&mut self) -> Result<()> {
		let snapshot = self.registry.snapshot();
		self.store.save(&snapshot)?;
		debug!(groups = snapshot.len(), "session.persist");
		Ok(())
	}
}
