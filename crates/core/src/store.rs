//! Persistence boundary for group definitions.
//!
//! Only names and ordered page paths are persisted. Region bindings are
//! session-local and never written.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Persisted form of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
	pub name: String,
	pub pages: Vec<PathBuf>,
}

/// Persisted form of the whole registry, keyed by group name in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupsSnapshot {
	pub groups: IndexMap<String, GroupRecord>,
}

impl GroupsSnapshot {
	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}
}

/// Errors raised by a [`GroupStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// Reading or writing the backing file failed.
	#[error("I/O error on {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},
	/// The stored data could not be decoded or encoded.
	#[error("malformed group data in {path}: {message}")]
	Malformed { path: PathBuf, message: String },
}

/// Durable storage for [`GroupsSnapshot`]s.
pub trait GroupStore {
	/// Loads the stored groups; an absent store loads as empty.
	fn load(&mut self) -> Result<GroupsSnapshot, StoreError>;

	/// Durably replaces the stored groups.
	fn save(&mut self, snapshot: &GroupsSnapshot) -> Result<(), StoreError>;
}

/// A store that keeps the last saved snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
	saved: Option<GroupsSnapshot>,
	saves: usize,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store pre-populated with `snapshot`.
	pub fn with_snapshot(snapshot: GroupsSnapshot) -> Self {
		Self {
			saved: Some(snapshot),
			saves: 0,
		}
	}

	pub fn saved(&self) -> Option<&GroupsSnapshot> {
		self.saved.as_ref()
	}

	/// Number of successful saves.
	pub fn save_count(&self) -> usize {
		self.saves
	}
}

impl GroupStore for MemoryStore {
	fn load(&mut self) -> Result<GroupsSnapshot, StoreError> {
		Ok(self.saved.clone().unwrap_or_default())
	}

	fn save(&mut self, snapshot: &GroupsSnapshot) -> Result<(), StoreError> {
		self.saved = Some(snapshot.clone());
		self.saves += 1;
		Ok(())
	}
}
