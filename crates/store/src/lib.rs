#![cfg_attr(test, allow(unused_crate_dependencies))]
//! JSON file storage for groups.
//!
//! The file holds one object keyed by group name, in display order:
//!
//! ```json
//! {
//!   "Docs": { "name": "Docs", "pages": ["/ws/a.md", "/ws/b.md"] }
//! }
//! ```
//!
//! Saves go through a sibling temp file and a rename, so a crash mid-save
//! leaves the previous contents in place.

use std::io;
use std::path::{Path, PathBuf};

use grouper_core::{GroupStore, GroupsSnapshot, StoreError};
use tracing::{debug, warn};

/// A [`GroupStore`] backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn temp_path(&self) -> PathBuf {
		self.path.with_extension("json.tmp")
	}

	fn io_error(&self, error: io::Error) -> StoreError {
		StoreError::Io {
			path: self.path.clone(),
			error,
		}
	}

	fn malformed(&self, error: serde_json::Error) -> StoreError {
		StoreError::Malformed {
			path: self.path.clone(),
			message: error.to_string(),
		}
	}
}

impl GroupStore for JsonFileStore {
	fn load(&mut self) -> Result<GroupsSnapshot, StoreError> {
		let contents = match std::fs::read_to_string(&self.path) {
			Ok(contents) => contents,
			Err(error) if error.kind() == io::ErrorKind::NotFound => {
				debug!(path = %self.path.display(), "store.load.missing");
				return Ok(GroupsSnapshot::default());
			}
			Err(error) => return Err(self.io_error(error)),
		};
		if contents.trim().is_empty() {
			return Ok(GroupsSnapshot::default());
		}
		let snapshot: GroupsSnapshot = serde_json::from_str(&contents).map_err(|e| self.malformed(e))?;
		debug!(path = %self.path.display(), groups = snapshot.len(), "store.load");
		Ok(snapshot)
	}

	fn save(&mut self, snapshot: &GroupsSnapshot) -> Result<(), StoreError> {
		let json = serde_json::to_string_pretty(snapshot).map_err(|e| self.malformed(e))?;

		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
		}

		let temp = self.temp_path();
		std::fs::write(&temp, json).map_err(|e| self.io_error(e))?;
		if let Err(error) = std::fs::rename(&temp, &self.path) {
			if let Err(cleanup) = std::fs::remove_file(&temp) {
				warn!(path = %temp.display(), error = %cleanup, "store.save.cleanup");
			}
			return Err(self.io_error(error));
		}
		debug!(path = %self.path.display(), groups = snapshot.len(), "store.save");
		Ok(())
	}
}
