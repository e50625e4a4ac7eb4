//! Pages and the workspace roots that name them.

use std::path::{Path, PathBuf};

/// A workspace folder that page paths are displayed relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
	/// Label shown in brackets when several roots are open.
	pub name: String,
	pub path: PathBuf,
}

impl WorkspaceRoot {
	pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		Self {
			name: name.into(),
			path: path.into(),
		}
	}
}

/// The set of active workspace roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceRoots {
	roots: Vec<WorkspaceRoot>,
}

impl WorkspaceRoots {
	pub fn new(roots: Vec<WorkspaceRoot>) -> Self {
		Self { roots }
	}

	/// A single unlabeled root.
	pub fn single(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();
		Self::new(vec![WorkspaceRoot { name, path }])
	}

	pub fn roots(&self) -> &[WorkspaceRoot] {
		&self.roots
	}

	/// Derives the display name for `path`.
	///
	/// The name is the path relative to the first root containing it,
	/// prefixed with `[root] ` when more than one root is active. Paths under
	/// no root are shown in full.
	pub fn display_name(&self, path: &Path) -> String {
		for root in &self.roots {
			let Ok(relative) = path.strip_prefix(&root.path) else {
				continue;
			};
			let relative = relative.to_string_lossy();
			return if self.roots.len() > 1 {
				format!("[{}] {relative}", root.name)
			} else {
				relative.into_owned()
			};
		}
		path.to_string_lossy().into_owned()
	}
}

/// One document location inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
	group: String,
	name: String,
	path: PathBuf,
}

impl Page {
	/// Creates a page for `path` owned by `group`, named against `roots`.
	pub fn new(group: impl Into<String>, path: impl Into<PathBuf>, roots: &WorkspaceRoots) -> Self {
		let path = path.into();
		Self {
			group: group.into(),
			name: roots.display_name(&path),
			path,
		}
	}

	/// Name of the owning group.
	pub fn group(&self) -> &str {
		&self.group
	}

	/// Display name derived from the path.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Absolute path; the page's identity within its group.
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub(crate) fn set_group(&mut self, group: &str) {
		self.group = group.to_owned();
	}
}
