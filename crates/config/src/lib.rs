#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Configuration for grouper.
//!
//! Configuration is written in TOML and covers where groups are stored,
//! which workspace roots page names are shown relative to, and how a focused
//! group's region behaves.
//!
//! # Configuration Files
//!
//! grouper looks for configuration in these locations (in order):
//!
//! 1. The path passed with `--config`
//! 2. `$XDG_CONFIG_HOME/grouper/grouper.toml` (or `~/.config/grouper/grouper.toml`)
//! 3. Built-in defaults
//!
//! # Schema
//!
//! ```toml
//! store = "/home/me/.local/share/grouper/groups.json"
//!
//! [[workspace]]
//! name = "site"
//! path = "/home/me/site"
//!
//! [focus]
//! maximize = true
//! lock = true
//! refocus = "recent"   # or "list"
//! ```

pub mod error;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
use grouper_core::{FocusOptions, Notifier, RefocusPolicy, Registry, WorkspaceRoot, WorkspaceRoots};
use serde::Deserialize;
use tracing::debug;

/// File name looked up under the user's config directory.
pub const CONFIG_FILE: &str = "grouper.toml";

/// File name of the default group store under the user's data directory.
pub const STORE_FILE: &str = "groups.json";

/// Parsed configuration from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Explicit location of the group store.
	pub store: Option<PathBuf>,
	/// Workspace roots, in display order.
	#[serde(rename = "workspace")]
	pub workspaces: Vec<WorkspaceConfig>,
	/// Region behaviour while a group is focused.
	pub focus: FocusConfig,
}

/// One `[[workspace]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
	/// Bracketed label; defaults to the folder name.
	pub name: Option<String>,
	pub path: PathBuf,
}

/// The `[focus]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusConfig {
	pub maximize: bool,
	pub lock: bool,
	pub refocus: RefocusPolicy,
}

impl Default for FocusConfig {
	fn default() -> Self {
		let options = FocusOptions::default();
		Self {
			maximize: options.maximize,
			lock: options.lock,
			refocus: RefocusPolicy::default(),
		}
	}
}

impl Config {
	/// Parse a TOML string into a [`Config`] and validate it.
	pub fn parse(input: &str) -> Result<Self> {
		let config: Config = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::parse(&content)?;
		debug!(path = %path.display(), workspaces = config.workspaces.len(), "config.load");
		Ok(config)
	}

	/// Loads `explicit` if given, else the default file if it exists, else defaults.
	///
	/// A missing explicit file is an error; a missing default file is not.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => {
				debug!("config.defaults");
				Ok(Self::default())
			}
		}
	}

	/// Location of the group store, explicit or under the data directory.
	pub fn store_path(&self) -> Option<PathBuf> {
		self.store
			.clone()
			.or_else(|| dirs::data_dir().map(|dir| dir.join("grouper").join(STORE_FILE)))
	}

	/// Workspace roots, or `fallback` alone when none are configured.
	pub fn workspace_roots(&self, fallback: &Path) -> WorkspaceRoots {
		if self.workspaces.is_empty() {
			return WorkspaceRoots::single(fallback);
		}
		let roots = self
			.workspaces
			.iter()
			.map(|ws| {
				let name = ws.name.clone().unwrap_or_else(|| folder_name(&ws.path));
				WorkspaceRoot::new(name, &ws.path)
			})
			.collect();
		WorkspaceRoots::new(roots)
	}

	pub fn focus_options(&self) -> FocusOptions {
		FocusOptions {
			maximize: self.focus.maximize,
			lock: self.focus.lock,
		}
	}

	pub fn refocus_policy(&self) -> RefocusPolicy {
		self.focus.refocus
	}

	/// Builds an empty registry configured from this file.
	pub fn registry(&self, fallback_root: &Path, notifier: Notifier) -> Registry {
		Registry::new(self.workspace_roots(fallback_root), notifier)
			.with_focus_options(self.focus_options())
			.with_refocus_policy(self.refocus_policy())
	}

	fn validate(&self) -> Result<()> {
		let mut seen = HashSet::new();
		for ws in &self.workspaces {
			let invalid = |reason| ConfigError::InvalidWorkspace {
				path: ws.path.clone(),
				reason,
			};
			if !ws.path.is_absolute() {
				return Err(invalid("path must be absolute"));
			}
			if ws.name.as_deref().is_some_and(str::is_empty) {
				return Err(invalid("name must not be empty"));
			}
			if !seen.insert(&ws.path) {
				return Err(invalid("listed more than once"));
			}
		}
		Ok(())
	}
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("grouper").join(CONFIG_FILE))
}

fn folder_name(path: &Path) -> String {
	path.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string())
}
