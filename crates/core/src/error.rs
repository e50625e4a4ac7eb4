//! Error types surfaced to the user-visible message channel.

use thiserror::Error;

use crate::store::StoreError;

/// Errors from registry and command operations.
#[derive(Debug, Error)]
pub enum GroupError {
	/// Another group already uses this name.
	#[error("Group '{0}' already exists")]
	NameConflict(String),

	/// No group with this name exists.
	#[error("Group '{0}' does not exist")]
	NotFound(String),

	/// Persisting the groups failed.
	#[error("failed to save groups: {0}")]
	Store(#[from] StoreError),
}

/// Result type for group operations.
pub type Result<T> = std::result::Result<T, GroupError>;
