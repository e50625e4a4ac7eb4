//! Change notifications for the view layer.
//!
//! Mutations push a [`Change`] onto an unbounded channel that the view layer
//! drains before re-rendering. A [`Notifier`] without a receiver drops
//! notifications silently.

use tokio::sync::mpsc;
use tracing::trace;

/// Which part of the tree changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
	/// The group list itself (or everything) changed.
	Tree,
	/// A single group or its pages changed.
	Group(String),
}

/// Receiving end of the change stream.
pub type ChangeReceiver = mpsc::UnboundedReceiver<Change>;

/// Sending end shared by the registry and every group it owns.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
	tx: Option<mpsc::UnboundedSender<Change>>,
}

impl Notifier {
	/// A notifier with no subscriber.
	pub fn detached() -> Self {
		Self::default()
	}

	pub fn notify(&self, change: Change) {
		trace!(?change, "tree.changed");
		if let Some(tx) = &self.tx
			&& tx.send(change).is_err()
		{
			trace!("tree.changed.no_receiver");
		}
	}
}

/// Creates a connected notifier/receiver pair.
pub fn channel() -> (Notifier, ChangeReceiver) {
	let (tx, rx) = mpsc::unbounded_channel();
	(Notifier { tx: Some(tx) }, rx)
}
