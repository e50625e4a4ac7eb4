#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Group-to-region binding engine.
//!
//! Users collect open documents into named groups. A group can be put on
//! screen in its own editor region, and the engine keeps that binding
//! correct while the host opens, closes, and reorders regions underneath it.
//!
//! # Main Types
//!
//! - [`Registry`] - owns the groups, enforces unique names, tracks focus recency
//! - [`Group`] - pages plus the `Detached`/`Focused`/`Blurred` state machine
//! - [`RegionHandle`] - follows one physical region across renumbering
//! - [`Host`] - the editor window API the engine drives
//! - [`Session`] - executes [`Command`]s and persists through a [`GroupStore`]
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── registry: Registry
//! │   ├── groups: IndexMap<String, Group>
//! │   │   └── region: Option<RegionHandle>
//! │   └── recent: IndexSet<String>      // most recent last
//! ├── host: impl Host                   // snapshot, events, requests
//! └── store: impl GroupStore            // name -> ordered page paths
//! ```
//!
//! Region indices are never trusted across a host request: every request
//! that addresses a region re-derives its index from a fresh snapshot.

pub mod command;
pub mod error;
pub mod group;
pub mod host;
pub mod notify;
pub mod page;
pub mod region;
pub mod registry;
pub mod store;

pub use command::{Command, Outcome, Session};
pub use error::{GroupError, Result};
pub use group::{FocusOptions, FocusOutcome, Group, GroupState};
pub use host::{Host, HostError, HostEvent, MemoryHost, Tab};
pub use notify::{Change, ChangeReceiver, Notifier};
pub use page::{Page, WorkspaceRoot, WorkspaceRoots};
pub use region::{LayoutChange, LayoutSnapshot, RegionError, RegionHandle, RegionIndex};
pub use registry::{RefocusPolicy, Registry, TreeItem};
pub use store::{GroupRecord, GroupStore, GroupsSnapshot, MemoryStore, StoreError};
