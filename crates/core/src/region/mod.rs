//! Physical layout regions.
//!
//! Regions are addressed by a volatile index that the host renumbers whenever
//! another region opens or closes. [`RegionHandle`] tracks one region across
//! those renumberings; [`LayoutSnapshot`] and [`LayoutChange`] are the
//! read-only views of host state it is derived from.

mod handle;
mod layout;

pub use handle::{RegionError, RegionEvent, RegionHandle};
pub use layout::{ActivationChange, LayoutChange, LayoutSnapshot, RegionIndex, RegionInfo};

#[cfg(test)]
mod tests;
