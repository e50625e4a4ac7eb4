use proptest::prelude::*;

use super::*;

fn layout(revision: u64, count: usize, active: usize) -> LayoutSnapshot {
	LayoutSnapshot::new(
		revision,
		(0..count)
			.map(|i| RegionInfo {
				index: RegionIndex(i),
				active: i == active,
				tabs: 1,
			})
			.collect(),
	)
}

#[test]
fn bind_uses_active_region_by_default() {
	let handle = RegionHandle::bind(&layout(3, 4, 2), None).unwrap();
	assert_eq!(handle.tracked_index(), RegionIndex(2));
	assert_eq!(handle.observed_revision(), 3);
}

#[test]
fn bind_without_active_region_fails() {
	let empty = LayoutSnapshot::new(0, Vec::new());
	assert_eq!(RegionHandle::bind(&empty, None), Err(RegionError::NoActiveRegion));
}

#[test]
fn bind_to_missing_region_fails() {
	let snapshot = layout(0, 2, 0);
	assert_eq!(
		RegionHandle::bind(&snapshot, Some(RegionIndex(5))),
		Err(RegionError::NotLive(RegionIndex(5)))
	);
}

#[test]
fn open_before_tracked_index_shifts_right() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 2), None).unwrap();
	handle.apply(&LayoutChange::new(1).opened(1));
	assert_eq!(handle.tracked_index(), RegionIndex(3));
}

#[test]
fn open_after_tracked_index_is_ignored() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 1), None).unwrap();
	handle.apply(&LayoutChange::new(1).opened(2));
	assert_eq!(handle.tracked_index(), RegionIndex(1));
}

#[test]
fn close_before_tracked_index_shifts_left() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 2), None).unwrap();
	handle.apply(&LayoutChange::new(1).closed(0));
	assert_eq!(handle.tracked_index(), RegionIndex(1));
	assert!(!handle.is_closed());
}

#[test]
fn close_at_tracked_index_marks_closed() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 1), None).unwrap();
	assert_eq!(handle.apply(&LayoutChange::new(1).closed(1).activation(0, true)), None);
	assert!(handle.is_closed());
	assert!(!handle.is_live(&layout(1, 2, 0)));
	assert_eq!(handle.tab_count(&layout(1, 2, 0)), None);
}

#[test]
fn batches_already_in_bound_snapshot_are_ignored() {
	let mut handle = RegionHandle::bind(&layout(5, 3, 1), None).unwrap();
	handle.apply(&LayoutChange::new(5).opened(0));
	handle.apply(&LayoutChange::new(4).opened(0));
	assert_eq!(handle.tracked_index(), RegionIndex(1));
}

#[test]
fn activation_matches_adjusted_index() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 1), None).unwrap();
	let event = handle.apply(&LayoutChange::new(1).opened(0).activation(1, true).activation(2, false));
	assert_eq!(handle.tracked_index(), RegionIndex(2));
	assert_eq!(event, Some(RegionEvent::Blurred));

	let event = handle.apply(&LayoutChange::new(2).activation(2, true));
	assert_eq!(event, Some(RegionEvent::Focused));
}

#[test]
fn current_index_rederives_against_snapshot() {
	let handle = RegionHandle::bind(&layout(0, 3, 2), None).unwrap();
	assert_eq!(handle.current_index(&layout(0, 3, 0)), Some(RegionIndex(2)));
	assert_eq!(handle.current_index(&layout(1, 2, 0)), None);
}

#[test]
fn snapshot_ahead_of_handle_addresses_nothing() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 1), None).unwrap();
	let ahead = layout(1, 4, 2);
	assert!(!handle.is_current(&ahead));
	assert_eq!(handle.current_index(&ahead), None);
	assert_eq!(handle.tab_count(&ahead), None);
	assert!(!handle.is_live(&ahead));

	handle.apply(&LayoutChange::new(1).opened(0));
	assert_eq!(handle.current_index(&ahead), Some(RegionIndex(2)));
	assert_eq!(handle.tab_count(&ahead), Some(1));
}

#[test]
fn unstamped_batches_never_shift() {
	let mut handle = RegionHandle::bind(&layout(0, 3, 1), None).unwrap();
	assert_eq!(handle.apply(&LayoutChange::new(0).opened(0).activation(2, true)), None);
	assert_eq!(handle.tracked_index(), RegionIndex(1));
	assert_eq!(handle.observed_revision(), 0);
}

proptest! {
	#[test]
	fn net_shift_is_opens_minus_closes_at_or_before(
		start in 0usize..16,
		opened in proptest::collection::vec(0usize..24, 0..6),
		closed in proptest::collection::vec(0usize..24, 0..6),
	) {
		let snapshot = layout(0, start + 1, start);
		let mut forward = RegionHandle::bind(&snapshot, None).unwrap();
		let mut reversed = forward.clone();

		let mut batch = LayoutChange::new(1);
		for &i in &opened {
			batch = batch.opened(i);
		}
		for &i in &closed {
			batch = batch.closed(i);
		}
		let mut flipped = LayoutChange::new(1);
		for &i in closed.iter().rev() {
			flipped = flipped.closed(i);
		}
		for &i in opened.iter().rev() {
			flipped = flipped.opened(i);
		}

		forward.apply(&batch);
		reversed.apply(&flipped);

		let ups = opened.iter().filter(|&&i| i <= start).count();
		let downs = closed.iter().filter(|&&i| i <= start).count();
		let expected = (start + ups).saturating_sub(downs);
		prop_assert_eq!(forward.tracked_index(), RegionIndex(expected));
		prop_assert_eq!(forward, reversed);
	}
}
