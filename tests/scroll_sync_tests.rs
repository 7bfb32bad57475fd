//! Scroll coordination tests.
//!
//! Cover gesture ownership, delta propagation without feedback, settle
//! bookkeeping, cancellation, and alignment of freshly attached sub-panes.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{test_adapter, MockProvider};
use tablegrid::scroll::GesturePhase;
use tablegrid::types::{Axis, PaneId, ScrollPosition};
use tablegrid::TableCoordinator;

fn coordinator(rows: usize, columns: usize) -> TableCoordinator<common::TestAdapter, MockProvider> {
    TableCoordinator::new(test_adapter(columns, rows), MockProvider::with_grid(rows, columns, 50))
}

// ============================================================================
// PROPAGATION
// ============================================================================

#[test]
fn test_vertical_delta_propagates_exactly_once_without_feedback() {
    let mut table = coordinator(3, 2);

    assert!(!table.on_touch_down(PaneId::RowHeader));
    assert!(!table.on_touch_move(PaneId::RowHeader));
    table.on_scrolled(PaneId::RowHeader, 25);

    // CellGrid receives exactly one propagated delta of the same magnitude.
    assert_eq!(
        table.provider().scroll_by_calls,
        vec![(PaneId::CellGrid, 25)]
    );
    // The originator is never scrolled back.
    assert_eq!(table.provider().scroll_by_count(PaneId::RowHeader), 0);

    // The host echoes the propagated scroll back as an event; it must not
    // propagate again.
    table.on_scrolled(PaneId::CellGrid, 25);
    assert_eq!(table.provider().scroll_by_calls.len(), 1);
}

#[test]
fn test_column_header_delta_reaches_every_realized_sub_pane() {
    let mut table = coordinator(3, 2);

    table.on_touch_down(PaneId::ColumnHeader);
    table.on_touch_move(PaneId::ColumnHeader);
    table.on_scrolled(PaneId::ColumnHeader, 30);

    for row in 0..3 {
        assert_eq!(
            table.provider().scroll_by_count(PaneId::CellRow(row)),
            1,
            "sub-pane of row {row} should receive one delta"
        );
    }
    assert_eq!(table.provider().scroll_by_count(PaneId::ColumnHeader), 0);
}

#[test]
fn test_cell_row_delta_reaches_header_and_sibling_rows() {
    let mut table = coordinator(3, 2);

    table.on_touch_down(PaneId::CellRow(1));
    table.on_touch_move(PaneId::CellRow(1));
    table.on_scrolled(PaneId::CellRow(1), -12);

    assert_eq!(table.provider().scroll_by_count(PaneId::ColumnHeader), 1);
    assert_eq!(table.provider().scroll_by_count(PaneId::CellRow(0)), 1);
    assert_eq!(table.provider().scroll_by_count(PaneId::CellRow(2)), 1);
    assert_eq!(table.provider().scroll_by_count(PaneId::CellRow(1)), 0);
}

// ============================================================================
// GESTURE OWNERSHIP
// ============================================================================

#[test]
fn test_second_pane_touch_is_swallowed_while_gesture_owned() {
    let mut table = coordinator(3, 2);

    assert!(!table.on_touch_down(PaneId::RowHeader));
    table.on_touch_move(PaneId::RowHeader);

    // At most one pane owns a gesture at a time.
    assert!(table.on_touch_down(PaneId::CellGrid));
    table.on_scrolled(PaneId::CellGrid, 40);
    assert!(table.provider().scroll_by_calls.is_empty());
}

#[test]
fn test_gesture_phases() {
    let mut table = coordinator(3, 2);
    assert_eq!(table.gesture_phase(Axis::Vertical), GesturePhase::Idle);

    table.on_touch_down(PaneId::RowHeader);
    assert_eq!(
        table.gesture_phase(Axis::Vertical),
        GesturePhase::Touched(PaneId::RowHeader)
    );

    table.on_touch_move(PaneId::RowHeader);
    assert_eq!(
        table.gesture_phase(Axis::Vertical),
        GesturePhase::Dragging(PaneId::RowHeader)
    );

    table.on_touch_up(PaneId::RowHeader);
    assert_eq!(
        table.gesture_phase(Axis::Vertical),
        GesturePhase::Settling(PaneId::RowHeader)
    );

    table.on_scroll_settled(PaneId::RowHeader);
    assert_eq!(table.gesture_phase(Axis::Vertical), GesturePhase::Idle);
}

#[test]
fn test_tap_without_movement_detaches_immediately() {
    let mut table = coordinator(3, 2);

    table.on_touch_down(PaneId::RowHeader);
    table.on_touch_up(PaneId::RowHeader);
    assert_eq!(table.gesture_phase(Axis::Vertical), GesturePhase::Idle);

    // Listener gone: nothing propagates.
    table.on_scrolled(PaneId::RowHeader, 10);
    assert!(table.provider().scroll_by_calls.is_empty());
}

#[test]
fn test_moved_release_keeps_listener_until_settle() {
    let mut table = coordinator(3, 2);

    table.on_touch_down(PaneId::RowHeader);
    table.on_touch_move(PaneId::RowHeader);
    table.on_scrolled(PaneId::RowHeader, 8);
    table.on_touch_up(PaneId::RowHeader);

    // Momentum deltas after release still propagate.
    table.on_scrolled(PaneId::RowHeader, 5);
    assert_eq!(table.provider().scroll_by_count(PaneId::CellGrid), 2);

    table.on_scroll_settled(PaneId::RowHeader);
    table.on_scrolled(PaneId::RowHeader, 5);
    assert_eq!(table.provider().scroll_by_count(PaneId::CellGrid), 2);
}

#[test]
fn test_cancel_records_state_and_detaches() {
    let mut table = coordinator(3, 2);

    table.on_touch_down(PaneId::ColumnHeader);
    table.on_touch_move(PaneId::ColumnHeader);
    table.on_touch_cancel(PaneId::ColumnHeader);

    assert_eq!(table.gesture_phase(Axis::Horizontal), GesturePhase::Idle);
    table.on_scrolled(PaneId::ColumnHeader, 16);
    assert!(table.provider().scroll_by_calls.is_empty());
}

// ============================================================================
// CANONICAL POSITION
// ============================================================================

#[test]
fn test_scroll_to_column_aligns_all_panes() {
    let mut table = coordinator(3, 5);
    table.scroll_to_column_with_offset(7, 15);

    // Column header first; it is the canonical pane.
    assert_eq!(
        table.provider().scroll_to_calls.first(),
        Some(&(PaneId::ColumnHeader, ScrollPosition::new(7, 15)))
    );
    for row in 0..3 {
        assert_eq!(
            table.provider().pane(PaneId::CellRow(row)).position,
            ScrollPosition::new(7, 15),
            "sub-pane of row {row} should report (7, 15)"
        );
    }
}

#[test]
fn test_scroll_to_row_moves_both_vertical_panes() {
    let mut table = coordinator(3, 2);
    table.scroll_to_row_with_offset(42, -6);

    let expected = ScrollPosition::new(42, -6);
    assert_eq!(table.provider().pane(PaneId::RowHeader).position, expected);
    assert_eq!(table.provider().pane(PaneId::CellGrid).position, expected);
}

#[test]
fn test_newly_attached_row_starts_at_canonical_position() {
    let mut table = coordinator(3, 5);
    table.scroll_to_column_with_offset(2, 9);

    // Row 7 scrolls into view later; its fresh sub-pane must be aligned
    // before display.
    table.notify_row_attached(7);
    assert!(table
        .provider()
        .scroll_to_calls
        .contains(&(PaneId::CellRow(7), ScrollPosition::new(2, 9))));
}

#[test]
fn test_settle_records_position_for_future_panes() {
    let mut table = coordinator(3, 5);

    // Simulate a finished header drag that stopped with column 2 as the
    // first completely visible item.
    table.on_touch_down(PaneId::ColumnHeader);
    table.on_touch_move(PaneId::ColumnHeader);
    table.on_scrolled(PaneId::ColumnHeader, 80);
    table.on_touch_up(PaneId::ColumnHeader);
    table.provider_mut().pane_mut(PaneId::ColumnHeader).first_completely_visible = Some(2);
    table.on_scroll_settled(PaneId::ColumnHeader);

    let expected_offset = table
        .provider()
        .pane(PaneId::ColumnHeader)
        .views[&2]
        .bounds
        .left;

    table.notify_row_attached(0);
    assert!(table
        .provider()
        .scroll_to_calls
        .contains(&(PaneId::CellRow(0), ScrollPosition::new(2, expected_offset))));
}
