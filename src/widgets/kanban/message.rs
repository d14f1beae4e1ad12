// SPDX-License-Identifier: MPL-2.0

//! Messages emitted by the kanban board widget.

use super::column::ColumnId;
use super::drag::{DragLocation, MoveCommand};
use super::item::ItemId;

/// Raw interaction messages emitted by the board.
///
/// These should be wrapped by the parent's message type and fed back into
/// [`DragGesture::update`](super::DragGesture::update), which turns them into
/// [`KanbanEvent`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum KanbanMessage {
    /// Pointer pressed on an item.
    DragStart {
        location: DragLocation,
        item_id: ItemId,
        /// Drag group of the column the item was picked from.
        group: Option<String>,
    },

    /// Pointer entered an item slot.
    EnterSlot {
        location: DragLocation,
        group: Option<String>,
    },

    /// Pointer left an item slot.
    ExitSlot {
        location: DragLocation,
        /// Number of items in the slot's column.
        len: usize,
    },

    /// Pointer entered a column's drop region.
    EnterColumn {
        column: ColumnId,
        /// Number of items the column rendered.
        len: usize,
        group: Option<String>,
    },

    /// Pointer left a column's drop region.
    ExitColumn(ColumnId),

    /// Left mouse button released anywhere in the window.
    Release,

    /// The user aborted the drag (Escape).
    Cancel,

    /// The column header was clicked.
    HeaderClicked(ColumnId),

    /// The header action element was pressed.
    HeaderAction(ColumnId),
}

/// Resolved outcomes handed to the board's owner.
#[derive(Debug, Clone, PartialEq)]
pub enum KanbanEvent {
    /// A genuine move; the owner persists it.
    Move(MoveCommand),
    /// An item was pressed and released without moving.
    Activate(ItemId),
    HeaderClicked(ColumnId),
    HeaderAction(ColumnId),
}
