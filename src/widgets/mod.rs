// SPDX-License-Identifier: MPL-2.0

//! Custom widgets for the Stageboard application.

pub mod kanban;

pub use kanban::{
    BoardState, ColumnDescriptor, ColumnId, DragGesture, ItemContext, ItemId, KanbanBoard,
    KanbanEvent, KanbanItem, KanbanMessage, MoveCommand,
};
