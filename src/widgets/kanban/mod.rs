// SPDX-License-Identifier: MPL-2.0

//! Kanban board widget for staged work items.
//!
//! Items are grouped into ordered columns. Dragging a card to another slot
//! produces a [`MoveCommand`]; the board itself never reorders anything, the
//! parent applies the move to its [`BoardState`] (or persists it first) and
//! the next `view` reflects the result.
//!
//! # Example
//!
//! ```ignore
//! use crate::widgets::kanban::{BoardState, DragGesture, KanbanBoard, KanbanEvent, KanbanMessage};
//!
//! // In your app state
//! struct AppModel {
//!     board: BoardState<MyData>,
//!     gesture: DragGesture,
//! }
//!
//! // In your message enum
//! enum Message {
//!     Kanban(KanbanMessage),
//! }
//!
//! // In your view function
//! fn view(&self) -> Element<'_, Message> {
//!     KanbanBoard::new(&self.board, &self.gesture, Message::Kanban)
//!         .empty_text("Nothing here")
//!         .into()
//! }
//!
//! // In your subscription function
//! fn subscription(&self) -> Subscription<Message> {
//!     kanban::drag_events().map(Message::Kanban)
//! }
//!
//! // In your update function
//! fn update(&mut self, message: Message) -> Task<Message> {
//!     match message {
//!         Message::Kanban(msg) => match self.gesture.update(msg) {
//!             Some(KanbanEvent::Move(command)) => return self.on_move(command),
//!             Some(KanbanEvent::Activate(item_id)) => self.open(item_id),
//!             _ => {}
//!         },
//!     }
//!     Task::none()
//! }
//! ```

mod board;
mod column;
mod drag;
mod item;
mod message;
mod state;

pub use board::{drag_events, KanbanBoard};
pub use column::{
    header_message, ColumnDescriptor, ColumnId, ColumnLayout, ColumnNode, HeaderRegion,
    KanbanColumn,
};
pub use drag::{
    resolve_move, ActiveDrag, DragGesture, DragLocation, DragResult, DropTarget, GestureOutcome,
    GesturePhase, MoveCommand,
};
pub use item::{CardRenderer, ItemContext, ItemId, ItemRenderer, KanbanItem};
pub use message::{KanbanEvent, KanbanMessage};
pub use state::{BoardError, BoardState};
