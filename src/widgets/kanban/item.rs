// SPDX-License-Identifier: MPL-2.0

//! Item types and item rendering for the kanban board.

use cosmic::iced::Length;
use cosmic::prelude::*;
use cosmic::widget;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a board item.
///
/// Backends hand out either numeric or string keys, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Text(value)
    }
}

/// A single draggable unit on the board.
///
/// Generic over `D`, the payload the caller attaches to each item.
#[derive(Debug, Clone)]
pub struct KanbanItem<D> {
    /// Unique identifier for this item.
    pub id: ItemId,
    /// Primary label.
    pub title: String,
    /// Optional secondary line.
    pub description: Option<String>,
    /// Custom data associated with this item.
    pub data: D,
}

impl<D> KanbanItem<D> {
    /// Creates an item without a description.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, data: D) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            data,
        }
    }

    /// Sets the secondary line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Per-item rendering context handed to an [`ItemRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemContext {
    /// Position of the item inside its column.
    pub index: usize,
    /// True while this item is the one being dragged.
    pub is_dragging: bool,
    /// True while the pointer hovers this slot during a drag.
    pub is_drop_target: bool,
}

/// Capability for turning an item into its visible card.
///
/// Closures of the shape `Fn(&KanbanItem<D>, ItemContext) -> Element` implement
/// it, so most callers never name the trait.
pub trait ItemRenderer<'a, D, Message> {
    fn render(&self, item: &KanbanItem<D>, context: ItemContext) -> Element<'a, Message>;
}

impl<'a, D, Message, F> ItemRenderer<'a, D, Message> for F
where
    F: Fn(&KanbanItem<D>, ItemContext) -> Element<'a, Message>,
{
    fn render(&self, item: &KanbanItem<D>, context: ItemContext) -> Element<'a, Message> {
        self(item, context)
    }
}

/// Default card: title with an optional caption underneath.
pub struct CardRenderer;

impl<'a, D, Message: 'static> ItemRenderer<'a, D, Message> for CardRenderer {
    fn render(&self, item: &KanbanItem<D>, context: ItemContext) -> Element<'a, Message> {
        let content = widget::column::with_capacity(2)
            .push(widget::text::body(item.title.clone()))
            .push_maybe(
                item.description
                    .clone()
                    .map(|description| widget::text::caption(description)),
            )
            .spacing(2);

        let container_class = if context.is_dragging || context.is_drop_target {
            cosmic::style::Container::Primary
        } else {
            cosmic::style::Container::Card
        };

        widget::container(content)
            .padding(8)
            .width(Length::Fill)
            .class(container_class)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::from(42).to_string(), "42");
        assert_eq!(ItemId::from("app-7").to_string(), "app-7");
    }

    #[test]
    fn test_item_id_deserializes_both_shapes() {
        let ids: Vec<ItemId> = serde_json::from_str(r#"[1, "two"]"#).unwrap();
        assert_eq!(ids, vec![ItemId::Number(1), ItemId::Text("two".to_string())]);
    }

    #[test]
    fn test_with_description() {
        let item = KanbanItem::new(1, "Ada Lovelace", ()).with_description("Backend Engineer");
        assert_eq!(item.description.as_deref(), Some("Backend Engineer"));
    }
}
