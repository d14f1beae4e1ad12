// SPDX-License-Identifier: MPL-2.0

//! A single stage column: header, items and drop region.

use super::drag::{DragGesture, DragLocation};
use super::item::{ItemContext, ItemRenderer, KanbanItem};
use super::message::KanbanMessage;
use cosmic::iced::widget::mouse_area;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget::{self, icon};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        ColumnId(value.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        ColumnId(value)
    }
}

/// Describes one column. Board order follows the order descriptors are given in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub title: String,
    /// Shown as a badge next to the title when present.
    pub item_count: Option<usize>,
    /// Items only move between columns sharing the same group.
    pub drag_group: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            item_count: None,
            drag_group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.drag_group = Some(group.into());
        self
    }
}

/// Clickable regions of a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRegion {
    Title,
    Action,
}

/// Message produced by pressing a header region.
///
/// The action sits beside the title rather than inside it, so pressing it
/// never reaches the header click handler.
pub fn header_message(
    column: &ColumnId,
    region: HeaderRegion,
    header_clickable: bool,
) -> Option<KanbanMessage> {
    match region {
        HeaderRegion::Title if header_clickable => {
            Some(KanbanMessage::HeaderClicked(column.clone()))
        }
        HeaderRegion::Title => None,
        HeaderRegion::Action => Some(KanbanMessage::HeaderAction(column.clone())),
    }
}

/// One entry of a column's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnNode {
    Header {
        title: String,
        count: Option<usize>,
        clickable: bool,
        has_action: bool,
    },
    Item(DragLocation),
    Empty(String),
}

/// Structural plan of a column, computed before any widget is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub nodes: Vec<ColumnNode>,
    pub drag_over: bool,
}

impl ColumnLayout {
    pub fn plan<D>(
        descriptor: &ColumnDescriptor,
        items: &[KanbanItem<D>],
        empty_text: &str,
        header_clickable: bool,
        has_action: bool,
        drag_over: bool,
    ) -> Self {
        let mut nodes = Vec::with_capacity(items.len().max(1) + 1);
        nodes.push(ColumnNode::Header {
            title: descriptor.title.clone(),
            count: descriptor.item_count,
            clickable: header_clickable,
            has_action,
        });

        if items.is_empty() {
            nodes.push(ColumnNode::Empty(empty_text.to_string()));
        } else {
            nodes.extend(
                (0..items.len()).map(|index| {
                    ColumnNode::Item(DragLocation::new(descriptor.id.clone(), index))
                }),
            );
        }

        Self { nodes, drag_over }
    }

    pub fn item_nodes(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, ColumnNode::Item(_)))
            .count()
    }

    pub fn empty_nodes(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, ColumnNode::Empty(_)))
            .count()
    }
}

/// Renders one column of the board.
pub struct KanbanColumn<'a, 'r, D, Message> {
    descriptor: &'a ColumnDescriptor,
    items: &'a [KanbanItem<D>],
    gesture: &'a DragGesture,
    on_message: &'r dyn Fn(KanbanMessage) -> Message,
    renderer: &'r dyn ItemRenderer<'a, D, Message>,
    empty_text: &'r str,
    header_clickable: bool,
    action_icon: Option<&'static str>,
    width: Length,
    height: Length,
}

impl<'a, 'r, D, Message> KanbanColumn<'a, 'r, D, Message>
where
    Message: Clone + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        descriptor: &'a ColumnDescriptor,
        items: &'a [KanbanItem<D>],
        gesture: &'a DragGesture,
        on_message: &'r dyn Fn(KanbanMessage) -> Message,
        renderer: &'r dyn ItemRenderer<'a, D, Message>,
        empty_text: &'r str,
        header_clickable: bool,
        action_icon: Option<&'static str>,
    ) -> Self {
        Self {
            descriptor,
            items,
            gesture,
            on_message,
            renderer,
            empty_text,
            header_clickable,
            action_icon,
            width: Length::Fixed(260.0),
            height: Length::Fill,
        }
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::plan(
            self.descriptor,
            self.items,
            self.empty_text,
            self.header_clickable,
            self.action_icon.is_some(),
            self.gesture.is_over(&self.descriptor.id),
        )
    }

    fn render_header(
        &self,
        title: String,
        count: Option<usize>,
        clickable: bool,
        has_action: bool,
    ) -> Element<'a, Message> {
        let column_id = &self.descriptor.id;

        let title_row = widget::row::with_capacity(2)
            .push(widget::text::title4(title))
            .push_maybe(count.map(|count| {
                widget::container(widget::text::caption(count.to_string())).padding([2, 8])
            }))
            .align_y(Alignment::Center)
            .spacing(8);

        let title_area: Element<'a, Message> =
            match header_message(column_id, HeaderRegion::Title, clickable) {
                Some(message) => mouse_area(
                    widget::container(title_row).width(Length::Fill),
                )
                .on_press((self.on_message)(message))
                .into(),
                None => widget::container(title_row).width(Length::Fill).into(),
            };

        let action: Option<Element<'a, Message>> = if has_action {
            self.action_icon.zip(header_message(column_id, HeaderRegion::Action, clickable)).map(
                |(icon_name, message)| {
                    widget::button::icon(icon::from_name(icon_name))
                        .on_press((self.on_message)(message))
                        .into()
                },
            )
        } else {
            None
        };

        widget::row::with_capacity(2)
            .push(title_area)
            .push_maybe(action)
            .align_y(Alignment::Center)
            .padding([4, 8])
            .into()
    }

    fn render_item(&self, index: usize, item: &KanbanItem<D>) -> Element<'a, Message> {
        let location = DragLocation::new(self.descriptor.id.clone(), index);
        let context = ItemContext {
            index,
            is_dragging: self.gesture.is_dragging(&item.id),
            is_drop_target: self.gesture.is_over_slot(&location),
        };

        let card = self.renderer.render(item, context);
        let group = self.descriptor.drag_group.clone();

        mouse_area(card)
            .on_press((self.on_message)(KanbanMessage::DragStart {
                location: location.clone(),
                item_id: item.id.clone(),
                group: group.clone(),
            }))
            .on_enter((self.on_message)(KanbanMessage::EnterSlot {
                location: location.clone(),
                group,
            }))
            .on_exit((self.on_message)(KanbanMessage::ExitSlot {
                location,
                len: self.items.len(),
            }))
            .into()
    }

    fn render_empty(text: String) -> Element<'a, Message> {
        widget::container(widget::text::caption(text))
            .padding(16)
            .width(Length::Fill)
            .align_x(cosmic::iced::alignment::Horizontal::Center)
            .into()
    }

    pub fn build(self) -> Element<'a, Message> {
        let layout = self.layout();

        let mut header: Option<Element<'a, Message>> = None;
        let mut body = widget::column::with_capacity(self.items.len().max(1)).spacing(4);

        for node in layout.nodes {
            match node {
                ColumnNode::Header {
                    title,
                    count,
                    clickable,
                    has_action,
                } => header = Some(self.render_header(title, count, clickable, has_action)),
                ColumnNode::Item(location) => {
                    // Tolerate a layout that outlived its items.
                    if let Some(item) = self.items.get(location.index) {
                        body = body.push(self.render_item(location.index, item));
                    }
                }
                ColumnNode::Empty(text) => body = body.push(Self::render_empty(text)),
            }
        }

        let column_id = self.descriptor.id.clone();
        let drop_region = mouse_area(
            widget::scrollable(body.padding([4, 8]))
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .on_enter((self.on_message)(KanbanMessage::EnterColumn {
            column: column_id.clone(),
            len: self.items.len(),
            group: self.descriptor.drag_group.clone(),
        }))
        .on_exit((self.on_message)(KanbanMessage::ExitColumn(column_id)));

        let container_class = if layout.drag_over {
            cosmic::style::Container::Primary
        } else {
            cosmic::style::Container::Card
        };

        widget::container(
            widget::column::with_capacity(2)
                .push_maybe(header)
                .push(drop_region)
                .spacing(4),
        )
        .width(self.width)
        .height(self.height)
        .class(container_class)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo() -> ColumnDescriptor {
        ColumnDescriptor::new("todo", "To do")
    }

    #[test]
    fn test_empty_column_shows_text_once() {
        let items: Vec<KanbanItem<()>> = Vec::new();
        let layout = ColumnLayout::plan(&todo(), &items, "No applications", false, false, false);

        assert_eq!(layout.item_nodes(), 0);
        assert_eq!(layout.empty_nodes(), 1);
        assert!(layout
            .nodes
            .contains(&ColumnNode::Empty("No applications".to_string())));
    }

    #[test]
    fn test_items_are_tagged_with_positions() {
        let items = vec![
            KanbanItem::new(1, "A", ()),
            KanbanItem::new(2, "B", ()),
            KanbanItem::new(3, "C", ()),
        ];
        let layout = ColumnLayout::plan(&todo(), &items, "empty", false, false, false);

        let indices: Vec<usize> = layout
            .nodes
            .iter()
            .filter_map(|node| match node {
                ColumnNode::Item(location) => Some(location.index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(layout.empty_nodes(), 0);
    }

    #[test]
    fn test_header_carries_count_badge() {
        let items: Vec<KanbanItem<()>> = Vec::new();
        let layout =
            ColumnLayout::plan(
            &ColumnDescriptor {
                item_count: Some(7),
                ..todo()
            },
            &items,
            "empty",
            true,
            true,
            false,
        );

        assert_eq!(
            layout.nodes[0],
            ColumnNode::Header {
                title: "To do".to_string(),
                count: Some(7),
                clickable: true,
                has_action: true,
            }
        );
    }

    #[test]
    fn test_header_action_does_not_trigger_header_click() {
        let column = ColumnId::from("todo");

        let action = header_message(&column, HeaderRegion::Action, true);
        assert_eq!(action, Some(KanbanMessage::HeaderAction(column.clone())));

        let title = header_message(&column, HeaderRegion::Title, true);
        assert_eq!(title, Some(KanbanMessage::HeaderClicked(column)));
    }

    #[test]
    fn test_title_without_handler_is_inert() {
        let column = ColumnId::from("done");
        assert_eq!(header_message(&column, HeaderRegion::Title, false), None);
    }

    #[test]
    fn test_column_id_serializes_as_string() {
        let id = ColumnId::from("interview");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"interview\"");
    }
}
