// SPDX-License-Identifier: MPL-2.0

//! Kanban board widget builder and rendering.

use super::column::KanbanColumn;
use super::drag::DragGesture;
use super::item::{CardRenderer, ItemRenderer, ItemContext, KanbanItem};
use super::message::KanbanMessage;
use super::state::BoardState;
use cosmic::iced::event::{self, Event};
use cosmic::iced::{keyboard, mouse, Length, Subscription};
use cosmic::prelude::*;
use cosmic::widget;

/// Builder for the kanban board widget.
///
/// # Type Parameters
///
/// - `D`: The custom data type associated with each item
/// - `Message`: The parent's message type
///
/// # Example
///
/// ```ignore
/// KanbanBoard::new(&board_state, &gesture, Message::Kanban)
///     .title("Backend Engineer")
///     .empty_text("No applications")
///     .into()
/// ```
pub struct KanbanBoard<'a, D, Message>
where
    D: 'a,
    Message: Clone + 'static,
{
    state: &'a BoardState<D>,
    gesture: &'a DragGesture,
    on_message: Box<dyn Fn(KanbanMessage) -> Message + 'a>,
    title: Option<String>,
    column_width: Length,
    column_height: Length,
    spacing: u16,
    empty_text: String,
    header_clickable: bool,
    header_action_icon: Option<&'static str>,
    item_view: Box<dyn ItemRenderer<'a, D, Message> + 'a>,
}

impl<'a, D, Message> KanbanBoard<'a, D, Message>
where
    D: 'a,
    Message: Clone + 'static,
{
    /// Creates a new board widget.
    ///
    /// # Arguments
    ///
    /// - `state`: Columns and items (owned by parent)
    /// - `gesture`: Drag gesture state (owned by parent)
    /// - `on_message`: Function to wrap `KanbanMessage` into the parent's `Message` type
    pub fn new(
        state: &'a BoardState<D>,
        gesture: &'a DragGesture,
        on_message: impl Fn(KanbanMessage) -> Message + 'a,
    ) -> Self {
        Self {
            state,
            gesture,
            on_message: Box::new(on_message),
            title: None,
            column_width: Length::Fixed(260.0),
            column_height: Length::Fill,
            spacing: 8,
            empty_text: String::from("No items"),
            header_clickable: false,
            header_action_icon: None,
            item_view: Box::new(CardRenderer),
        }
    }

    /// Sets a title rendered above the columns.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the column width strategy.
    ///
    /// Default is `Length::Fixed(260.0)`.
    pub fn column_width(mut self, width: Length) -> Self {
        self.column_width = width;
        self
    }

    pub fn column_height(mut self, height: Length) -> Self {
        self.column_height = height;
        self
    }

    /// Sets the spacing between columns.
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Text shown in columns without items.
    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Makes column titles clickable; clicks surface as `KanbanEvent::HeaderClicked`.
    pub fn on_header_click(mut self) -> Self {
        self.header_clickable = true;
        self
    }

    /// Adds an icon button to every column header.
    pub fn header_action(mut self, icon_name: &'static str) -> Self {
        self.header_action_icon = Some(icon_name);
        self
    }

    /// Sets a custom item renderer.
    pub fn item_view<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&KanbanItem<D>, ItemContext) -> Element<'a, Message> + 'a,
    {
        self.item_view = Box::new(renderer);
        self
    }

    /// Builds the widget and returns it as an Element.
    pub fn build(self) -> Element<'a, Message> {
        let columns = self.state.columns();
        let mut row = widget::row::with_capacity(columns.len()).spacing(self.spacing);

        for descriptor in columns {
            let column = KanbanColumn::new(
                descriptor,
                self.state.items(&descriptor.id),
                self.gesture,
                &*self.on_message,
                &*self.item_view,
                &self.empty_text,
                self.header_clickable,
                self.header_action_icon,
            )
            .width(self.column_width)
            .height(self.column_height);

            row = row.push(column.build());
        }

        let columns_view = widget::scrollable::horizontal(row)
            .width(Length::Fill)
            .height(self.column_height);

        widget::column::with_capacity(2)
            .push_maybe(self.title.map(widget::text::title3))
            .push(columns_view)
            .spacing(self.spacing)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl<'a, D, Message> From<KanbanBoard<'a, D, Message>> for Element<'a, Message>
where
    D: 'a,
    Message: Clone + 'static,
{
    fn from(board: KanbanBoard<'a, D, Message>) -> Self {
        board.build()
    }
}

/// Window-wide pointer and keyboard events that end a drag.
///
/// Releases anywhere in the window finish the gesture; Escape aborts it.
pub fn drag_events() -> Subscription<KanbanMessage> {
    event::listen_with(|event, _status, _window| match event {
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(KanbanMessage::Release)
        }
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(KanbanMessage::Cancel),
        _ => None,
    })
}

