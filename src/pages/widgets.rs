// SPDX-License-Identifier: MPL-2.0

//! Shared widgets for the Stageboard application pages.

use crate::api::Application;
use crate::app::{ConnectionStatus, Message, Notification, NotificationLevel};
use crate::fl;
use crate::pipeline::StageSummary;
use crate::widgets::kanban::{ItemContext, KanbanItem};
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget::{self, icon};

const DATE_FORMAT: &str = "%b %d, %Y";

/// Connection status badge widget
pub fn connection_status_badge(status: &ConnectionStatus) -> Element<'static, Message> {
    match status {
        ConnectionStatus::Disconnected => {
            widget::button::custom(widget::text::body(fl!("disconnected")))
                .class(cosmic::theme::Button::Standard)
                .into()
        }
        ConnectionStatus::Connecting => {
            widget::button::custom(widget::text::body(fl!("connecting")))
                .class(cosmic::theme::Button::Standard)
                .into()
        }
        ConnectionStatus::Connected => widget::button::custom(
            widget::row::with_capacity(2)
                .push(icon::from_name("object-select-symbolic").size(16))
                .push(widget::text::body(fl!("connected")))
                .spacing(4)
                .align_y(Alignment::Center),
        )
        .class(cosmic::theme::Button::Suggested)
        .into(),
        ConnectionStatus::Error(_) => widget::button::custom(widget::text::body(fl!("error")))
            .class(cosmic::theme::Button::Destructive)
            .into(),
    }
}

/// Notification toast widget
pub fn notification_toast(notification: &Notification) -> Element<'_, Message> {
    let id = notification.id;

    let level_icon = match notification.level {
        NotificationLevel::Info => icon::from_name("dialog-information-symbolic").size(20),
        NotificationLevel::Success => icon::from_name("object-select-symbolic").size(20),
        NotificationLevel::Warning => icon::from_name("dialog-warning-symbolic").size(20),
        NotificationLevel::Error => icon::from_name("dialog-error-symbolic").size(20),
    };

    let content = widget::row::with_capacity(4)
        .push(level_icon)
        .push(
            widget::column::with_capacity(2)
                .push(widget::text::body(&notification.title))
                .push_maybe(if notification.message.is_empty() {
                    None
                } else {
                    Some(widget::text::caption(&notification.message))
                })
                .spacing(2)
                .width(Length::Fill),
        )
        .push(
            widget::button::icon(icon::from_name("edit-copy-symbolic"))
                .on_press(Message::CopyNotification(id))
                .class(cosmic::theme::Button::Standard),
        )
        .push(
            widget::button::icon(icon::from_name("window-close-symbolic"))
                .on_press(Message::DismissNotification(id))
                .class(cosmic::theme::Button::Standard),
        )
        .spacing(8)
        .align_y(Alignment::Center);

    widget::container(content)
        .padding(12)
        .width(Length::Fixed(400.0))
        .class(cosmic::style::Container::Card)
        .into()
}

/// Application card rendered inside a board column
pub fn application_card<'a>(
    item: &KanbanItem<Application>,
    context: ItemContext,
    show_applied_date: bool,
    pending: bool,
) -> Element<'a, Message> {
    let application = &item.data;

    let mut title_row = widget::row::with_capacity(3)
        .push(widget::text::body(item.title.clone()).width(Length::Fill))
        .align_y(Alignment::Center)
        .spacing(4);

    if application.resume_url.is_some() {
        title_row = title_row.push(icon::from_name("x-office-document-symbolic").size(14));
    }
    if pending {
        title_row = title_row.push(icon::from_name("content-loading-symbolic").size(14));
    }

    let details = widget::column::with_capacity(3)
        .push(title_row)
        .push_maybe(item.description.clone().map(widget::text::caption))
        .push_maybe(show_applied_date.then(|| {
            widget::text::caption(application.applied_at.format(DATE_FORMAT).to_string())
                .class(cosmic::style::Text::Accent)
        }))
        .spacing(2);

    let container_class = if context.is_dragging || context.is_drop_target {
        cosmic::style::Container::Primary
    } else {
        cosmic::style::Container::Card
    };

    widget::container(details)
        .padding([6, 10])
        .width(Length::Fill)
        .class(container_class)
        .into()
}

/// Application details view for the context drawer
pub fn application_details_view(application: Option<&Application>) -> Element<'_, Message> {
    let space_s = cosmic::theme::spacing().space_s;

    let Some(application) = application else {
        return widget::text::body(fl!("no-application-selected")).into();
    };

    let field = |label: String, value: String| {
        widget::row::with_capacity(2)
            .push(widget::text::body(format!("{}:", label)).width(Length::Fixed(120.0)))
            .push(widget::text::caption(value))
            .spacing(8)
    };

    let mut content = widget::column::with_capacity(8).spacing(space_s);

    content = content.push(widget::text::title4(application.candidate_name.clone()));
    content = content.push(
        widget::container(
            widget::column::with_capacity(4)
                .push(field(fl!("email"), application.candidate_email.clone()))
                .push(field(fl!("job"), application.job_title.clone()))
                .push(field(fl!("stage"), application.stage.clone()))
                .push(field(
                    fl!("applied-at"),
                    application.applied_at.format(DATE_FORMAT).to_string(),
                ))
                .spacing(4),
        )
        .padding(space_s)
        .width(Length::Fill)
        .class(cosmic::style::Container::Card),
    );

    if let Some(ref url) = application.resume_url {
        content = content.push(
            widget::button::standard(fl!("open-resume"))
                .leading_icon(icon::from_name("x-office-document-symbolic"))
                .on_press(Message::LaunchUrl(url.clone())),
        );
    }

    if let Some(ref letter) = application.cover_letter {
        content = content.push(widget::text::title4(fl!("cover-letter")));
        content = content.push(
            widget::container(
                widget::scrollable(widget::text::body(letter.clone())).height(Length::Fixed(240.0)),
            )
            .padding(space_s)
            .width(Length::Fill)
            .class(cosmic::style::Container::Card),
        );
    }

    widget::scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Stage summary view for the context drawer
pub fn stage_summary_view(summary: Option<StageSummary>) -> Element<'static, Message> {
    let space_s = cosmic::theme::spacing().space_s;

    let Some(summary) = summary else {
        return widget::text::body(fl!("no-stage-selected")).into();
    };

    let format_date = |date: Option<chrono::DateTime<chrono::Utc>>| {
        date.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    widget::column::with_capacity(4)
        .push(widget::text::title4(summary.title))
        .push(widget::text::body(fl!("stage-count", count = summary.count)))
        .push(widget::text::caption(format!(
            "{}: {}",
            fl!("oldest-application"),
            format_date(summary.oldest)
        )))
        .push(widget::text::caption(format!(
            "{}: {}",
            fl!("newest-application"),
            format_date(summary.newest)
        )))
        .spacing(space_s)
        .into()
}
