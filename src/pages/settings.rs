// SPDX-License-Identifier: MPL-2.0

//! Settings page view for the Stageboard application.

use crate::app::{AppModel, ConnectionStatus, Message, SettingsStatus};
use crate::fl;
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget;

/// View for the Settings page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let header = widget::text::title1(fl!("settings"));

    let server_section = cosmic::widget::settings::section()
        .title(fl!("server-config"))
        .add(
            cosmic::widget::settings::item::builder(fl!("server-url"))
                .description(fl!("server-url-description"))
                .control(
                    widget::text_input(fl!("server-url-placeholder"), &app.server_url_input)
                        .on_input(Message::ServerUrlChanged)
                        .width(Length::Fixed(300.0)),
                ),
        )
        .add(
            cosmic::widget::settings::item::builder(fl!("auth-token"))
                .description(fl!("auth-token-description"))
                .control(
                    widget::secure_input(
                        fl!("auth-token-placeholder"),
                        &app.auth_token_input,
                        None,
                        true,
                    )
                    .on_input(Message::AuthTokenChanged)
                    .width(Length::Fixed(300.0)),
                ),
        );

    let board_section = cosmic::widget::settings::section()
        .title(fl!("board-settings"))
        .add(
            cosmic::widget::settings::item::builder(fl!("optimistic-moves"))
                .description(fl!("optimistic-moves-description"))
                .toggler(app.config.optimistic_moves, Message::ToggleOptimisticMoves),
        )
        .add(
            cosmic::widget::settings::item::builder(fl!("show-applied-date"))
                .description(fl!("show-applied-date-description"))
                .toggler(app.config.show_applied_date, Message::ToggleAppliedDate),
        );

    let connection_status_text = match &app.connection_status {
        ConnectionStatus::Disconnected => fl!("status-disconnected"),
        ConnectionStatus::Connecting => fl!("status-connecting"),
        ConnectionStatus::Connected => fl!("status-connected"),
        ConnectionStatus::Error(e) => format!("{}: {}", fl!("status-error"), e),
    };

    let save_status = match &app.settings_status {
        SettingsStatus::Idle => None,
        SettingsStatus::Saved => Some((fl!("settings-saved"), cosmic::theme::Button::Suggested)),
        SettingsStatus::Error(e) => Some((e.clone(), cosmic::theme::Button::Destructive)),
    };

    let mut buttons = widget::row::with_capacity(4)
        .push(widget::button::standard(fl!("save")).on_press(Message::SaveSettings))
        .push(widget::button::suggested(fl!("test-connection")).on_press(Message::TestConnection))
        .push(widget::text::body(connection_status_text))
        .spacing(space_s)
        .align_y(Alignment::Center);

    if let Some((text, style)) = save_status {
        buttons = buttons.push(widget::button::custom(widget::text::caption(text)).class(style));
    }

    widget::scrollable(
        widget::column::with_capacity(4)
            .push(header)
            .push(server_section)
            .push(board_section)
            .push(buttons)
            .spacing(space_m)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}
