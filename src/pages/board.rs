// SPDX-License-Identifier: MPL-2.0

//! Pipeline board page view for the Stageboard application.

use crate::api::JobPosting;
use crate::app::{AppModel, Message};
use crate::fl;
use crate::pages::widgets;
use crate::widgets::kanban::KanbanBoard;
use cosmic::iced::alignment::{Horizontal, Vertical};
use cosmic::iced::{Alignment, Length};
use cosmic::prelude::*;
use cosmic::widget::{self, icon};

/// Dropdown index of the "all jobs" entry.
pub const ALL_JOBS: usize = 0;

/// Maps a job filter dropdown index to an index into the job list.
pub fn job_index(dropdown_index: usize) -> Option<usize> {
    dropdown_index.checked_sub(1)
}

/// Job filter entry: the title followed by department and location when known.
pub fn job_label(job: &JobPosting) -> String {
    let details: Vec<&str> = [job.department.as_deref(), job.location.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if details.is_empty() {
        job.title.clone()
    } else {
        format!("{} ({})", job.title, details.join(", "))
    }
}

/// View for the Board page
pub fn view(app: &AppModel, space_s: u16, space_m: u16) -> Element<'_, Message> {
    let pipeline = &app.pipeline;

    let selected = pipeline.selected_job.map(|index| index + 1).unwrap_or(ALL_JOBS);

    let mut header = widget::row::with_capacity(5)
        .push(widget::text::title1(fl!("pipeline")).width(Length::Fill))
        .push(
            widget::dropdown(&app.job_names, Some(selected), Message::SelectJob)
                .width(Length::Fixed(240.0)),
        )
        .push(
            widget::button::icon(icon::from_name("view-refresh-symbolic"))
                .on_press(Message::FetchBoard),
        )
        .push(widgets::connection_status_badge(&app.connection_status))
        .spacing(space_s)
        .align_y(Alignment::Center);

    if pipeline.pending_count() > 0 {
        header = header.push(widget::text::caption(fl!(
            "pending-moves",
            count = pipeline.pending_count()
        )));
    }

    let body: Element<'_, Message> = if pipeline.loading {
        widget::container(widget::text::body(fl!("loading")))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    } else if pipeline.board.columns().is_empty() {
        widget::container(
            widget::column::with_capacity(2)
                .push(widget::text::title4(fl!("no-stages")))
                .push(widget::button::suggested(fl!("load-board")).on_press(Message::FetchBoard))
                .spacing(space_s)
                .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
    } else {
        let show_applied_date = app.config.show_applied_date;
        let mut board = KanbanBoard::new(&pipeline.board, &pipeline.gesture, Message::Kanban)
            .column_width(Length::Fixed(280.0))
            .spacing(space_s)
            .empty_text(fl!("no-applications"))
            .on_header_click()
            .header_action("edit-copy-symbolic")
            .item_view(move |item, context| {
                widgets::application_card(
                    item,
                    context,
                    show_applied_date,
                    pipeline.is_pending(&item.id),
                )
            });

        if let Some(title) = pipeline.selected_job_title() {
            board = board.title(title);
        }

        board.into()
    };

    widget::column::with_capacity(2)
        .push(header)
        .push(body)
        .spacing(space_m)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_index_skips_all_jobs_entry() {
        assert_eq!(job_index(ALL_JOBS), None);
        assert_eq!(job_index(1), Some(0));
        assert_eq!(job_index(4), Some(3));
    }

    #[test]
    fn test_job_label_includes_known_details() {
        let mut job = JobPosting {
            id: 4,
            title: "Compiler Engineer".to_string(),
            department: Some("Platform".to_string()),
            location: Some("Berlin".to_string()),
        };
        assert_eq!(job_label(&job), "Compiler Engineer (Platform, Berlin)");

        job.department = None;
        assert_eq!(job_label(&job), "Compiler Engineer (Berlin)");

        job.location = None;
        assert_eq!(job_label(&job), "Compiler Engineer");
    }
}
