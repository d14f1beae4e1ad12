// SPDX-License-Identifier: MPL-2.0

//! Hiring pipeline state behind the board page.
//!
//! Owns the board data and the drag gesture, turns resolved moves into
//! stage update requests and keeps the board consistent with what the
//! server accepted.

use crate::api::{Application, JobPosting, Stage};
use crate::widgets::kanban::{
    BoardError, BoardState, ColumnDescriptor, ColumnId, DragGesture, ItemId, KanbanItem,
    MoveCommand,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A stage update the server still has to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub command: MoveCommand,
    /// True when the board already shows the item at its destination.
    pub applied: bool,
}

/// Request to send to the server for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageChange {
    pub item_id: ItemId,
    pub application_id: i64,
    pub stage: String,
    pub position: usize,
}

/// Figures shown when a stage header is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub title: String,
    pub count: usize,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub board: BoardState<Application>,
    pub gesture: DragGesture,
    /// Job postings for the filter; index 0 of the dropdown is "all jobs".
    pub jobs: Vec<JobPosting>,
    pub selected_job: Option<usize>,
    pub selected_application: Option<ItemId>,
    pub loading: bool,
    pending: HashMap<ItemId, PendingMove>,
}

/// Card contents for an application.
pub fn application_item(application: Application) -> KanbanItem<Application> {
    let title = application.candidate_name.clone();
    let job = application.job_title.clone();
    KanbanItem::new(application.id, title, application).with_description(job)
}

/// Numeric key the API expects for an item.
pub fn application_id(item_id: &ItemId) -> Option<i64> {
    match item_id {
        ItemId::Number(id) => Some(*id),
        ItemId::Text(text) => text.parse().ok(),
    }
}

impl PipelineState {
    /// Rebuilds the board from freshly fetched stages and applications.
    ///
    /// Applications pointing at unknown stages are skipped.
    pub fn load(&mut self, stages: Vec<Stage>, applications: Vec<Application>) {
        let columns: Vec<ColumnDescriptor> = stages
            .iter()
            .map(|stage| {
                let column = ColumnDescriptor::new(stage.id.clone(), stage.name.clone());
                match &stage.group {
                    Some(group) => column.with_group(group.clone()),
                    None => column,
                }
            })
            .collect();

        let mut by_stage: HashMap<ColumnId, Vec<Application>> = HashMap::new();
        for application in applications {
            let column = ColumnId::from(application.stage.clone());
            if stages.iter().any(|stage| stage.id == application.stage) {
                by_stage.entry(column).or_default().push(application);
            } else {
                tracing::warn!(
                    application = application.id,
                    stage = %application.stage,
                    "application in unknown stage skipped"
                );
            }
        }

        let mut board = BoardState::new(columns);
        for (column, mut applications) in by_stage {
            applications.sort_by_key(|application| (application.position, application.id));
            board.set_items(column, applications.into_iter().map(application_item).collect());
        }
        board.sync_counts();

        let duplicates = board.partition_violations();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "applications listed in more than one stage");
        }

        self.board = board;
        self.gesture = DragGesture::new();
        self.pending.clear();
        self.loading = false;
    }

    pub fn selected_job_id(&self) -> Option<i64> {
        self.selected_job
            .and_then(|index| self.jobs.get(index))
            .map(|job| job.id)
    }

    pub fn selected_job_title(&self) -> Option<&str> {
        self.selected_job
            .and_then(|index| self.jobs.get(index))
            .map(|job| job.title.as_str())
    }

    pub fn is_pending(&self, item_id: &ItemId) -> bool {
        self.pending.contains_key(item_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn selected(&self) -> Option<&Application> {
        let item_id = self.selected_application.as_ref()?;
        self.board.item(item_id).map(|item| &item.data)
    }

    /// Records a resolved move and returns the request to persist it.
    ///
    /// An item takes one move at a time; a second move is refused until the
    /// first is confirmed or rolled back. With `optimistic` set the board shows the move right away; otherwise it
    /// keeps the old order until [`confirm_move`](Self::confirm_move).
    pub fn begin_move(
        &mut self,
        command: MoveCommand,
        optimistic: bool,
    ) -> Result<StageChange, BoardError> {
        if self.pending.contains_key(&command.item_id) {
            return Err(BoardError::MovePending(command.item_id));
        }

        let stale = || BoardError::StaleMove {
            item: command.item_id.clone(),
            column: command.from_column.clone(),
            index: command.from_index,
        };
        let application_id = application_id(&command.item_id).ok_or_else(stale)?;

        let command = if optimistic {
            let applied = self.board.apply(&command)?;
            self.board.sync_counts();
            applied
        } else {
            if self.board.column(&command.to_column).is_none() {
                return Err(BoardError::UnknownColumn(command.to_column.clone()));
            }
            let at_source = self
                .board
                .items(&command.from_column)
                .get(command.from_index)
                .is_some_and(|item| item.id == command.item_id);
            if !at_source {
                return Err(stale());
            }
            command
        };

        let change = StageChange {
            item_id: command.item_id.clone(),
            application_id,
            stage: command.to_column.as_str().to_string(),
            position: command.to_index,
        };

        self.pending.insert(
            command.item_id.clone(),
            PendingMove {
                command,
                applied: optimistic,
            },
        );

        Ok(change)
    }

    /// Server accepted the move; store its copy of the application.
    pub fn confirm_move(
        &mut self,
        item_id: &ItemId,
        application: Application,
    ) -> Result<(), BoardError> {
        if let Some(pending) = self.pending.remove(item_id) {
            if !pending.applied {
                self.board.apply(&pending.command)?;
                self.board.sync_counts();
            }
        }

        if let Some(location) = self.board.locate(item_id) {
            let mut items = self.board.items(&location.column).to_vec();
            items[location.index] = application_item(application);
            self.board.set_items(location.column, items);
        }
        Ok(())
    }

    /// Server rejected the move; put the item back where it came from.
    ///
    /// Returns `Err` when the board changed too much to restore the slot, in
    /// which case the caller should reload.
    pub fn rollback_move(&mut self, item_id: &ItemId) -> Result<Option<MoveCommand>, BoardError> {
        let Some(pending) = self.pending.remove(item_id) else {
            return Ok(None);
        };
        if !pending.applied {
            return Ok(None);
        }

        let current = self.board.locate(item_id).ok_or_else(|| BoardError::StaleMove {
            item: item_id.clone(),
            column: pending.command.to_column.clone(),
            index: pending.command.to_index,
        })?;

        let revert = MoveCommand {
            item_id: item_id.clone(),
            from_column: current.column,
            from_index: current.index,
            to_column: pending.command.from_column.clone(),
            to_index: pending.command.from_index,
        };
        let applied = self.board.apply(&revert)?;
        self.board.sync_counts();
        tracing::info!(item = %item_id, column = %applied.to_column, "move rolled back");
        Ok(Some(applied))
    }

    /// Emails of everyone in a stage, one per line.
    pub fn candidate_emails(&self, column: &ColumnId) -> String {
        self.board
            .items(column)
            .iter()
            .map(|item| item.data.candidate_email.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stage_summary(&self, column: &ColumnId) -> Option<StageSummary> {
        let descriptor = self.board.column(column)?;
        let items = self.board.items(column);
        Some(StageSummary {
            title: descriptor.title.clone(),
            count: items.len(),
            oldest: items.iter().map(|item| item.data.applied_at).min(),
            newest: items.iter().map(|item| item.data.applied_at).max(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stage(id: &str, position: u32) -> Stage {
        Stage {
            id: id.to_string(),
            name: id.to_uppercase(),
            position,
            group: None,
        }
    }

    fn application(id: i64, stage: &str, position: u32, day: u32) -> Application {
        Application {
            id,
            candidate_name: format!("Candidate {}", id),
            candidate_email: format!("c{}@example.com", id),
            job_id: 1,
            job_title: "Platform Engineer".to_string(),
            stage: stage.to_string(),
            position,
            applied_at: Utc.with_ymd_and_hms(2026, 9, day, 9, 0, 0).unwrap(),
            resume_url: None,
            cover_letter: None,
        }
    }

    fn loaded() -> PipelineState {
        let mut pipeline = PipelineState::default();
        pipeline.load(
            vec![stage("applied", 0), stage("interview", 1)],
            vec![
                application(2, "applied", 1, 3),
                application(1, "applied", 0, 2),
                application(3, "interview", 0, 1),
                application(4, "rejected", 0, 1),
            ],
        );
        pipeline
    }

    fn ids(pipeline: &PipelineState, column: &str) -> Vec<ItemId> {
        pipeline
            .board
            .items(&ColumnId::from(column))
            .iter()
            .map(|item| item.id.clone())
            .collect()
    }

    fn to_interview(item: i64, from_index: usize) -> MoveCommand {
        MoveCommand {
            item_id: ItemId::from(item),
            from_column: ColumnId::from("applied"),
            from_index,
            to_column: ColumnId::from("interview"),
            to_index: 0,
        }
    }

    #[test]
    fn test_load_orders_by_position_and_skips_unknown_stage() {
        let pipeline = loaded();

        assert_eq!(ids(&pipeline, "applied"), vec![ItemId::from(1), ItemId::from(2)]);
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(3)]);
        assert_eq!(pipeline.board.len(), 3);
        assert_eq!(pipeline.board.columns()[0].item_count, Some(2));
    }

    #[test]
    fn test_optimistic_move_then_confirm() {
        let mut pipeline = loaded();
        let change = pipeline.begin_move(to_interview(2, 1), true).unwrap();

        assert_eq!(change.application_id, 2);
        assert_eq!(change.stage, "interview");
        assert_eq!(change.position, 0);
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(2), ItemId::from(3)]);
        assert!(pipeline.is_pending(&ItemId::from(2)));

        pipeline
            .confirm_move(&ItemId::from(2), application(2, "interview", 0, 3))
            .unwrap();
        assert!(!pipeline.is_pending(&ItemId::from(2)));
        let moved = pipeline.board.item(&ItemId::from(2)).unwrap();
        assert_eq!(moved.data.stage, "interview");
    }

    #[test]
    fn test_optimistic_move_rolls_back() {
        let mut pipeline = loaded();
        pipeline.begin_move(to_interview(1, 0), true).unwrap();

        let reverted = pipeline.rollback_move(&ItemId::from(1)).unwrap();

        assert!(reverted.is_some());
        assert_eq!(ids(&pipeline, "applied"), vec![ItemId::from(1), ItemId::from(2)]);
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(3)]);
        assert_eq!(pipeline.pending_count(), 0);
        assert_eq!(pipeline.board.columns()[1].item_count, Some(1));
    }

    #[test]
    fn test_rollback_survives_later_moves() {
        let mut pipeline = loaded();
        pipeline.begin_move(to_interview(1, 0), true).unwrap();
        pipeline.begin_move(to_interview(2, 0), true).unwrap();

        pipeline.rollback_move(&ItemId::from(1)).unwrap();

        assert_eq!(ids(&pipeline, "applied"), vec![ItemId::from(1)]);
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(2), ItemId::from(3)]);
    }

    #[test]
    fn test_deferred_move_waits_for_server() {
        let mut pipeline = loaded();
        pipeline.begin_move(to_interview(2, 1), false).unwrap();
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(3)]);

        assert_eq!(pipeline.rollback_move(&ItemId::from(2)).unwrap(), None);
        assert_eq!(ids(&pipeline, "applied"), vec![ItemId::from(1), ItemId::from(2)]);

        pipeline.begin_move(to_interview(2, 1), false).unwrap();
        pipeline
            .confirm_move(&ItemId::from(2), application(2, "interview", 0, 3))
            .unwrap();
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(2), ItemId::from(3)]);
    }

    #[test]
    fn test_stale_move_is_refused() {
        let mut pipeline = loaded();
        let err = pipeline.begin_move(to_interview(2, 0), false).unwrap_err();
        assert!(matches!(err, BoardError::StaleMove { .. }));
        assert_eq!(pipeline.pending_count(), 0);
    }

    #[test]
    fn test_stage_summary_and_emails() {
        let pipeline = loaded();
        let column = ColumnId::from("applied");

        let summary = pipeline.stage_summary(&column).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.title, "APPLIED");
        assert_eq!(summary.oldest, Some(Utc.with_ymd_and_hms(2026, 9, 2, 9, 0, 0).unwrap()));

        assert_eq!(
            pipeline.candidate_emails(&column),
            "c1@example.com\nc2@example.com"
        );
    }

    fn within_applied(item: i64, from_index: usize, to_index: usize) -> MoveCommand {
        MoveCommand {
            item_id: ItemId::from(item),
            from_column: ColumnId::from("applied"),
            from_index,
            to_column: ColumnId::from("applied"),
            to_index,
        }
    }

    #[test]
    fn test_deferred_second_move_waits_for_first_reply() {
        let mut pipeline = loaded();
        pipeline.begin_move(to_interview(2, 1), false).unwrap();

        let err = pipeline.begin_move(within_applied(2, 1, 0), false).unwrap_err();
        assert_eq!(err, BoardError::MovePending(ItemId::from(2)));
        assert_eq!(pipeline.pending_count(), 1);

        pipeline
            .confirm_move(&ItemId::from(2), application(2, "interview", 0, 3))
            .unwrap();
        let location = pipeline.board.locate(&ItemId::from(2)).unwrap();
        assert_eq!(location.column, ColumnId::from("interview"));
        assert_eq!(location.index, 0);
        assert_eq!(pipeline.pending_count(), 0);
    }

    #[test]
    fn test_optimistic_second_move_refused_and_rollback_reaches_origin() {
        let mut pipeline = loaded();
        pipeline.begin_move(to_interview(1, 0), true).unwrap();

        let again = MoveCommand {
            item_id: ItemId::from(1),
            from_column: ColumnId::from("interview"),
            from_index: 0,
            to_column: ColumnId::from("interview"),
            to_index: 1,
        };
        assert!(matches!(
            pipeline.begin_move(again, true),
            Err(BoardError::MovePending(_))
        ));
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(1), ItemId::from(3)]);

        pipeline.rollback_move(&ItemId::from(1)).unwrap();
        assert_eq!(ids(&pipeline, "applied"), vec![ItemId::from(1), ItemId::from(2)]);
        assert_eq!(pipeline.pending_count(), 0);

        assert!(pipeline.begin_move(to_interview(1, 0), true).is_ok());
    }

    #[test]
    fn test_replies_for_different_items_in_any_order() {
        let mut pipeline = loaded();
        pipeline.begin_move(to_interview(1, 0), true).unwrap();
        pipeline.begin_move(to_interview(2, 0), true).unwrap();
        assert_eq!(pipeline.pending_count(), 2);

        pipeline
            .confirm_move(&ItemId::from(2), application(2, "interview", 0, 3))
            .unwrap();
        assert_eq!(pipeline.pending_count(), 1);
        assert!(pipeline.is_pending(&ItemId::from(1)));

        pipeline.rollback_move(&ItemId::from(1)).unwrap();
        assert_eq!(ids(&pipeline, "applied"), vec![ItemId::from(1)]);
        assert_eq!(ids(&pipeline, "interview"), vec![ItemId::from(2), ItemId::from(3)]);
        assert_eq!(pipeline.pending_count(), 0);
    }

    #[test]
    fn test_cards_carry_job_title_as_description() {
        let pipeline = loaded();
        let item = pipeline.board.item(&ItemId::from(1)).unwrap();
        assert_eq!(item.description.as_deref(), Some("Platform Engineer"));
    }

    #[test]
    fn test_application_id_from_text() {
        assert_eq!(application_id(&ItemId::from("17")), Some(17));
        assert_eq!(application_id(&ItemId::from("abc")), None);
    }
}
