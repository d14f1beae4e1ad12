// SPDX-License-Identifier: MPL-2.0

//! Drag gesture tracking and move-intent resolution.
//!
//! A gesture runs `Idle -> Dragging -> {Cancelled | Unchanged | Resolved} -> Idle`.
//! The gesture always lands back in `Idle` on release, whatever the owner
//! later does with the resolved [`MoveCommand`].

use super::column::ColumnId;
use super::item::ItemId;
use super::message::{KanbanEvent, KanbanMessage};

/// A slot on the board: column plus position inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragLocation {
    pub column: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// Raw result of a finished drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult {
    pub item_id: ItemId,
    pub source: DragLocation,
    /// `None` when the item was released outside any accepting target.
    pub destination: Option<DragLocation>,
}

/// A validated instruction to relocate one item.
///
/// `to_index` is counted after the item has been taken out of its source
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveCommand {
    pub item_id: ItemId,
    pub from_column: ColumnId,
    pub from_index: usize,
    pub to_column: ColumnId,
    pub to_index: usize,
}

impl MoveCommand {
    /// The command that undoes this one.
    pub fn inverse(&self) -> MoveCommand {
        MoveCommand {
            item_id: self.item_id.clone(),
            from_column: self.to_column.clone(),
            from_index: self.to_index,
            to_column: self.from_column.clone(),
            to_index: self.from_index,
        }
    }

    /// True when the item changes column, not just position.
    pub fn changes_column(&self) -> bool {
        self.from_column != self.to_column
    }
}

/// Turns a drag result into a move command, or `None` for a no-op.
pub fn resolve_move(result: &DragResult) -> Option<MoveCommand> {
    let destination = result.destination.as_ref()?;

    if *destination == result.source {
        return None;
    }

    Some(MoveCommand {
        item_id: result.item_id.clone(),
        from_column: result.source.column.clone(),
        from_index: result.source.index,
        to_column: destination.column.clone(),
        to_index: destination.index,
    })
}

/// What the pointer currently hovers during a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// An item slot; the dropped item takes over the hovered item's index.
    ///
    /// Moving up or across columns lands before the hovered item, moving down
    /// its own column lands after it.
    Slot(DragLocation),
    /// A column's free area; dropping appends.
    ColumnEnd { column: ColumnId, len: usize },
}

impl DropTarget {
    pub fn column(&self) -> &ColumnId {
        match self {
            DropTarget::Slot(location) => &location.column,
            DropTarget::ColumnEnd { column, .. } => column,
        }
    }

    /// Destination slot for an item picked up at `source`.
    pub fn location(&self, source: &DragLocation) -> DragLocation {
        match self {
            DropTarget::Slot(location) => location.clone(),
            DropTarget::ColumnEnd { column, len } => {
                // The dragged item no longer counts once it leaves its own column.
                let index = if *column == source.column {
                    len.saturating_sub(1)
                } else {
                    *len
                };
                DragLocation {
                    column: column.clone(),
                    index,
                }
            }
        }
    }
}

/// An in-flight drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub item_id: ItemId,
    pub source: DragLocation,
    pub group: Option<String>,
    pub target: Option<DropTarget>,
    /// Set once the pointer left the source slot.
    pub moved: bool,
}

/// Phase of the current gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// How the last gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Released outside any target, or aborted.
    Cancelled,
    /// Dropped back on its own slot.
    Unchanged,
    Resolved(MoveCommand),
}

/// Drag gesture state, owned by the parent next to the board data.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    phase: GesturePhase,
    last_outcome: Option<GestureOutcome>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    /// The drag in progress, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.phase {
            GesturePhase::Dragging(drag) => Some(drag),
            GesturePhase::Idle => None,
        }
    }

    pub fn last_outcome(&self) -> Option<&GestureOutcome> {
        self.last_outcome.as_ref()
    }

    /// True if `item_id` is the item being dragged.
    pub fn is_dragging(&self, item_id: &ItemId) -> bool {
        self.active().is_some_and(|drag| &drag.item_id == item_id)
    }

    /// True if the pointer is over `column` with an accepted drag.
    pub fn is_over(&self, column: &ColumnId) -> bool {
        self.active()
            .and_then(|drag| drag.target.as_ref())
            .is_some_and(|target| target.column() == column)
    }

    /// True if the pointer hovers exactly this slot.
    pub fn is_over_slot(&self, location: &DragLocation) -> bool {
        self.active()
            .and_then(|drag| drag.target.as_ref())
            .is_some_and(|target| matches!(target, DropTarget::Slot(slot) if slot == location))
    }

    /// Aborts any drag in progress.
    pub fn cancel(&mut self) {
        if let GesturePhase::Dragging(drag) = std::mem::take(&mut self.phase) {
            tracing::debug!(item = %drag.item_id, "drag cancelled");
            self.last_outcome = Some(GestureOutcome::Cancelled);
        }
    }

    /// Feeds a widget message through the state machine.
    pub fn update(&mut self, message: KanbanMessage) -> Option<KanbanEvent> {
        match message {
            KanbanMessage::DragStart {
                location,
                item_id,
                group,
            } => {
                tracing::debug!(item = %item_id, column = %location.column, index = location.index, "drag started");
                self.phase = GesturePhase::Dragging(ActiveDrag {
                    item_id,
                    target: Some(DropTarget::Slot(location.clone())),
                    source: location,
                    group,
                    moved: false,
                });
                None
            }

            KanbanMessage::EnterSlot { location, group } => {
                if let GesturePhase::Dragging(drag) = &mut self.phase {
                    if drag.group == group {
                        if location != drag.source {
                            drag.moved = true;
                        }
                        drag.target = Some(DropTarget::Slot(location));
                    } else {
                        drag.target = None;
                    }
                }
                None
            }

            KanbanMessage::ExitSlot { location, len } => {
                if let GesturePhase::Dragging(drag) = &mut self.phase {
                    if location == drag.source {
                        drag.moved = true;
                    }
                    let over_slot = matches!(&drag.target, Some(DropTarget::Slot(slot)) if *slot == location);
                    if over_slot {
                        drag.target = Some(DropTarget::ColumnEnd {
                            column: location.column,
                            len,
                        });
                    }
                }
                None
            }

            KanbanMessage::EnterColumn { column, len, group } => {
                if let GesturePhase::Dragging(drag) = &mut self.phase {
                    if drag.group != group {
                        drag.target = None;
                    } else if drag.target.as_ref().map(DropTarget::column) != Some(&column) {
                        if column != drag.source.column {
                            drag.moved = true;
                        }
                        drag.target = Some(DropTarget::ColumnEnd { column, len });
                    }
                }
                None
            }

            KanbanMessage::ExitColumn(column) => {
                if let GesturePhase::Dragging(drag) = &mut self.phase {
                    drag.moved = true;
                    if drag.target.as_ref().map(DropTarget::column) == Some(&column) {
                        drag.target = None;
                    }
                }
                None
            }

            KanbanMessage::Release => self.release(),

            KanbanMessage::Cancel => {
                self.cancel();
                None
            }

            KanbanMessage::HeaderClicked(column) => Some(KanbanEvent::HeaderClicked(column)),

            KanbanMessage::HeaderAction(column) => Some(KanbanEvent::HeaderAction(column)),
        }
    }

    fn release(&mut self) -> Option<KanbanEvent> {
        let GesturePhase::Dragging(drag) = std::mem::take(&mut self.phase) else {
            return None;
        };

        let destination = drag.target.as_ref().map(|target| target.location(&drag.source));
        let result = DragResult {
            item_id: drag.item_id.clone(),
            source: drag.source,
            destination,
        };

        match resolve_move(&result) {
            Some(command) => {
                tracing::debug!(?command, "drag resolved");
                self.last_outcome = Some(GestureOutcome::Resolved(command.clone()));
                Some(KanbanEvent::Move(command))
            }
            None if result.destination.is_none() => {
                tracing::debug!(item = %result.item_id, "drag released outside any target");
                self.last_outcome = Some(GestureOutcome::Cancelled);
                None
            }
            None => {
                self.last_outcome = Some(GestureOutcome::Unchanged);
                if drag.moved {
                    None
                } else {
                    Some(KanbanEvent::Activate(result.item_id))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn start(gesture: &mut DragGesture, column: &str, index: usize, item: i64) {
        gesture.update(KanbanMessage::DragStart {
            location: DragLocation::new(column, index),
            item_id: ItemId::from(item),
            group: None,
        });
    }

    #[test]
    fn test_todo_to_done_yields_move() {
        let result = DragResult {
            item_id: ItemId::from(1),
            source: DragLocation::new("todo", 0),
            destination: Some(DragLocation::new("done", 0)),
        };

        assert_eq!(
            resolve_move(&result),
            Some(MoveCommand {
                item_id: ItemId::from(1),
                from_column: ColumnId::from("todo"),
                from_index: 0,
                to_column: ColumnId::from("done"),
                to_index: 0,
            })
        );
    }

    #[test]
    fn test_same_slot_is_noop() {
        let result = DragResult {
            item_id: ItemId::from(1),
            source: DragLocation::new("todo", 0),
            destination: Some(DragLocation::new("todo", 0)),
        };
        assert_eq!(resolve_move(&result), None);
    }

    #[test]
    fn test_missing_destination_is_noop() {
        let result = DragResult {
            item_id: ItemId::from(1),
            source: DragLocation::new("todo", 0),
            destination: None,
        };
        assert_eq!(resolve_move(&result), None);
    }

    #[test]
    fn test_inverse_swaps_endpoints() {
        let command = MoveCommand {
            item_id: ItemId::from(3),
            from_column: ColumnId::from("screening"),
            from_index: 2,
            to_column: ColumnId::from("interview"),
            to_index: 0,
        };
        let inverse = command.inverse();
        assert_eq!(inverse.from_column, ColumnId::from("interview"));
        assert_eq!(inverse.to_index, 2);
        assert_eq!(inverse.inverse(), command);
    }

    #[test]
    fn test_gesture_resolves_cross_column_move() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::EnterColumn {
            column: ColumnId::from("done"),
            len: 0,
            group: None,
        });

        let event = gesture.update(KanbanMessage::Release);

        assert!(gesture.is_idle());
        match event {
            Some(KanbanEvent::Move(command)) => {
                assert_eq!(command.to_column, ColumnId::from("done"));
                assert_eq!(command.to_index, 0);
            }
            other => panic!("expected a move, got {:?}", other),
        }
    }

    #[test]
    fn test_release_in_place_activates_without_move() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);

        let event = gesture.update(KanbanMessage::Release);

        assert_eq!(event, Some(KanbanEvent::Activate(ItemId::from(1))));
        assert_eq!(gesture.last_outcome(), Some(&GestureOutcome::Unchanged));
        assert!(gesture.is_idle());
    }

    #[test]
    fn test_return_to_origin_after_moving_is_silent() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::EnterSlot {
            location: DragLocation::new("done", 0),
            group: None,
        });
        gesture.update(KanbanMessage::EnterSlot {
            location: DragLocation::new("todo", 0),
            group: None,
        });

        assert_eq!(gesture.update(KanbanMessage::Release), None);
        assert_eq!(gesture.last_outcome(), Some(&GestureOutcome::Unchanged));
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::ExitColumn(ColumnId::from("todo")));

        assert_eq!(gesture.update(KanbanMessage::Release), None);
        assert_eq!(gesture.last_outcome(), Some(&GestureOutcome::Cancelled));
        assert!(gesture.is_idle());
    }

    #[test]
    fn test_escape_cancels() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::EnterColumn {
            column: ColumnId::from("done"),
            len: 3,
            group: None,
        });

        assert_eq!(gesture.update(KanbanMessage::Cancel), None);
        assert!(gesture.is_idle());
        assert_eq!(gesture.update(KanbanMessage::Release), None);
        assert_eq!(gesture.last_outcome(), Some(&GestureOutcome::Cancelled));
    }

    #[test]
    fn test_foreign_group_is_not_a_target() {
        let mut gesture = DragGesture::new();
        gesture.update(KanbanMessage::DragStart {
            location: DragLocation::new("applied", 0),
            item_id: ItemId::from(9),
            group: Some("applications".to_string()),
        });
        gesture.update(KanbanMessage::EnterColumn {
            column: ColumnId::from("archive"),
            len: 2,
            group: Some("offers".to_string()),
        });

        assert_eq!(gesture.update(KanbanMessage::Release), None);
        assert_eq!(gesture.last_outcome(), Some(&GestureOutcome::Cancelled));
    }

    #[test]
    fn test_column_end_within_own_column() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::ExitColumn(ColumnId::from("todo")));
        gesture.update(KanbanMessage::EnterColumn {
            column: ColumnId::from("todo"),
            len: 3,
            group: None,
        });

        match gesture.update(KanbanMessage::Release) {
            Some(KanbanEvent::Move(command)) => assert_eq!(command.to_index, 2),
            other => panic!("expected a move, got {:?}", other),
        }
    }

    fn expect_move(event: Option<KanbanEvent>) -> MoveCommand {
        match event {
            Some(KanbanEvent::Move(command)) => command,
            other => panic!("expected a move, got {:?}", other),
        }
    }

    #[test]
    fn test_free_area_after_hovering_a_card_appends() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::EnterColumn {
            column: ColumnId::from("done"),
            len: 2,
            group: None,
        });
        gesture.update(KanbanMessage::EnterSlot {
            location: DragLocation::new("done", 1),
            group: None,
        });
        gesture.update(KanbanMessage::ExitSlot {
            location: DragLocation::new("done", 1),
            len: 2,
        });

        let command = expect_move(gesture.update(KanbanMessage::Release));
        assert_eq!(command.to_column, ColumnId::from("done"));
        assert_eq!(command.to_index, 2);
    }

    #[test]
    fn test_leaving_source_card_targets_own_column_end() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::ExitSlot {
            location: DragLocation::new("todo", 0),
            len: 3,
        });

        let command = expect_move(gesture.update(KanbanMessage::Release));
        assert_eq!(command.to_column, ColumnId::from("todo"));
        assert_eq!(command.to_index, 2);
    }

    #[test]
    fn test_stale_slot_exit_keeps_current_target() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::EnterSlot {
            location: DragLocation::new("done", 1),
            group: None,
        });
        gesture.update(KanbanMessage::ExitSlot {
            location: DragLocation::new("todo", 0),
            len: 3,
        });

        let command = expect_move(gesture.update(KanbanMessage::Release));
        assert_eq!(command.to_column, ColumnId::from("done"));
        assert_eq!(command.to_index, 1);
    }

    #[test]
    fn test_round_trip_through_single_item_column_does_not_activate() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::ExitColumn(ColumnId::from("todo")));
        gesture.update(KanbanMessage::EnterColumn {
            column: ColumnId::from("todo"),
            len: 1,
            group: None,
        });

        assert_eq!(gesture.update(KanbanMessage::Release), None);
        assert_eq!(gesture.last_outcome(), Some(&GestureOutcome::Unchanged));
    }

    #[test]
    fn test_downward_slot_drop_lands_after_hovered_item() {
        let mut gesture = DragGesture::new();
        start(&mut gesture, "todo", 0, 1);
        gesture.update(KanbanMessage::EnterSlot {
            location: DragLocation::new("todo", 2),
            group: None,
        });

        let command = expect_move(gesture.update(KanbanMessage::Release));
        let mut order = vec!["A", "B", "C"];
        let item = order.remove(command.from_index);
        order.insert(command.to_index, item);
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_header_messages_pass_through() {
        let mut gesture = DragGesture::new();
        assert_eq!(
            gesture.update(KanbanMessage::HeaderAction(ColumnId::from("todo"))),
            Some(KanbanEvent::HeaderAction(ColumnId::from("todo")))
        );
        assert!(gesture.last_outcome().is_none());
    }

    fn location_strategy() -> impl Strategy<Value = DragLocation> {
        (prop::sample::select(vec!["applied", "screening", "interview", "offer"]), 0usize..8)
            .prop_map(|(column, index)| DragLocation::new(column, index))
    }

    proptest! {
        #[test]
        fn proptest_missing_destination_never_moves(source in location_strategy(), id in any::<i64>()) {
            let result = DragResult { item_id: ItemId::from(id), source, destination: None };
            prop_assert_eq!(resolve_move(&result), None);
        }

        #[test]
        fn proptest_distinct_slots_preserve_identity(
            source in location_strategy(),
            destination in location_strategy(),
            id in any::<i64>(),
        ) {
            prop_assume!(source != destination);
            let result = DragResult {
                item_id: ItemId::from(id),
                source: source.clone(),
                destination: Some(destination.clone()),
            };

            let command = resolve_move(&result).expect("distinct slots must move");
            prop_assert_eq!(command.item_id, ItemId::from(id));
            prop_assert_eq!(command.from_column, source.column);
            prop_assert_eq!(command.from_index, source.index);
            prop_assert_eq!(command.to_column, destination.column);
            prop_assert_eq!(command.to_index, destination.index);
        }

        #[test]
        fn proptest_resolver_is_deterministic(
            source in location_strategy(),
            destination in prop::option::of(location_strategy()),
        ) {
            let result = DragResult { item_id: ItemId::from("x"), source, destination };
            prop_assert_eq!(resolve_move(&result), resolve_move(&result));
        }
    }
}
