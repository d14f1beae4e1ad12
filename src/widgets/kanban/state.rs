// SPDX-License-Identifier: MPL-2.0

//! Board data owned by the parent: columns and the items inside them.

use super::column::{ColumnDescriptor, ColumnId};
use super::drag::{DragLocation, MoveCommand};
use super::item::{ItemId, KanbanItem};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),
    #[error("item {item} is no longer at {column}[{index}]")]
    StaleMove {
        item: ItemId,
        column: ColumnId,
        index: usize,
    },
    #[error("item {0} still has a move waiting for confirmation")]
    MovePending(ItemId),
}

/// Columns in display order plus each column's ordered items.
///
/// The board widget only reads this; the parent applies moves to it.
#[derive(Debug, Clone)]
pub struct BoardState<D> {
    columns: Vec<ColumnDescriptor>,
    items: HashMap<ColumnId, Vec<KanbanItem<D>>>,
}

impl<D> Default for BoardState<D> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<D> BoardState<D> {
    /// Creates a board with empty columns.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        let items = columns
            .iter()
            .map(|column| (column.id.clone(), Vec::new()))
            .collect();
        Self { columns, items }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| &column.id == id)
    }

    /// Items of a column; unknown columns read as empty.
    pub fn items(&self, column: &ColumnId) -> &[KanbanItem<D>] {
        self.items.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the items of a column.
    pub fn set_items(&mut self, column: ColumnId, items: Vec<KanbanItem<D>>) {
        self.items.insert(column, items);
    }

    /// Total number of items across all columns.
    pub fn len(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds where an item currently sits.
    pub fn locate(&self, item_id: &ItemId) -> Option<DragLocation> {
        self.columns.iter().find_map(|column| {
            self.items(&column.id)
                .iter()
                .position(|item| &item.id == item_id)
                .map(|index| DragLocation::new(column.id.clone(), index))
        })
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&KanbanItem<D>> {
        let location = self.locate(item_id)?;
        self.items(&location.column).get(location.index)
    }

    /// Sets every column's badge to its current item count.
    pub fn sync_counts(&mut self) {
        for column in &mut self.columns {
            column.item_count = Some(self.items.get(&column.id).map_or(0, Vec::len));
        }
    }

    /// Moves an item as described by `command`.
    ///
    /// Returns the command actually applied: `to_index` is clamped to the
    /// destination length, so its inverse restores the previous order exactly.
    pub fn apply(&mut self, command: &MoveCommand) -> Result<MoveCommand, BoardError> {
        if !self.items.contains_key(&command.to_column) {
            return Err(BoardError::UnknownColumn(command.to_column.clone()));
        }

        let stale = || BoardError::StaleMove {
            item: command.item_id.clone(),
            column: command.from_column.clone(),
            index: command.from_index,
        };

        let source = self
            .items
            .get_mut(&command.from_column)
            .ok_or_else(|| BoardError::UnknownColumn(command.from_column.clone()))?;
        if source.get(command.from_index).map(|item| &item.id) != Some(&command.item_id) {
            return Err(stale());
        }
        let item = source.remove(command.from_index);

        let destination = self
            .items
            .get_mut(&command.to_column)
            .ok_or_else(|| BoardError::UnknownColumn(command.to_column.clone()))?;
        let to_index = command.to_index.min(destination.len());
        destination.insert(to_index, item);

        Ok(MoveCommand {
            to_index,
            ..command.clone()
        })
    }

    /// Items that show up more than once across the board.
    ///
    /// Rendering tolerates these; callers may log them.
    pub fn partition_violations(&self) -> Vec<ItemId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for column in &self.columns {
            for item in self.items(&column.id) {
                if !seen.insert(&item.id) && !duplicates.contains(&item.id) {
                    duplicates.push(item.id.clone());
                }
            }
        }
        duplicates
    }
}
