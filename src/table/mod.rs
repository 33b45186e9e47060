// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editable directory table.
//!
//! Rows are keyed by a stable [`RowId`], so sorting never disturbs selection. Every effective
//! mutation bumps the revision and queues a [`TableChange`] for whoever drives the UI.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;
use smol_str::SmolStr;

use crate::model::RowId;

pub mod columns;
pub mod natural;

pub use columns::{find_preferred_column, normalize_label};
pub use natural::natural_cmp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    cells: Vec<String>,
}

impl Row {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        column: usize,
        direction: SortDirection,
    },
}

/// Where [`TableStore::apply_field_values`] puts columns it has to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPlacement {
    Append,
    /// Insert the first new column at this index and each following one right after it.
    At(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChange {
    Loaded { columns: usize, rows: usize },
    ColumnInserted { index: usize, name: SmolStr },
    CellsUpdated { column: usize },
    Sorted { column: usize, direction: SortDirection },
    SelectionChanged { selected: usize },
    RowsDeleted { removed: usize },
}

/// Read-only `{columns, rows}` view handed to CSV/spreadsheet exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct TableStore {
    columns: Vec<SmolStr>,
    rows: Vec<Row>,
    selected: BTreeSet<RowId>,
    sort: SortState,
    next_row_id: u64,
    rev: u64,
    changes: Vec<TableChange>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[SmolStr] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.selected.iter().copied()
    }

    /// Drains the change notifications queued since the last call.
    pub fn take_changes(&mut self) -> Vec<TableChange> {
        std::mem::take(&mut self.changes)
    }

    fn notify(&mut self, change: TableChange) {
        self.rev = self.rev.wrapping_add(1);
        self.changes.push(change);
    }

    fn next_id(&mut self) -> RowId {
        let id = RowId::new(self.next_row_id);
        self.next_row_id += 1;
        id
    }

    /// Replaces the whole table. Rows are padded with empty cells or truncated to the column
    /// count; sort and selection reset.
    pub fn load<C, R, S>(&mut self, columns: C, rows: R)
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        R: IntoIterator<Item = Vec<S>>,
        S: Into<String>,
    {
        self.columns = columns::dedupe_labels(columns);
        let width = self.columns.len();
        let mut loaded = Vec::new();
        for cells in rows {
            let mut cells = cells.into_iter().map(Into::into).collect::<Vec<String>>();
            cells.resize(width, String::new());
            let id = self.next_id();
            loaded.push(Row { id, cells });
        }
        self.rows = loaded;
        self.selected.clear();
        self.sort = SortState::Unsorted;

        tracing::debug!(columns = width, rows = self.rows.len(), "table.load");
        self.notify(TableChange::Loaded {
            columns: width,
            rows: self.rows.len(),
        });
    }

    /// Loosely-typed variant of [`Self::load`] for parsed spreadsheet/JSON payloads.
    ///
    /// A non-array `columns` or `rows` yields an empty table. Non-array rows become empty rows;
    /// scalar cells are stringified and `null` reads as empty.
    pub fn load_json(&mut self, columns: &Value, rows: &Value) {
        let (Value::Array(columns), Value::Array(rows)) = (columns, rows) else {
            tracing::debug!("table.load_json: non-array input, clearing");
            self.load(Vec::<String>::new(), Vec::<Vec<String>>::new());
            return;
        };
        let columns = columns.iter().map(cell_text).collect::<Vec<_>>();
        let rows = rows
            .iter()
            .map(|row| match row {
                Value::Array(cells) => cells.iter().map(cell_text).collect(),
                _ => Vec::new(),
            })
            .collect::<Vec<Vec<String>>>();
        self.load(columns, rows);
    }

    /// Returns the index of `name` (case-insensitive), inserting it at
    /// `clamp(preferred_index, 0, column_count)` when absent.
    pub fn ensure_column(&mut self, name: &str, preferred_index: usize) -> usize {
        if let Some(idx) = columns::position_of(&self.columns, name) {
            return idx;
        }

        let index = preferred_index.min(self.columns.len());
        let name = SmolStr::new(name.trim());
        self.columns.insert(index, name.clone());
        for row in &mut self.rows {
            row.cells.insert(index, String::new());
        }
        if let SortState::Sorted { column, .. } = &mut self.sort {
            if *column >= index {
                *column += 1;
            }
        }

        tracing::debug!(index, name = %name, "table.ensure_column");
        self.notify(TableChange::ColumnInserted { index, name });
        index
    }

    /// Writes `values_by_label[label][row_index]` into each row, creating columns as needed.
    ///
    /// Missing labels or short value lists write empty cells.
    pub fn apply_field_values<L: AsRef<str>>(
        &mut self,
        labels: &[L],
        values_by_label: &BTreeMap<String, Vec<String>>,
        placement: ColumnPlacement,
    ) {
        let mut next_index = match placement {
            ColumnPlacement::Append => None,
            ColumnPlacement::At(index) => Some(index),
        };

        for label in labels {
            let label = label.as_ref();
            let preferred = next_index.unwrap_or(self.columns.len());
            let column = self.ensure_column(label, preferred);
            if next_index.is_some() {
                next_index = Some(column + 1);
            }

            let values = values_by_label
                .get(label)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            for (row_index, row) in self.rows.iter_mut().enumerate() {
                row.cells[column] = values.get(row_index).cloned().unwrap_or_default();
            }
            self.notify(TableChange::CellsUpdated { column });
        }
    }

    /// Sorts rows by `column` using [`natural_cmp`].
    ///
    /// Re-sorting the current column with `toggle_direction` flips the direction; any other
    /// column starts ascending. Descending order is the exact reverse of the stable ascending
    /// order.
    pub fn sort(&mut self, column: usize, toggle_direction: bool) {
        if column >= self.columns.len() {
            return;
        }

        let direction = match self.sort {
            SortState::Sorted {
                column: current,
                direction,
            } if current == column => {
                if toggle_direction {
                    direction.flipped()
                } else {
                    direction
                }
            }
            _ => SortDirection::Ascending,
        };

        self.rows.sort_by(|a, b| {
            natural_cmp(
                a.cell(column).unwrap_or_default(),
                b.cell(column).unwrap_or_default(),
            )
        });
        if direction == SortDirection::Descending {
            self.rows.reverse();
        }
        self.sort = SortState::Sorted { column, direction };

        tracing::debug!(column, ?direction, "table.sort");
        self.notify(TableChange::Sorted { column, direction });
    }

    pub fn toggle_row_selection(&mut self, id: RowId, selected: bool) {
        if self.row(id).is_none() {
            return;
        }
        let changed = if selected {
            self.selected.insert(id)
        } else {
            self.selected.remove(&id)
        };
        if changed {
            self.notify(TableChange::SelectionChanged {
                selected: self.selected.len(),
            });
        }
    }

    pub fn select_all(&mut self, selected: bool) {
        let before = self.selected.len();
        if selected {
            self.selected = self.rows.iter().map(Row::id).collect();
        } else {
            self.selected.clear();
        }
        if before != self.selected.len() {
            self.notify(TableChange::SelectionChanged {
                selected: self.selected.len(),
            });
        }
    }

    /// Removes every selected row, keeping the order of the rest. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selected.is_empty() {
            return 0;
        }
        let before = self.rows.len();
        let selected = std::mem::take(&mut self.selected);
        self.rows.retain(|row| !selected.contains(&row.id));
        let removed = before - self.rows.len();

        tracing::debug!(removed, "table.delete_selected");
        self.notify(TableChange::RowsDeleted { removed });
        removed
    }

    pub fn find_preferred_column<S: AsRef<str>>(&self, candidates: &[S]) -> Option<usize> {
        find_preferred_column(&self.columns, candidates)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            columns: self.columns.iter().map(ToString::to_string).collect(),
            rows: self.rows.iter().map(|row| row.cells.clone()).collect(),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
