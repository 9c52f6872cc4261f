//! Screen state shared by the room, guest and reservation editors.
//!
//! A `ListEditor` owns the in-memory entity list, the form bound to it, the
//! table cursor and the filter/sort view. `ListEditor::apply` is the only way
//! to change it: each action either mutates memory and asks the caller to
//! persist, or fails without touching anything. The view keeps, for every
//! visible row, the position of its record in the underlying list, so edits on
//! a filtered or sorted table always land on the right record.

mod forms;

use regex::{Regex, RegexBuilder};

use crate::errors::{EditError, RowAction};
use crate::models::TableRow;

pub use forms::{
    CustomerForm, Field, FieldKind, Picker, RecordForm, ReservationForm, RoomForm,
};

/// Where the editor sits in its add/edit cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Blank form.
    Idle,
    /// The user typed into the form.
    Composing,
    /// The form holds a copy of the record at this underlying position.
    SelectedForEdit(usize),
}

/// What the caller must do after an action succeeds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    Unchanged,
    /// The list changed; rewrite the whole collection to storage.
    Persist,
}

/// Actions a screen can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Add,
    LoadSelected,
    Update,
    Delete,
    SetFilter(Option<String>),
    CycleSort,
    MoveCursor(isize),
    SelectFirst,
    SelectLast,
    ClearSelection,
}

/// Active table ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub descending: bool,
}

/// State behind one list screen: the full entity list, the form being edited
/// and the filtered/sorted view the table shows.
///
/// The table works in visible rows while every mutation works in underlying
/// list positions. `view` is the only bridge between the two, so any action
/// touching a record goes through `underlying_index` first.
pub struct ListEditor<F: RecordForm> {
    /// Complete list in file order. This is what gets persisted.
    records: Vec<F::Record>,
    form: F,
    /// Active search query; `None` shows every row.
    filter: Option<String>,
    /// Active sort column; `None` keeps file order.
    sort: Option<SortKey>,
    /// Underlying list position of each visible row.
    view: Vec<usize>,
    /// Selected visible row.
    cursor: Option<usize>,
    /// Underlying position of the record copied into the form by
    /// `LoadSelected`. Shifted when an earlier row is deleted, cleared when
    /// the loaded row itself goes away or the form is committed.
    loaded: Option<usize>,
}

impl<F: RecordForm> ListEditor<F> {
    pub fn new(records: Vec<F::Record>, form: F) -> Self {
        let mut editor = Self {
            records,
            form,
            filter: None,
            sort: None,
            view: Vec::new(),
            cursor: None,
            loaded: None,
        };
        editor.refresh_view();
        editor
    }

    pub fn records(&self) -> &[F::Record] {
        &self.records
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Direct access for keystrokes; typing never touches the list.
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Records in display order.
    pub fn visible(&self) -> impl Iterator<Item = &F::Record> + '_ {
        self.view.iter().map(move |&index| &self.records[index])
    }

    pub fn visible_len(&self) -> usize {
        self.view.len()
    }

    /// Underlying list position of a visible row.
    pub fn underlying_index(&self, row: usize) -> Option<usize> {
        self.view.get(row).copied()
    }

    /// Record under the table cursor.
    pub fn selected_record(&self) -> Option<&F::Record> {
        self.cursor
            .and_then(|row| self.underlying_index(row))
            .map(|index| &self.records[index])
    }

    pub fn phase(&self) -> Phase {
        match self.loaded {
            Some(index) => Phase::SelectedForEdit(index),
            None if self.form.is_blank() => Phase::Idle,
            None => Phase::Composing,
        }
    }

    /// Apply one action. Errors leave the list, view and form untouched.
    pub fn apply(&mut self, action: EditorAction) -> Result<Effect, EditError> {
        match action {
            EditorAction::Add => {
                let record = self.form.parse()?;
                self.records.push(record);
                self.finish_edit();
                Ok(Effect::Persist)
            }
            EditorAction::LoadSelected => {
                let index = self.selected_index(RowAction::Load)?;
                self.form.load(&self.records[index]);
                self.loaded = Some(index);
                Ok(Effect::Unchanged)
            }
            EditorAction::Update => {
                let index = self.selected_index(RowAction::Update)?;
                let record = self.form.parse()?;
                self.records[index] = record;
                self.finish_edit();
                Ok(Effect::Persist)
            }
            EditorAction::Delete => {
                let index = self.selected_index(RowAction::Delete)?;
                self.records.remove(index);
                match self.loaded {
                    Some(loaded) if loaded == index => {
                        self.form.reset();
                        self.loaded = None;
                    }
                    Some(loaded) if loaded > index => self.loaded = Some(loaded - 1),
                    _ => {}
                }
                self.cursor = None;
                self.refresh_view();
                Ok(Effect::Persist)
            }
            EditorAction::SetFilter(filter) => {
                self.filter = filter.filter(|query| !query.trim().is_empty());
                self.cursor = None;
                self.refresh_view();
                Ok(Effect::Unchanged)
            }
            EditorAction::CycleSort => {
                self.sort = next_sort(self.sort, <F::Record as TableRow>::COLUMNS.len());
                self.cursor = None;
                self.refresh_view();
                Ok(Effect::Unchanged)
            }
            EditorAction::MoveCursor(delta) => {
                self.move_cursor(delta);
                Ok(Effect::Unchanged)
            }
            EditorAction::SelectFirst => {
                self.cursor = if self.view.is_empty() { None } else { Some(0) };
                Ok(Effect::Unchanged)
            }
            EditorAction::SelectLast => {
                self.cursor = self.view.len().checked_sub(1);
                Ok(Effect::Unchanged)
            }
            EditorAction::ClearSelection => {
                self.cursor = None;
                Ok(Effect::Unchanged)
            }
        }
    }

    fn selected_index(&self, action: RowAction) -> Result<usize, EditError> {
        self.cursor
            .and_then(|row| self.underlying_index(row))
            .ok_or(EditError::NoSelection { action })
    }

    /// Back to Idle after a successful Add or Update.
    fn finish_edit(&mut self) {
        self.form.reset();
        self.loaded = None;
        self.cursor = None;
        self.refresh_view();
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.view.is_empty() {
            self.cursor = None;
            return;
        }
        let last = self.view.len() as isize - 1;
        let next = match self.cursor {
            Some(row) => (row as isize + delta).clamp(0, last),
            None if delta < 0 => last,
            None => 0,
        };
        self.cursor = Some(next as usize);
    }

    /// Rebuild the visible-row mapping from the filter and sort settings.
    fn refresh_view(&mut self) {
        let matcher = self.filter.as_deref().map(build_matcher);
        let mut view: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| match &matcher {
                None => true,
                Some(matcher) => matcher
                    .as_ref()
                    .is_some_and(|matcher| record.cells().iter().any(|cell| matcher.is_match(cell))),
            })
            .map(|(index, _)| index)
            .collect();

        if let Some(sort) = self.sort {
            // Stable, so equal keys keep list order.
            view.sort_by(|&a, &b| {
                let ordering = self.records[a]
                    .sort_value(sort.column)
                    .compare(&self.records[b].sort_value(sort.column));
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        self.view = view;
        if let Some(row) = self.cursor {
            if row >= self.view.len() {
                self.cursor = self.view.len().checked_sub(1);
            }
        }
    }
}

/// Case-insensitive pattern for a filter query. Queries that are not valid
/// patterns match literally.
fn build_matcher(query: &str) -> Option<Regex> {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

/// none → col 0 asc → col 0 desc → col 1 asc → … → none.
fn next_sort(current: Option<SortKey>, columns: usize) -> Option<SortKey> {
    match current {
        None if columns == 0 => None,
        None => Some(SortKey {
            column: 0,
            descending: false,
        }),
        Some(SortKey {
            column,
            descending: false,
        }) => Some(SortKey {
            column,
            descending: true,
        }),
        Some(SortKey { column, .. }) if column + 1 < columns => Some(SortKey {
            column: column + 1,
            descending: false,
        }),
        Some(_) => None,
    }
}
