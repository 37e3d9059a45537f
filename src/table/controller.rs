use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::models::Employee;

use super::draft::EmployeeDraft;
use super::edit::{CellEditor, EditSession};
use super::notify::{Notification, NotificationKind, NotificationSlot};
use super::sort::{SortKey, SortState};

/// Header labels, in column order.
pub const COLUMNS: [&str; 5] = ["Name", "Position", "Office", "Age", "Salary"];
pub const COLUMN_COUNT: usize = COLUMNS.len();

/// Node identity for a row. It never leaves the controller's bookkeeping:
/// selection and the open editor refer to it so they follow the row when the
/// body is re-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq)]
/// One body row: the cells it displays and its handle.
pub struct Row {
    handle: RowHandle,
    cells: [String; COLUMN_COUNT],
}

impl Row {
    /// Identity that stays with this row across sorts.
    pub fn handle(&self) -> RowHandle {
        self.handle
    }

    /// Stored cell text. While a cell is being edited this is still the text
    /// from before the edit; see [`TableController::display_text`].
    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }
}

/// Owns the table body and all transient interaction state: sort order,
/// the active row, the inline editor and the notification.
#[derive(Debug, Clone)]
pub struct TableController {
    rows: Vec<Row>,
    next_handle: u64,
    sort: SortState,
    selected: Option<RowHandle>,
    edit: EditSession,
    notification: NotificationSlot,
}

impl TableController {
    /// Build a table holding `employees` in the given order, unsorted and with
    /// nothing selected. Notifications stay up for `notification_ttl`.
    pub fn new(employees: Vec<Employee>, notification_ttl: Duration) -> Self {
        let mut controller = Self {
            rows: Vec::with_capacity(employees.len()),
            next_handle: 0,
            sort: SortState::default(),
            selected: None,
            edit: EditSession::Idle,
            notification: NotificationSlot::new(notification_ttl),
        };
        for employee in &employees {
            controller.append_row(employee.cells());
        }
        controller
    }

    /// Body rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Active sort column and direction.
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Header click on `column`: flip the direction if it is already the
    /// sorted column, otherwise sort it ascending. Rows are moved as a whole,
    /// so the active row and any open editor stay with their row.
    pub fn sort_by(&mut self, column: usize) {
        if column >= COLUMN_COUNT {
            warn!(column, "ignoring sort on unknown column");
            return;
        }
        let direction = self.sort.toggle(column);
        let mut keyed: Vec<(SortKey, Row)> = self
            .rows
            .drain(..)
            .map(|row| (SortKey::new(shown_text(&self.edit, &row, column)), row))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
        self.rows = keyed.into_iter().map(|(_, row)| row).collect();
        info!(column = COLUMNS[column], ?direction, "sorted table");
    }

    /// Row click. `None` stands for a click that landed outside every row
    /// and leaves the selection untouched.
    pub fn select_row(&mut self, index: Option<usize>) {
        let Some(row) = index.and_then(|idx| self.rows.get(idx)) else {
            return;
        };
        if self.selected != Some(row.handle) {
            debug!(index = ?index, "row selected");
        }
        self.selected = Some(row.handle);
    }

    /// Current position of the active row.
    pub fn selected_index(&self) -> Option<usize> {
        let handle = self.selected?;
        self.position_of(handle)
    }

    /// Whether `row` is the active row.
    pub fn is_selected(&self, row: &Row) -> bool {
        self.selected == Some(row.handle)
    }

    /// Form submit. Valid drafts append a row and raise a success
    /// notification; invalid ones raise an error notification and leave the
    /// table unchanged.
    pub fn submit(
        &mut self,
        draft: &EmployeeDraft,
        now: Instant,
    ) -> Result<Employee, ValidationError> {
        match draft.validate() {
            Ok(employee) => {
                self.append_row(employee.cells());
                info!(name = %employee.name, office = %employee.office, "employee added");
                self.notify(
                    NotificationKind::Success,
                    "Employee added",
                    "New employee was added successfully!",
                    now,
                );
                Ok(employee)
            }
            Err(err) => {
                info!(reason = %err, "employee rejected");
                self.notify(NotificationKind::Error, err.title(), err.to_string(), now);
                Err(err)
            }
        }
    }

    /// Show a notification, removing the visible one first.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: Instant,
    ) {
        self.notification.show(kind, title, message, now);
    }

    /// Advance the clock. Returns `true` if the notification was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notification.expire(now)
    }

    /// The visible notification, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.current()
    }

    /// Double-click on the cell at (`row`, `column`). Any other open editor
    /// is committed first; a second double-click on the cell that already
    /// holds the editor changes nothing. Returns `true` when an editor is
    /// open on the requested cell afterwards.
    pub fn begin_edit(&mut self, row: usize, column: usize) -> bool {
        let Some(handle) = self.rows.get(row).map(Row::handle) else {
            return false;
        };
        if column >= COLUMN_COUNT {
            return false;
        }
        if self.edit.is_editing(handle, column) {
            return true;
        }
        self.commit_edit();

        let original = self.rows[row].cells[column].clone();
        debug!(row, column, original = %original, "cell editor opened");
        self.edit = EditSession::Editing(CellEditor {
            row: handle,
            column,
            input: original.clone(),
            original,
        });
        true
    }

    /// Blur or Enter on the editor: keep the trimmed input if it has any
    /// content, otherwise restore the original text. Returns the position of
    /// the cell that was closed.
    pub fn commit_edit(&mut self) -> Option<(usize, usize)> {
        let editor = self.edit.close()?;
        let row = self.position_of(editor.row)?;
        let text = editor.committed_text();
        debug!(row, column = editor.column, text = %text, "cell editor committed");
        self.rows[row].cells[editor.column] = text;
        Some((row, editor.column))
    }

    /// The open cell editor, for rendering.
    pub fn editor(&self) -> Option<&CellEditor> {
        self.edit.editor()
    }

    /// Position of the cell holding the editor.
    pub fn editing_position(&self) -> Option<(usize, usize)> {
        let editor = self.edit.editor()?;
        Some((self.position_of(editor.row)?, editor.column))
    }

    /// Type `ch` into the open editor. No-op when nothing is being edited.
    pub fn edit_push(&mut self, ch: char) {
        if let Some(editor) = self.edit.editor_mut() {
            if !ch.is_control() {
                editor.input.push(ch);
            }
        }
    }

    /// Delete the last character of the editor input.
    pub fn edit_backspace(&mut self) {
        if let Some(editor) = self.edit.editor_mut() {
            editor.input.pop();
        }
    }

    /// Empty the editor input.
    pub fn edit_clear(&mut self) {
        if let Some(editor) = self.edit.editor_mut() {
            editor.input.clear();
        }
    }

    /// Text the cell currently shows. A cell with an open editor shows no
    /// text of its own.
    pub fn display_text(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .map(|r| shown_text(&self.edit, r, column))
            .unwrap_or("")
    }

    fn append_row(&mut self, cells: [String; COLUMN_COUNT]) {
        let handle = RowHandle(self.next_handle);
        self.next_handle += 1;
        self.rows.push(Row { handle, cells });
    }

    fn position_of(&self, handle: RowHandle) -> Option<usize> {
        self.rows.iter().position(|row| row.handle == handle)
    }
}

fn shown_text<'a>(edit: &EditSession, row: &'a Row, column: usize) -> &'a str {
    if edit.is_editing(row.handle, column) {
        ""
    } else {
        row.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Office;
    use crate::table::notify::DEFAULT_NOTIFICATION_TTL;
    use crate::table::sort::SortDirection;

    fn employee(name: &str, office: Office, age: i64, salary: i64) -> Employee {
        Employee {
            name: name.to_string(),
            position: "Engineer".to_string(),
            office,
            age,
            salary,
        }
    }

    fn controller() -> TableController {
        TableController::new(
            vec![
                employee("Cedric Kelly", Office::Edinburgh, 22, 433_060),
                employee("airi Satou", Office::Tokyo, 33, 162_700),
                employee("Bruno Nash", Office::London, 9, 1_200_000),
                employee("Ashton Cox", Office::SanFrancisco, 66, 86_000),
            ],
            DEFAULT_NOTIFICATION_TTL,
        )
    }

    fn column(table: &TableController, column: usize) -> Vec<String> {
        (0..table.row_count())
            .map(|row| table.display_text(row, column).to_string())
            .collect()
    }

    fn draft(name: &str, age: &str, salary: &str) -> EmployeeDraft {
        EmployeeDraft {
            name: name.to_string(),
            position: " Tester ".to_string(),
            office: Office::Singapore,
            age: age.to_string(),
            salary: salary.to_string(),
        }
    }

    #[test]
    fn numeric_column_sorts_by_value_then_reverses() {
        let mut table = controller();
        table.sort_by(3);
        assert_eq!(column(&table, 3), ["9", "22", "33", "66"]);
        assert_eq!(table.sort_state().direction, SortDirection::Ascending);

        table.sort_by(3);
        assert_eq!(column(&table, 3), ["66", "33", "22", "9"]);
        assert_eq!(table.sort_state().direction, SortDirection::Descending);
    }

    #[test]
    fn salary_column_ignores_currency_formatting() {
        let mut table = controller();
        table.sort_by(4);
        assert_eq!(
            column(&table, 4),
            ["$86,000", "$162,700", "$433,060", "$1,200,000"]
        );
    }

    #[test]
    fn text_column_uses_collation() {
        let mut table = controller();
        table.sort_by(0);
        assert_eq!(
            column(&table, 0),
            ["airi Satou", "Ashton Cox", "Bruno Nash", "Cedric Kelly"]
        );
    }

    #[test]
    fn double_toggle_restores_ascending_order() {
        let mut table = controller();
        table.sort_by(2);
        let ascending = column(&table, 2);
        table.sort_by(2);
        let mut descending = column(&table, 2);
        descending.reverse();
        assert_eq!(ascending, descending);
        table.sort_by(2);
        assert_eq!(column(&table, 2), ascending);
    }

    #[test]
    fn mixed_name_column_sorts_numbers_first_in_both_directions() {
        let pool = ["b5", "a10", "ab", "c3", "a2b", "zz", "x99", "m", "q7", "aa1"];
        let employees = (0..60)
            .map(|idx| employee(pool[(idx * 3) % pool.len()], Office::Tokyo, 30, 1_000))
            .collect();
        let mut table = TableController::new(employees, DEFAULT_NOTIFICATION_TTL);

        table.sort_by(0);
        let ascending = column(&table, 0);
        assert_eq!(ascending.len(), 60);
        assert_eq!(ascending.first().map(String::as_str), Some("aa1"));
        assert_eq!(ascending.last().map(String::as_str), Some("zz"));
        let numbers_end = ascending.iter().rposition(|cell| cell == "x99");
        let text_start = ascending.iter().position(|cell| cell == "ab");
        assert!(numbers_end < text_start);

        table.sort_by(0);
        let descending = column(&table, 0);
        assert_eq!(descending.first().map(String::as_str), Some("zz"));
        assert_eq!(descending.last().map(String::as_str), Some("aa1"));
    }

    #[test]
    fn switching_column_resets_to_ascending() {
        let mut table = controller();
        table.sort_by(3);
        table.sort_by(3);
        table.sort_by(0);
        assert_eq!(table.sort_state().active_column, Some(0));
        assert_eq!(table.sort_state().direction, SortDirection::Ascending);
    }

    #[test]
    fn unknown_column_is_ignored() {
        let mut table = controller();
        let before = column(&table, 0);
        table.sort_by(COLUMN_COUNT);
        assert_eq!(column(&table, 0), before);
        assert_eq!(table.sort_state().active_column, None);
    }

    #[test]
    fn selection_is_exclusive_and_idempotent() {
        let mut table = controller();
        table.select_row(Some(1));
        table.select_row(Some(1));
        assert_eq!(table.selected_index(), Some(1));
        table.select_row(Some(2));
        assert_eq!(table.selected_index(), Some(2));
        let marked = table.rows().iter().filter(|r| table.is_selected(r)).count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn click_outside_rows_keeps_selection() {
        let mut table = controller();
        table.select_row(Some(0));
        table.select_row(None);
        table.select_row(Some(99));
        assert_eq!(table.selected_index(), Some(0));
    }

    #[test]
    fn selection_follows_row_through_sort() {
        let mut table = controller();
        table.select_row(Some(0));
        table.sort_by(3);
        let idx = table.selected_index().expect("still selected");
        assert_eq!(table.display_text(idx, 0), "Cedric Kelly");
    }

    #[test]
    fn successful_submit_appends_formatted_row() {
        let mut table = controller();
        let now = Instant::now();
        let added = table.submit(&draft("  Bobby  ", "30", "50000"), now);
        assert!(added.is_ok());
        assert_eq!(table.row_count(), 5);
        assert_eq!(
            table.rows()[4].cells(),
            &["Bobby", "Tester", "Singapore", "30", "$50,000"].map(String::from)
        );
        let shown = table.notification().expect("success notification");
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.title, "Employee added");
    }

    #[test]
    fn rejected_submit_reports_and_adds_nothing() {
        let mut table = controller();
        let now = Instant::now();
        assert_eq!(
            table.submit(&draft("Bob", "30", "1"), now),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(table.row_count(), 4);
        let shown = table.notification().expect("error notification");
        assert_eq!(shown.kind, NotificationKind::Error);
        assert_eq!(shown.title, "Invalid Name");
        assert_eq!(shown.message, "Name must contain at least 4 letters.");

        assert_eq!(
            table.submit(&draft("Bobby", "91", "1"), now),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(table.notification().map(|n| n.title.as_str()), Some("Invalid Age"));
    }

    #[test]
    fn only_latest_notification_survives() {
        let mut table = controller();
        let now = Instant::now();
        table.notify(NotificationKind::Success, "One", "first", now);
        table.notify(NotificationKind::Error, "Two", "second", now);
        let shown = table.notification().expect("one notification");
        assert_eq!(shown.title, "Two");
        assert_eq!(shown.message, "second");

        assert!(!table.tick(now + Duration::from_millis(2999)));
        assert!(table.tick(now + Duration::from_millis(3000)));
        assert!(table.notification().is_none());
    }

    #[test]
    fn edit_commit_keeps_typed_text() {
        let mut table = controller();
        assert!(table.begin_edit(1, 2));
        assert_eq!(table.display_text(1, 2), "");
        table.edit_clear();
        table.edit_push('X');
        assert_eq!(table.commit_edit(), Some((1, 2)));
        assert_eq!(table.display_text(1, 2), "X");
        assert!(table.editor().is_none());
    }

    #[test]
    fn blank_edit_restores_original() {
        let mut table = controller();
        table.begin_edit(0, 0);
        table.edit_clear();
        table.edit_push(' ');
        table.commit_edit();
        assert_eq!(table.display_text(0, 0), "Cedric Kelly");
    }

    #[test]
    fn opening_second_editor_commits_first() {
        let mut table = controller();
        table.begin_edit(0, 1);
        table.edit_clear();
        table.edit_push('Q');
        assert!(table.begin_edit(2, 0));

        assert_eq!(table.display_text(0, 1), "Q");
        assert_eq!(table.editing_position(), Some((2, 0)));
        assert_eq!(table.editor().map(|e| e.original.as_str()), Some("Bruno Nash"));
    }

    #[test]
    fn reopening_same_cell_keeps_editor_state() {
        let mut table = controller();
        table.begin_edit(3, 0);
        table.edit_push('!');
        assert!(table.begin_edit(3, 0));
        assert_eq!(
            table.editor().map(|e| e.input.as_str()),
            Some("Ashton Cox!")
        );
    }

    #[test]
    fn editor_follows_row_through_sort() {
        let mut table = controller();
        table.begin_edit(0, 1);
        table.sort_by(3);
        let (row, column) = table.editing_position().expect("editor still open");
        assert_eq!(column, 1);
        assert_eq!(table.display_text(row, 0), "Cedric Kelly");
        table.edit_clear();
        table.edit_push('Z');
        table.commit_edit();
        assert_eq!(table.display_text(row, 1), "Z");
    }

    #[test]
    fn editing_cell_sorts_as_blank() {
        let mut table = controller();
        table.begin_edit(3, 0);
        table.sort_by(0);
        assert_eq!(table.editing_position(), Some((0, 0)));
    }

    #[test]
    fn edits_out_of_range_are_ignored() {
        let mut table = controller();
        assert!(!table.begin_edit(10, 0));
        assert!(!table.begin_edit(0, COLUMN_COUNT));
        assert!(table.commit_edit().is_none());
    }
}
