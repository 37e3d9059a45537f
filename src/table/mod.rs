//! The table's interaction state machine, independent of any terminal.

mod controller;
mod draft;
mod edit;
mod notify;
mod sort;

pub use controller::{Row, RowHandle, TableController, COLUMNS, COLUMN_COUNT};
pub use draft::{EmployeeDraft, MAX_AGE, MIN_AGE, MIN_NAME_LETTERS};
pub use edit::{CellEditor, EditSession};
pub use notify::{Notification, NotificationKind, NotificationSlot, DEFAULT_NOTIFICATION_TTL};
pub use sort::{collate, compare_cells, SortDirection, SortState};
