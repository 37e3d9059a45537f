use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::table::COLUMN_COUNT;

/// Height of the add-employee panel: five fields, a spacer and a hint line
/// inside a border.
pub(crate) const FORM_HEIGHT: u16 = 9;
/// Footer space reserved for key hints.
pub(crate) const FOOTER_HEIGHT: u16 = 3;
/// Column widths of the employee table, in column order.
pub(crate) const COLUMN_WIDTHS: [Constraint; COLUMN_COUNT] = [
    Constraint::Percentage(24),
    Constraint::Percentage(32),
    Constraint::Percentage(17),
    Constraint::Percentage(8),
    Constraint::Percentage(19),
];
const NOTIFICATION_WIDTH: u16 = 44;
const NOTIFICATION_HEIGHT: u16 = 5;

/// The three stacked panels of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Regions {
    pub(crate) table: Rect,
    pub(crate) form: Rect,
    pub(crate) footer: Rect,
}

/// Split the screen into table, form and footer. The table absorbs whatever
/// height is left.
pub(crate) fn split_screen(area: Rect) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
    Regions {
        table: chunks[0],
        form: chunks[1],
        footer: chunks[2],
    }
}

/// Where the header and body cells of the table land on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableGeometry {
    pub(crate) header_y: Option<u16>,
    pub(crate) body: Rect,
    pub(crate) columns: Vec<Rect>,
}

impl TableGeometry {
    pub(crate) fn new(area: Rect) -> Self {
        let inner = table_block().inner(area);
        let columns = Layout::horizontal(COLUMN_WIDTHS).split(inner).to_vec();
        let (header_y, body) = if inner.height == 0 {
            (None, inner)
        } else {
            (
                Some(inner.y),
                Rect {
                    y: inner.y + 1,
                    height: inner.height - 1,
                    ..inner
                },
            )
        };
        Self {
            header_y,
            body,
            columns,
        }
    }

    /// Number of data rows that fit below the header.
    pub(crate) fn visible_rows(&self) -> usize {
        self.body.height as usize
    }

    pub(crate) fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|rect| x >= rect.x && x < rect.x + rect.width)
    }

    /// Body line under `y`, counted from the first visible row.
    pub(crate) fn body_line_at(&self, y: u16) -> Option<usize> {
        let inside = y >= self.body.y && y < self.body.y + self.body.height;
        inside.then(|| (y - self.body.y) as usize)
    }
}

/// Border shared by rendering and hit-testing so both agree on the inner area.
pub(crate) fn table_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" Employees ")
}

pub(crate) fn form_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" New employee ")
}

/// Rectangle in the top-right corner of `area` for the notification popup.
pub(crate) fn notification_rect(area: Rect) -> Rect {
    let width = NOTIFICATION_WIDTH.min(area.width);
    let height = NOTIFICATION_HEIGHT.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}

/// Shift a scroll offset so `cursor` stays inside a window of `visible` rows.
pub(crate) fn scroll_to_fit(offset: usize, cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor;
    }
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}
