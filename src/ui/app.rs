use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::models::Employee;
use crate::table::{
    Notification, NotificationKind, SortDirection, TableController, COLUMNS, COLUMN_COUNT,
};

use super::forms::{EmployeeForm, FormField};
use super::helpers::{
    form_block, notification_rect, scroll_to_fit, split_screen, table_block, TableGeometry,
    COLUMN_WIDTHS,
};

/// Two clicks on the same cell closer together than this count as a
/// double-click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Which panel receives keystrokes when no cell editor is open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Table,
    Form,
}

/// What lies under a mouse click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Target {
    Header(usize),
    Cell { row: usize, column: usize },
    TableBlank,
    FormField(FormField),
    Outside,
}

struct LastClick {
    row: usize,
    column: usize,
    at: Instant,
}

/// Terminal front-end state wrapped around the table controller.
pub struct App {
    table: TableController,
    form: EmployeeForm,
    focus: Focus,
    /// Keyboard cursor as (row, column).
    cursor: (usize, usize),
    /// Index of the first body row on screen.
    scroll: usize,
    /// Last frame area, used to hit-test clicks.
    viewport: Rect,
    last_click: Option<LastClick>,
}

impl App {
    /// Start with `employees` in the table, the table focused and the cursor on
    /// the first cell.
    pub fn new(employees: Vec<Employee>, notification_ttl: Duration) -> Self {
        Self {
            table: TableController::new(employees, notification_ttl),
            form: EmployeeForm::default(),
            focus: Focus::Table,
            cursor: (0, 0),
            scroll: 0,
            viewport: Rect::default(),
            last_click: None,
        }
    }

    /// The controller behind the screen.
    pub fn table(&self) -> &TableController {
        &self.table
    }

    /// Record the terminal size so mouse positions can be mapped back to
    /// cells.
    pub fn set_viewport(&mut self, area: Rect) {
        if self.viewport != area {
            self.viewport = area;
            self.keep_cursor_visible();
        }
    }

    /// Dispatch a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> bool {
        if self.table.editor().is_some() {
            self.handle_editor_key(code);
            return false;
        }
        match self.focus {
            Focus::Table => self.handle_table_key(code),
            Focus::Form => {
                self.handle_form_key(code, now);
                false
            }
        }
    }

    /// Ctrl+U empties whatever input has focus.
    pub fn handle_ctrl_u(&mut self) {
        if self.table.editor().is_some() {
            self.table.edit_clear();
        } else if self.focus == Focus::Form {
            self.form.clear_field();
        }
    }

    /// Dispatch a mouse event. Left clicks sort, select, open editors or
    /// focus form fields depending on what they land on; the wheel scrolls.
    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(event.column, event.row, now),
            MouseEventKind::ScrollDown => self.scroll_by(1),
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            _ => {}
        }
    }

    /// Let time pass; dismisses an expired notification.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.table.tick(now)
    }

    fn handle_table_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(' ') => self.table.select_row(Some(self.cursor.0)),
            KeyCode::Char(digit @ '1'..='5') => {
                let column = digit as usize - '1' as usize;
                self.table.sort_by(column);
            }
            KeyCode::Char('s') => self.table.sort_by(self.cursor.1),
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::F(2) => {
                let (row, column) = self.cursor;
                self.table.begin_edit(row, column);
            }
            KeyCode::Tab | KeyCode::Char('a') => self.focus = Focus::Form,
            _ => {}
        }
        false
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(ch) => self.table.edit_push(ch),
            KeyCode::Backspace => self.table.edit_backspace(),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => {
                self.table.commit_edit();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc => self.focus = Focus::Table,
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Left if self.form.active == FormField::Office => {
                self.form.cycle_office(false)
            }
            KeyCode::Right if self.form.active == FormField::Office => {
                self.form.cycle_office(true)
            }
            KeyCode::Enter => self.submit_form(now),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
    }

    fn submit_form(&mut self, now: Instant) {
        match self.table.submit(&self.form.draft, now) {
            Ok(employee) => {
                debug!(name = %employee.name, "form reset after submit");
                self.form.reset();
            }
            Err(err) => self.form.error = Some(err.to_string()),
        }
    }

    fn click(&mut self, x: u16, y: u16, now: Instant) {
        let target = self.hit_test(x, y);

        // Clicking anywhere but the editor's own cell takes focus away from it.
        if let Some((row, column)) = self.table.editing_position() {
            if target != (Target::Cell { row, column }) {
                self.table.commit_edit();
            }
        }

        match target {
            Target::Header(column) => {
                self.last_click = None;
                self.focus = Focus::Table;
                self.table.sort_by(column);
            }
            Target::Cell { row, column } => {
                self.focus = Focus::Table;
                self.table.select_row(Some(row));
                self.cursor = (row, column);
                let is_double = self.last_click.as_ref().is_some_and(|last| {
                    last.row == row
                        && last.column == column
                        && now.duration_since(last.at) <= DOUBLE_CLICK_WINDOW
                });
                if is_double {
                    self.last_click = None;
                    self.table.begin_edit(row, column);
                } else {
                    self.last_click = Some(LastClick {
                        row,
                        column,
                        at: now,
                    });
                }
            }
            Target::TableBlank => {
                self.last_click = None;
                self.focus = Focus::Table;
                self.table.select_row(None);
            }
            Target::FormField(field) => {
                self.last_click = None;
                self.focus = Focus::Form;
                self.form.focus(field);
            }
            Target::Outside => self.last_click = None,
        }
    }

    fn hit_test(&self, x: u16, y: u16) -> Target {
        let point = Position { x, y };
        let regions = split_screen(self.viewport);

        if regions.table.contains(point) {
            let geometry = TableGeometry::new(regions.table);
            let Some(column) = geometry.column_at(x) else {
                return Target::TableBlank;
            };
            if geometry.header_y == Some(y) {
                return Target::Header(column);
            }
            if let Some(line) = geometry.body_line_at(y) {
                let row = self.scroll + line;
                if row < self.table.row_count() {
                    return Target::Cell { row, column };
                }
            }
            return Target::TableBlank;
        }

        if regions.form.contains(point) {
            let inner = form_block().inner(regions.form);
            if inner.contains(point) {
                let line = (y - inner.y) as usize;
                if let Some(field) = FormField::ALL.get(line) {
                    return Target::FormField(*field);
                }
            }
        }

        Target::Outside
    }

    fn move_cursor(&mut self, rows: isize, columns: isize) {
        let row_count = self.table.row_count();
        let (row, column) = self.cursor;
        let row = if row_count == 0 {
            0
        } else {
            row.saturating_add_signed(rows).min(row_count - 1)
        };
        let column = column
            .saturating_add_signed(columns)
            .min(COLUMN_COUNT - 1);
        self.cursor = (row, column);
        self.keep_cursor_visible();
    }

    fn scroll_by(&mut self, rows: isize) {
        self.move_cursor(rows, 0);
    }

    fn keep_cursor_visible(&mut self) {
        let visible = self.table_geometry().visible_rows();
        self.scroll = scroll_to_fit(self.scroll, self.cursor.0, visible);
    }

    fn table_geometry(&self) -> TableGeometry {
        TableGeometry::new(split_screen(self.viewport).table)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let regions = split_screen(area);

        self.draw_table(frame, regions.table);
        self.draw_form(frame, regions.form);
        self.draw_footer(frame, regions.footer);

        if let Some(notification) = self.table.notification() {
            self.draw_notification(frame, area, notification);
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let geometry = TableGeometry::new(area);
        let sort = self.table.sort_state();

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(COLUMNS.iter().enumerate().map(|(idx, title)| {
            let arrow = match sort.direction_for(idx) {
                Some(SortDirection::Ascending) => " ▲",
                Some(SortDirection::Descending) => " ▼",
                None => "",
            };
            Cell::from(format!(" {title}{arrow}"))
        }))
        .style(header_style);

        let visible = geometry.visible_rows();
        let rows = self
            .table
            .rows()
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
            .map(|(idx, row)| {
                let cells = (0..COLUMN_COUNT).map(|column| self.cell_widget(idx, column));
                let style = if self.table.is_selected(row) {
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            });

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(table_block())
            .column_spacing(0);
        frame.render_widget(table, area);

        if let Some((row, column)) = self.table.editing_position() {
            let (Some(line), Some(editor), Some(rect)) = (
                row.checked_sub(self.scroll).filter(|line| *line < visible),
                self.table.editor(),
                geometry.columns.get(column),
            ) else {
                return;
            };
            let width = u16::try_from(editor.input.chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(1);
            let x = rect
                .x
                .saturating_add(width)
                .min(rect.right().saturating_sub(1));
            frame.set_cursor_position((x, geometry.body.y + line as u16));
        }
    }

    fn cell_widget(&self, row: usize, column: usize) -> Cell<'static> {
        if self.table.editing_position() == Some((row, column)) {
            let input = self
                .table
                .editor()
                .map(|editor| editor.input.clone())
                .unwrap_or_default();
            return Cell::from(Line::from(vec![
                Span::raw(" "),
                Span::styled(input, Style::default().fg(Color::Black).bg(Color::Yellow)),
            ]));
        }

        let text = format!(" {}", self.table.display_text(row, column));
        if self.focus == Focus::Table && self.cursor == (row, column) {
            Cell::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ))
        } else {
            Cell::from(text)
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Form && self.table.editor().is_none();
        let block = if focused {
            form_block().border_style(Style::default().fg(Color::Yellow))
        } else {
            form_block()
        };
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|field| self.form.build_line(*field, focused))
            .collect();
        lines.push(Line::from(""));
        lines.push(self.form.footer_line());

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        if focused && self.form.active != FormField::Office {
            let line = FormField::ALL
                .iter()
                .position(|field| *field == self.form.active)
                .unwrap_or(0) as u16;
            let value_len = u16::try_from(self.form.value_len(self.form.active))
                .unwrap_or(u16::MAX);
            let x = inner
                .x
                .saturating_add(FormField::prefix_width() as u16)
                .saturating_add(value_len);
            if line < inner.height {
                frame.set_cursor_position((x.min(inner.right()), inner.y + line));
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let paragraph =
            Paragraph::new(vec![self.summary_line(), self.footer_instructions()])
                .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn summary_line(&self) -> Line<'static> {
        let mut parts = vec![format!("{} employees", self.table.row_count())];
        let sort = self.table.sort_state();
        if let Some(column) = sort.active_column {
            let direction = match sort.direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            };
            parts.push(format!("sorted by {} {direction}", COLUMNS[column]));
        }
        if let Some(row) = self.table.selected_index() {
            parts.push(format!("row {} active", row + 1));
        }
        Line::from(Span::styled(
            parts.join(" • "),
            Style::default().fg(Color::Gray),
        ))
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if self.table.editor().is_some() {
            return Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save cell   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Leave cell   "),
                Span::styled("[Ctrl+U]", key_style),
                Span::raw(" Clear"),
            ]);
        }
        match self.focus {
            Focus::Table => Line::from(vec![
                Span::styled("[Arrows]", key_style),
                Span::raw(" Move   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Select   "),
                Span::styled("[1-5/s]", key_style),
                Span::raw(" Sort   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Edit   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Form   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Focus::Form => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next field   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Office   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back to table"),
            ]),
        }
    }

    fn draw_notification(&self, frame: &mut Frame, area: Rect, notification: &Notification) {
        let popup_area = notification_rect(area);
        frame.render_widget(Clear, popup_area);

        let color = match notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let lines = vec![
            Line::from(Span::styled(
                notification.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(notification.message.clone()),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}
