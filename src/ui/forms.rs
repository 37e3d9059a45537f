use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::table::EmployeeDraft;

/// Fields of the add-employee form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    Name,
    Position,
    Office,
    Age,
    Salary,
}

impl FormField {
    pub(crate) const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Position,
        FormField::Office,
        FormField::Age,
        FormField::Salary,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Position => "Position",
            FormField::Office => "Office",
            FormField::Age => "Age",
            FormField::Salary => "Salary",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Width of the `Label: ` prefix, shared by every line so values align.
    pub(crate) fn prefix_width() -> usize {
        "Position: ".len()
    }
}

/// State of the persistent add-employee form: typed values plus focus.
#[derive(Default, Clone, Debug)]
pub(crate) struct EmployeeForm {
    pub(crate) draft: EmployeeDraft,
    pub(crate) active: FormField,
    pub(crate) error: Option<String>,
}

impl EmployeeForm {
    /// Make `field` the active one, as a click on it would.
    pub(crate) fn focus(&mut self, field: FormField) {
        self.active = field;
    }

    /// Move focus to the next field, wrapping after salary.
    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % FormField::ALL.len();
        self.active = FormField::ALL[idx];
    }

    /// Move focus to the previous field, wrapping before name.
    pub(crate) fn previous_field(&mut self) {
        let len = FormField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = FormField::ALL[idx];
    }

    /// Append a character to the active field. Number fields take what a
    /// number input would: digits, a sign and a decimal point.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let accepted = match self.active {
            FormField::Name => {
                self.draft.name.push(ch);
                true
            }
            FormField::Position => {
                self.draft.position.push(ch);
                true
            }
            FormField::Office => {
                if ch == ' ' {
                    self.draft.office = self.draft.office.next();
                    true
                } else {
                    false
                }
            }
            FormField::Age | FormField::Salary => {
                if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.') {
                    self.numeric_value_mut().push(ch);
                    true
                } else {
                    false
                }
            }
        };
        if accepted {
            self.error = None;
        }
        accepted
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            FormField::Name => {
                self.draft.name.pop();
            }
            FormField::Position => {
                self.draft.position.pop();
            }
            FormField::Office => {}
            FormField::Age | FormField::Salary => {
                self.numeric_value_mut().pop();
            }
        }
    }

    /// Empty the active field. The office select has nothing to clear.
    pub(crate) fn clear_field(&mut self) {
        match self.active {
            FormField::Name => self.draft.name.clear(),
            FormField::Position => self.draft.position.clear(),
            FormField::Office => {}
            FormField::Age | FormField::Salary => self.numeric_value_mut().clear(),
        }
    }

    /// Step the office select forward or backward.
    pub(crate) fn cycle_office(&mut self, forward: bool) {
        self.draft.office = if forward {
            self.draft.office.next()
        } else {
            self.draft.office.previous()
        };
    }

    /// Back to a blank form with the first office chosen. Focus stays put.
    pub(crate) fn reset(&mut self) {
        self.draft = EmployeeDraft::default();
        self.error = None;
    }

    fn numeric_value_mut(&mut self) -> &mut String {
        match self.active {
            FormField::Salary => &mut self.draft.salary,
            _ => &mut self.draft.age,
        }
    }

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Position => &self.draft.position,
            FormField::Office => self.draft.office.label(),
            FormField::Age => &self.draft.age,
            FormField::Salary => &self.draft.salary,
        }
    }

    /// Render one form line. The active field is only highlighted while the
    /// form has focus.
    pub(crate) fn build_line(&self, field: FormField, focused: bool) -> Line<'static> {
        let is_active = focused && self.active == field;
        let value = self.value(field);
        let label = format!(
            "{:<width$}",
            format!("{}:", field.label()),
            width = FormField::prefix_width()
        );

        if field == FormField::Office {
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::raw(label),
                Span::styled(format!("< {value} >"), style),
            ]);
        }

        let (display, style) = if value.is_empty() {
            let style = if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ("<required>".to_string(), style)
        } else if is_active {
            (value.to_string(), Style::default().fg(Color::Yellow))
        } else {
            (value.to_string(), Style::default())
        };

        Line::from(vec![Span::raw(label), Span::styled(display, style)])
    }

    /// Hint or error line shown under the fields.
    pub(crate) fn footer_line(&self) -> Line<'static> {
        match &self.error {
            Some(error) => Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(vec![
                Span::styled(
                    "[Enter]",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Save to table"),
            ]),
        }
    }

    /// Character count of the value in `field`, for cursor placement.
    pub(crate) fn value_len(&self, field: FormField) -> usize {
        self.value(field).chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Office;

    #[test]
    fn tab_order_wraps() {
        let mut form = EmployeeForm::default();
        assert_eq!(form.active, FormField::Name);
        form.previous_field();
        assert_eq!(form.active, FormField::Salary);
        form.next_field();
        form.next_field();
        assert_eq!(form.active, FormField::Position);
    }

    #[test]
    fn number_fields_reject_letters() {
        let mut form = EmployeeForm::default();
        form.focus(FormField::Age);
        assert!(form.push_char('4'));
        assert!(!form.push_char('x'));
        assert!(form.push_char('2'));
        assert_eq!(form.draft.age, "42");
        form.backspace();
        assert_eq!(form.draft.age, "4");

        form.focus(FormField::Salary);
        "50000".chars().for_each(|ch| {
            form.push_char(ch);
        });
        assert_eq!(form.draft.salary, "50000");
    }

    #[test]
    fn office_cycles_and_reset_restores_default() {
        let mut form = EmployeeForm::default();
        form.focus(FormField::Office);
        form.push_char(' ');
        assert_eq!(form.draft.office, Office::Singapore);
        form.cycle_office(false);
        form.cycle_office(false);
        assert_eq!(form.draft.office, Office::SanFrancisco);

        form.focus(FormField::Name);
        form.push_char('Z');
        form.error = Some("oops".into());
        form.reset();
        assert_eq!(form.draft, EmployeeDraft::default());
        assert!(form.error.is_none());
        assert_eq!(form.active, FormField::Name);
    }

    #[test]
    fn typing_clears_error() {
        let mut form = EmployeeForm {
            error: Some("Name must contain at least 4 letters.".into()),
            ..EmployeeForm::default()
        };
        form.push_char('A');
        assert!(form.error.is_none());
    }
}
