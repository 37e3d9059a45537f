use super::RowHandle;

/// An open inline editor bound to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditor {
    pub row: RowHandle,
    pub column: usize,
    /// Cell text before editing; restored when the input is left blank.
    pub original: String,
    pub input: String,
}

impl CellEditor {
    /// Text the cell shows once the editor closes.
    pub fn committed_text(&self) -> String {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.original.clone()
        } else {
            trimmed.to_string()
        }
    }
}

/// Inline editing state for the whole table: at most one editor is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(CellEditor),
}

impl EditSession {
    /// The open editor, if any.
    pub fn editor(&self) -> Option<&CellEditor> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(editor) => Some(editor),
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut CellEditor> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(editor) => Some(editor),
        }
    }

    /// Whether the editor sits on the cell at `row`, `column`.
    pub fn is_editing(&self, row: RowHandle, column: usize) -> bool {
        self.editor()
            .is_some_and(|editor| editor.row == row && editor.column == column)
    }

    /// Close the session, handing back the editor that was open.
    pub fn close(&mut self) -> Option<CellEditor> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Editing(editor) => Some(editor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(input: &str) -> CellEditor {
        CellEditor {
            row: RowHandle(1),
            column: 0,
            original: "Airi Satou".to_string(),
            input: input.to_string(),
        }
    }

    #[test]
    fn blank_input_falls_back_to_original() {
        assert_eq!(editor("   ").committed_text(), "Airi Satou");
        assert_eq!(editor("").committed_text(), "Airi Satou");
    }

    #[test]
    fn input_is_trimmed_on_commit() {
        assert_eq!(editor("  X ").committed_text(), "X");
    }

    #[test]
    fn close_returns_to_idle() {
        let mut session = EditSession::Editing(editor("X"));
        assert!(session.is_editing(RowHandle(1), 0));
        assert!(!session.is_editing(RowHandle(1), 1));
        assert_eq!(session.close().map(|e| e.input), Some("X".to_string()));
        assert_eq!(session, EditSession::Idle);
        assert!(session.close().is_none());
    }
}
