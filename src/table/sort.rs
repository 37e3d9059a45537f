//! Column ordering rules. A header click either flips the direction of the
//! active column or starts a fresh ascending sort on another column.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub(crate) fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which column is sorted and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub active_column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Register a click on header `column` and return the direction to sort
    /// in.
    pub fn toggle(&mut self, column: usize) -> SortDirection {
        if self.active_column == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.active_column = Some(column);
            self.direction = SortDirection::Ascending;
        }
        self.direction
    }

    pub fn direction_for(&self, column: usize) -> Option<SortDirection> {
        (self.active_column == Some(column)).then_some(self.direction)
    }
}

/// Ordering key for one cell. Cells that read as a number sort by value
/// ahead of every cell that does not; the rest sort by [`collate`]. Keeping
/// the two groups apart makes the order total even when a column mixes
/// numbers and text.
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn new(text: &str) -> Self {
        let text = text.trim();
        match numeric_value(text) {
            Some(value) => SortKey::Number(value),
            None => SortKey::Text(text.to_string()),
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => collate(a, b),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Compare two cell texts. Both sides are reduced to their digits and dots;
/// when both yield a number the comparison is numeric, otherwise it goes
/// through [`SortKey`].
pub fn compare_cells(a: &str, b: &str, direction: SortDirection) -> Ordering {
    direction.apply(SortKey::new(a).cmp(&SortKey::new(b)))
}

/// Strip everything except ASCII digits and `.`, then read the longest
/// decimal prefix. `"$1,200"` is 1200, `"1.2.3"` is 1.2, `"Tokyo"` is none.
pub(crate) fn numeric_value(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (idx, ch) in stripped.char_indices() {
        if ch == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            seen_digit = true;
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    stripped[..end].trim_end_matches('.').parse().ok()
}

/// Locale-style string ordering: letters compare case-insensitively first,
/// then lower case sorts before upper case, then raw code points.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        let tie_key = |ch: char| (!ch.is_lowercase(), ch);
        a.chars().map(tie_key).cmp(b.chars().map(tie_key))
    })
}
