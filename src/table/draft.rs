//! Raw form values and the rules that turn them into an [`Employee`].

use crate::error::ValidationError;
use crate::models::{Employee, Office};

/// Minimum number of ASCII letters a name must contain.
pub const MIN_NAME_LETTERS: usize = 4;
pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 90;

/// Unvalidated values exactly as typed into the add-employee form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub position: String,
    pub office: Office,
    pub age: String,
    pub salary: String,
}

impl EmployeeDraft {
    /// Check the draft and build the record to append.
    ///
    /// Every field must be filled and the numeric fields must hold a number
    /// before the business rules run. Of those, the name rule is checked
    /// before the age rule and the first failure is returned.
    pub fn validate(&self) -> Result<Employee, ValidationError> {
        require(&self.name, "Name")?;
        require(&self.position, "Position")?;
        require(&self.age, "Age")?;
        require(&self.salary, "Salary")?;

        let age = parse_leading_int(&self.age).ok_or(ValidationError::NotANumber("Age"))?;
        let salary =
            parse_leading_int(&self.salary).ok_or(ValidationError::NotANumber("Salary"))?;

        let letters = self
            .name
            .chars()
            .filter(|ch| ch.is_ascii_alphabetic())
            .count();
        if letters < MIN_NAME_LETTERS {
            return Err(ValidationError::NameTooShort);
        }

        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::AgeOutOfRange);
        }

        Ok(Employee {
            name: self.name.trim().to_string(),
            position: self.position.trim().to_string(),
            office: self.office,
            age,
            salary,
        })
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Read an optional sign followed by a run of digits, ignoring whatever
/// follows. `"18.9"` reads as 18; `"abc"` and `"-"` read as nothing. Values
/// past the `i64` range clamp to `i64::MAX` (or its negation).
pub(crate) fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: &str = {
        let end = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    // A digit run too long for i64 saturates instead of failing.
    let value: i64 = digits.parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
