use thiserror::Error;

/// Reasons a submitted employee form is rejected. Each variant knows the
/// notification title it is shown under; `Display` is the message body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{0} must be a number.")]
    NotANumber(&'static str),
    #[error("Name must contain at least 4 letters.")]
    NameTooShort,
    #[error("Age must be between 18 and 90.")]
    AgeOutOfRange,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::Required(_) => "Missing Field",
            ValidationError::NotANumber(_) => "Invalid Number",
            ValidationError::NameTooShort => "Invalid Name",
            ValidationError::AgeOutOfRange => "Invalid Age",
        }
    }
}
