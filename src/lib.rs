//! Core library surface for the employee table TUI.
//!
//! `table` holds the interaction state machine and knows nothing about the
//! terminal; `ui` drives it from crossterm events and renders it with Ratatui.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod table;
pub mod ui;

pub use config::Config;
pub use error::ValidationError;

/// The record type and the rows shown at start-up.
pub use models::{format_salary, seed_employees, Employee, Office};

pub use table::{EmployeeDraft, NotificationKind, TableController};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
