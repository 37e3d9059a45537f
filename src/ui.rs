//! Ratatui front-end: maps key presses and mouse clicks onto the table
//! controller and renders the table, the add-employee form and the
//! notification popup.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
