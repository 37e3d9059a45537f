//! Binary entry point: read the configuration, start logging, seed the table
//! and drive the Ratatui event loop until the user exits.
use employee_table::{logging, run_app, seed_employees, App, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // The table is usable without a log file, so a logging failure is not
    // fatal.
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err:#}");
    }

    tracing::info!(
        notification_ttl = ?config.notification_ttl,
        "starting employee table"
    );

    let mut app = App::new(seed_employees(), config.notification_ttl);
    run_app(&mut app)
}
