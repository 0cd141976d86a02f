//! tabula - A terminal spreadsheet-style table editor
//!
//! This is the main entry point for the tabula application.
//! It uses the Component Architecture pattern from ratatui.
//!
//! Usage: `tabula [FILE.csv]`

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::Store;
use crate::services::persistence::snapshot_path;
use crate::services::{PersistenceListener, Snapshot};
use crate::tui::{Tui, TuiEvent};
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|| {
        let config = Config::default();
        if let Err(e) = config.save() {
            eprintln!("Warning: Could not write default config: {}", e);
        }
        config
    });

    logging::init(&config.logs_dir());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting tabula");

    let import_path = std::env::args().nth(1).map(PathBuf::from);

    // Restore state before the terminal is taken over
    let path = snapshot_path(&config.data_dir());
    let snapshot = Snapshot::restore_or_default(&path, config.rows_per_page());
    let mut store = Store::new(snapshot.table, snapshot.prefs);
    if config.persist {
        store.subscribe(Box::new(PersistenceListener::new(path)));
    }

    let mut app = App::new(store, config);
    app.init()?;
    if let Some(path) = import_path {
        app.import_csv_file(&path);
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(250));
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = %err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    tracing::info!("exited cleanly");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            TuiEvent::Key(key) => app.handle_key_event(key)?,
            TuiEvent::Resize(w, h) => Some(Action::Resize(w, h)),
            TuiEvent::Tick => Some(Action::Tick),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            if a != Action::Tick {
                tracing::trace!(action = %a, "dispatching action");
            }
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
