// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod sinks;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::source::{FileSource, ItemSource};
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

pub async fn run(cfg: Config, data_path: PathBuf) -> Result<()> {
    // --- 1. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 2. STATE INIT ---
    // Input handling is live before the dataset arrives; it filters an
    // empty dataset until then.
    let mut app_state = AppState::new(cfg.sync_options());
    app_state.sync.begin_load();

    // --- 3. DATASET LOAD ---
    let (event_tx, mut event_rx) = mpsc::channel(1);
    let source = FileSource::new(data_path);
    tokio::spawn(async move {
        let result = source.load_items().await;
        let _ = event_tx.send(AppEvent::DatasetLoaded(result)).await;
    });

    // --- 4. UI LOOP ---
    let loop_result = run_loop(&mut terminal, &mut app_state, &mut event_rx);

    // --- 5. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    loop_result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app_state))?;

        // A. Background Events
        if let Ok(event) = event_rx.try_recv() {
            handlers::handle_app_event(app_state, event);
        }

        app_state.tick(Instant::now());

        // B. Input Events
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    if let Some(Action::Quit) = handlers::handle_key_event(key, app_state) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}
