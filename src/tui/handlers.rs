// File: src/tui/handlers.rs
// Handles keyboard input and background events for the TUI.
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::DatasetLoaded(result) => {
            state.sync.finish_load(result);
            state.on_dataset_rendered();
        }
    }
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match state.mode {
        InputMode::Searching | InputMode::DateEntry => handle_input_key(key, state),
        InputMode::Normal => handle_normal_key(key, state),
    }
}

// Shared by the search box and the date box.
fn handle_input_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Enter => state.commit_input(),
        KeyCode::Esc => state.cancel_input(),
        KeyCode::Char(c) => {
            state.enter_char(c);
            state.refresh_filtered_view();
        }
        KeyCode::Backspace => {
            state.delete_char();
            state.refresh_filtered_view();
        }
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        _ => {}
    }
    None
}

fn handle_normal_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('/') => state.open_input(InputMode::Searching),
        KeyCode::Char('d') => state.open_input(InputMode::DateEntry),
        KeyCode::Char('c') | KeyCode::Esc => state.clear_filters(),
        KeyCode::Char('r') => state.cycle_region(),
        KeyCode::Char('p') => state.cycle_price(),
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
        KeyCode::Char('j') | KeyCode::Down => state.next(),
        KeyCode::Char('k') | KeyCode::Up => state.previous(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::controller::ViewSynchronizer;
    use crate::error::LoadError;
    use crate::model::Item;
    use crate::tui::sinks::{TuiMap, TuiViews};
    use crate::view::{LOAD_FAILED_STATUS, StatusSlot};
    use chrono::NaiveDate;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key_event(key(KeyCode::Char(c)), state);
        }
    }

    fn loaded_state() -> AppState {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let items = vec![
            Item::new("Rust Conf", d("2030-01-01"), d("2030-01-02"), "Berlin"),
            Item::new("Go Meetup", d("2030-02-01"), d("2030-02-01"), "Austin"),
            Item::new("Linux Day", d("2030-03-01"), d("2030-03-01"), "Rome"),
        ];
        let sync = ViewSynchronizer::new(TuiViews::default(), TuiMap::default())
            .with_clock(FixedClock(d("2025-01-01")));
        let mut state = AppState::with_synchronizer(sync);
        handle_app_event(&mut state, AppEvent::DatasetLoaded(Ok(items)));
        state
    }

    #[test]
    fn date_input_narrows_to_exact_start_date() {
        let mut state = loaded_state();
        assert_eq!(state.items().len(), 3);

        handle_key_event(key(KeyCode::Char('d')), &mut state);
        assert_eq!(state.mode, InputMode::DateEntry);
        type_text(&mut state, "2030-02-01");
        // Results follow the box while typing.
        assert_eq!(state.items().len(), 1);
        handle_key_event(key(KeyCode::Enter), &mut state);

        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.active_date_input, "2030-02-01");
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].name, "Go Meetup");

        // Search and date combine.
        handle_key_event(key(KeyCode::Char('/')), &mut state);
        type_text(&mut state, "rust");
        handle_key_event(key(KeyCode::Enter), &mut state);
        assert!(state.items().is_empty());

        handle_key_event(key(KeyCode::Char('c')), &mut state);
        assert_eq!(state.active_date_input, "");
        assert_eq!(state.items().len(), 3);
    }

    #[test]
    fn unparsable_date_leaves_list_unnarrowed() {
        let mut state = loaded_state();
        handle_key_event(key(KeyCode::Char('d')), &mut state);
        type_text(&mut state, "tomorrow");
        handle_key_event(key(KeyCode::Enter), &mut state);

        assert_eq!(state.active_date_input, "tomorrow");
        assert_eq!(state.current_query().date, None);
        assert_eq!(state.items().len(), 3);
    }

    #[test]
    fn esc_discards_the_typed_date() {
        let mut state = loaded_state();
        handle_key_event(key(KeyCode::Char('d')), &mut state);
        type_text(&mut state, "2030-03-01");
        assert_eq!(state.items().len(), 1);
        handle_key_event(key(KeyCode::Esc), &mut state);

        assert_eq!(state.active_date_input, "");
        assert_eq!(state.items().len(), 3);
    }

    #[test]
    fn search_works_while_loading_and_after_failure() {
        let mut state =
            AppState::with_synchronizer(ViewSynchronizer::new(TuiViews::default(), TuiMap::default()));
        state.sync.begin_load();

        handle_key_event(key(KeyCode::Char('/')), &mut state);
        handle_key_event(key(KeyCode::Char('x')), &mut state);
        handle_key_event(key(KeyCode::Enter), &mut state);
        assert_eq!(state.active_search_query, "x");
        assert!(state.items().is_empty());

        handle_app_event(
            &mut state,
            AppEvent::DatasetLoaded(Err(LoadError::Parse("bad json".to_string()))),
        );
        assert_eq!(state.sync.views().status(StatusSlot::Results), LOAD_FAILED_STATUS);
        assert_eq!(state.active_search_query, "");

        handle_key_event(key(KeyCode::Char('r')), &mut state);
        handle_key_event(key(KeyCode::Char('p')), &mut state);
        assert!(state.items().is_empty());
    }

    #[test]
    fn quit_keys() {
        let mut state =
            AppState::with_synchronizer(ViewSynchronizer::new(TuiViews::default(), TuiMap::default()));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('q')), &mut state),
            Some(Action::Quit)
        ));
        state.mode = InputMode::Searching;
        assert!(handle_key_event(key(KeyCode::Char('q')), &mut state).is_none());
        assert_eq!(state.input_buffer, "q");
    }
}
