// Defines actions and events for TUI interaction and state updates.
use crate::error::LoadError;
use crate::model::Item;

#[derive(Debug)]
pub enum Action {
    Quit,
}

/// Messages from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    DatasetLoaded(Result<Vec<Item>, LoadError>),
}
