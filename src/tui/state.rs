// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::controller::{SyncOptions, SyncState, ViewSynchronizer};
use crate::model::{Item, PriceClass, Query, RawQuery};
use crate::tui::sinks::{TuiMap, TuiViews};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use strum::IntoEnumIterator;

/// How long each featured slide stays up.
pub const FEATURED_INTERVAL: Duration = Duration::from_secs(5);

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Searching,
    /// Typing an exact start date (YYYY-MM-DD).
    DateEntry,
}

pub struct AppState {
    pub sync: ViewSynchronizer<TuiViews, TuiMap>,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub show_full_help: bool,

    // Filter State
    pub active_search_query: String,
    pub active_date_input: String,
    pub region: Option<String>,
    pub price: Option<PriceClass>,

    // Input Buffers
    pub input_buffer: String,
    pub cursor_position: usize,

    // Featured rotation
    pub featured_slide: usize,
    last_slide_change: Instant,
}

impl AppState {
    pub fn new(options: SyncOptions) -> Self {
        Self::with_synchronizer(
            ViewSynchronizer::new(TuiViews::default(), TuiMap::default()).with_options(options),
        )
    }

    pub fn with_synchronizer(sync: ViewSynchronizer<TuiViews, TuiMap>) -> Self {
        Self {
            sync,
            list_state: ListState::default(),
            mode: InputMode::Normal,
            show_full_help: false,
            active_search_query: String::new(),
            active_date_input: String::new(),
            region: None,
            price: None,
            input_buffer: String::new(),
            cursor_position: 0,
            featured_slide: 0,
            last_slide_change: Instant::now(),
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.sync.state(), SyncState::Idle | SyncState::Loading)
    }

    pub fn items(&self) -> &[Item] {
        &self.sync.views().list
    }

    /// Query reflecting the controls. While an input is open its
    /// uncommitted text is used, so results follow typing. A date that does
    /// not parse (yet) leaves the date filter unset.
    pub fn current_query(&self) -> Query {
        let (text, date) = match self.mode {
            InputMode::Searching => (&self.input_buffer, &self.active_date_input),
            InputMode::DateEntry => (&self.active_search_query, &self.input_buffer),
            InputMode::Normal => (&self.active_search_query, &self.active_date_input),
        };
        let price = self.price.map(|p| p.to_string()).unwrap_or_default();
        Query::from_input(RawQuery {
            text,
            region: self.region.as_deref().unwrap_or(""),
            date,
            price: &price,
        })
    }

    /// Opens the search or date input, prefilled with the committed value.
    pub fn open_input(&mut self, mode: InputMode) {
        self.input_buffer = match mode {
            InputMode::DateEntry => self.active_date_input.clone(),
            _ => self.active_search_query.clone(),
        };
        self.cursor_position = self.input_buffer.chars().count();
        self.mode = mode;
    }

    /// Enter: keeps the typed value.
    pub fn commit_input(&mut self) {
        let value = self.input_buffer.trim().to_string();
        match self.mode {
            InputMode::Searching => self.active_search_query = value,
            InputMode::DateEntry => self.active_date_input = value,
            InputMode::Normal => {}
        }
        self.mode = InputMode::Normal;
        self.reset_input();
        self.refresh_filtered_view();
    }

    /// Esc: drops the typed value and restores the committed query.
    pub fn cancel_input(&mut self) {
        self.mode = InputMode::Normal;
        self.reset_input();
        self.refresh_filtered_view();
    }

    pub fn refresh_filtered_view(&mut self) {
        let query = self.current_query();
        self.sync.on_query_change(query);
        self.clamp_selection();
    }

    /// Resets every control and returns to the base view.
    pub fn clear_filters(&mut self) {
        self.active_search_query.clear();
        self.active_date_input.clear();
        self.region = None;
        self.price = None;
        self.reset_input();
        self.sync.on_clear();
        self.clamp_selection();
    }

    /// Called after the synchronizer re-rendered on its own (e.g. a load).
    /// A load resets the query, so the controls follow.
    pub fn on_dataset_rendered(&mut self) {
        self.active_search_query.clear();
        self.active_date_input.clear();
        self.region = None;
        self.price = None;
        self.featured_slide = 0;
        self.list_state.select(None);
        self.clamp_selection();
    }

    pub fn cycle_region(&mut self) {
        let regions = self.sync.store().regions();
        self.region = match &self.region {
            None => regions.first().cloned(),
            Some(current) => regions
                .iter()
                .position(|r| r == current)
                .and_then(|i| regions.get(i + 1))
                .cloned(),
        };
        self.refresh_filtered_view();
    }

    pub fn cycle_price(&mut self) {
        let classes: Vec<PriceClass> = PriceClass::iter().collect();
        self.price = match self.price {
            None => classes.first().copied(),
            Some(current) => classes
                .iter()
                .position(|c| *c == current)
                .and_then(|i| classes.get(i + 1))
                .copied(),
        };
        self.refresh_filtered_view();
    }

    /// Advances the featured carousel when its interval has elapsed. The
    /// same beat re-runs the synchronizer so a session that crosses midnight
    /// drops events that just ended.
    pub fn tick(&mut self, now: Instant) {
        if now.duration_since(self.last_slide_change) >= FEATURED_INTERVAL {
            self.featured_slide = self.featured_slide.wrapping_add(1);
            self.last_slide_change = now;
            if self.sync.synchronize() {
                self.clamp_selection();
            }
        }
    }

    pub fn get_selected_item(&self) -> Option<&Item> {
        self.list_state.selected().and_then(|i| self.items().get(i))
    }

    fn clamp_selection(&mut self) {
        let len = self.items().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.min(len - 1)));
        }
    }

    // --- INPUT HELPERS ---
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}
