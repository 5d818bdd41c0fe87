// File: src/controller.rs
//! View synchronizer.
//!
//! The only component that recomputes the filtered result and pushes it to
//! the views. Every pass computes one `FilteredResult` and drives the results
//! status, the list and the map from that same snapshot, so the map always
//! shows exactly the items the list shows.
//!
//! Front ends own one `ViewSynchronizer` and route input through
//! `on_query_change` / `on_clear`. Those entry points work in every state,
//! including while the dataset is still loading or after the load failed; they
//! simply operate on an empty dataset.
use crate::bucket::{BucketSet, DEFAULT_BUCKETS};
use crate::clock::{Clock, SystemClock};
use crate::error::LoadError;
use crate::map::{self, MapOptions, Viewport};
use crate::model::{Item, Query};
use crate::source::ItemSource;
use crate::store::{EventStore, FilteredResult};
use crate::view::{
    LOAD_FAILED_STATUS, MapWidget, NO_FEATURED_STATUS, StatusSlot, ViewSink, results_status,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncOptions {
    pub featured_buckets: usize,
    pub map: MapOptions,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            featured_buckets: DEFAULT_BUCKETS,
            map: MapOptions::default(),
        }
    }
}

pub struct ViewSynchronizer<V: ViewSink, M: MapWidget> {
    store: EventStore,
    query: Query,
    state: SyncState,
    last_error: Option<String>,
    // Last snapshot pushed to the views.
    rendered: Option<FilteredResult>,
    clock: Box<dyn Clock>,
    options: SyncOptions,
    views: V,
    map: M,
}

impl<V: ViewSink, M: MapWidget> ViewSynchronizer<V, M> {
    pub fn new(views: V, map: M) -> Self {
        Self {
            store: EventStore::new(),
            query: Query::default(),
            state: SyncState::Idle,
            last_error: None,
            rendered: None,
            clock: Box::new(SystemClock),
            options: SyncOptions::default(),
            views,
            map,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// The snapshot the views currently show.
    pub fn current(&self) -> Option<&FilteredResult> {
        self.rendered.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn views(&self) -> &V {
        &self.views
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    // --- Load lifecycle ---

    pub fn begin_load(&mut self) {
        log::debug!("Synchronizer: {:?} -> Loading", self.state);
        self.state = SyncState::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Item>, LoadError>) {
        self.query = Query::default();
        match result {
            Ok(items) => {
                log::info!("Dataset ready with {} events", items.len());
                self.store.replace(items);
                self.state = SyncState::Ready;
                self.last_error = None;
                self.render_full();
            }
            Err(e) => {
                log::warn!("Dataset load failed: {}", e);
                self.store.clear();
                self.state = SyncState::Error;
                self.last_error = Some(e.to_string());
                self.render_failure();
            }
        }
    }

    /// Loads the dataset from `source` and renders the initial views.
    pub async fn load<S: ItemSource>(&mut self, source: &S) -> SyncState {
        self.begin_load();
        let result = source.load_items().await;
        self.finish_load(result);
        self.state
    }

    // --- Input entry points ---

    pub fn on_query_change(&mut self, query: Query) -> bool {
        self.query = query;
        self.synchronize()
    }

    /// Back to the base view: every relevant item, no narrowing.
    pub fn on_clear(&mut self) -> bool {
        self.query = Query::default();
        self.synchronize()
    }

    /// Recomputes the result for the current query and fans it out.
    /// Returns `false` when the views already show this exact result.
    pub fn synchronize(&mut self) -> bool {
        let today = self.clock.today();
        let result = self.store.filter(&self.query, today);
        if self.rendered.as_ref() == Some(&result) {
            log::debug!("Synchronizer: result unchanged ({} items), skipping render", result.len());
            return false;
        }
        log::debug!(
            "Synchronizer: rendering {} items for query {:?}",
            result.len(),
            self.query
        );
        // A new day can end featured events too.
        if self
            .rendered
            .as_ref()
            .is_some_and(|r| r.reference_date != today)
        {
            log::info!("Reference date is now {}, refreshing featured events", today);
            self.render_featured(today);
        }
        self.fan_out(&result, &results_status(result.len()));
        self.rendered = Some(result);
        true
    }

    // --- Rendering ---

    fn fan_out(&mut self, result: &FilteredResult, results_text: &str) {
        self.views.render_status(StatusSlot::Results, results_text);
        self.views.render_list(&result.items);
        self.render_map(&result.items);
    }

    fn render_map(&mut self, items: &[Item]) {
        let projection = map::project(items, self.options.map);
        self.map.set_markers(&projection.markers);
        match projection.viewport {
            Viewport::Bounds(bounds) => self.map.fit_bounds(bounds),
            Viewport::Center { center, zoom } => self.map.set_view(center, zoom),
        }
        self.views
            .render_status(StatusSlot::Map, &projection.status_text());
    }

    fn render_featured(&mut self, reference: NaiveDate) {
        let featured = self.store.featured(reference);
        let buckets = BucketSet::round_robin(&featured, self.options.featured_buckets);
        self.views.render_featured(&buckets);
        let status = if buckets.is_empty() {
            NO_FEATURED_STATUS.to_string()
        } else {
            String::new()
        };
        self.views.render_status(StatusSlot::Featured, &status);
    }

    fn render_full(&mut self) {
        let today = self.clock.today();
        let result = self.store.filter(&self.query, today);
        self.render_featured(today);
        self.fan_out(&result, &results_status(result.len()));
        self.rendered = Some(result);
    }

    fn render_failure(&mut self) {
        let today = self.clock.today();
        let result = FilteredResult::empty(today);
        self.render_featured(today);
        self.fan_out(&result, LOAD_FAILED_STATUS);
        self.rendered = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::map::{GeoBounds, MapMarker};
    use crate::model::GeoPoint;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct Counting {
        lists: usize,
    }

    impl ViewSink for Counting {
        fn render_list(&mut self, _items: &[Item]) {
            self.lists += 1;
        }
        fn render_featured(&mut self, _buckets: &BucketSet<Item>) {}
        fn render_status(&mut self, _slot: StatusSlot, _text: &str) {}
    }

    #[derive(Default)]
    struct NullMap;

    impl MapWidget for NullMap {
        fn set_markers(&mut self, _markers: &[MapMarker]) {}
        fn fit_bounds(&mut self, _bounds: GeoBounds) {}
        fn set_view(&mut self, _center: GeoPoint, _zoom: u8) {}
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn identical_results_are_not_rerendered() {
        let items = vec![
            Item::new("Alpha", d("2030-01-01"), d("2030-01-02"), "Rome"),
            Item::new("Beta", d("2030-01-01"), d("2030-01-02"), "Oslo"),
        ];
        let mut sync = ViewSynchronizer::new(Counting::default(), NullMap)
            .with_clock(FixedClock(d("2025-01-01")));
        sync.begin_load();
        sync.finish_load(Ok(items));
        assert_eq!(sync.views().lists, 1);

        // Same result as the initial render.
        assert!(!sync.on_query_change(Query::text("  ")));
        assert_eq!(sync.views().lists, 1);

        assert!(sync.on_query_change(Query::text("alpha")));
        assert!(!sync.on_query_change(Query::text("ALPHA")));
        assert_eq!(sync.views().lists, 2);

        assert!(sync.on_clear());
        assert_eq!(sync.views().lists, 3);
    }

    #[test]
    fn input_before_load_is_harmless() {
        let mut sync = ViewSynchronizer::new(Counting::default(), NullMap)
            .with_clock(FixedClock(d("2025-01-01")));
        assert_eq!(sync.state(), SyncState::Idle);
        assert!(sync.on_query_change(Query::text("anything")));
        assert_eq!(sync.current().map(|r| r.len()), Some(0));

        sync.begin_load();
        assert!(!sync.on_query_change(Query::text("still loading")));
        assert_eq!(sync.state(), SyncState::Loading);
    }
}
