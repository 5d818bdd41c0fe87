// File: src/tui/sinks.rs
// Terminal-side view buffers. The synchronizer writes into these; `view::draw`
// reads them every frame.
use crate::bucket::BucketSet;
use crate::map::{DEFAULT_CENTER, DEFAULT_ZOOM, GeoBounds, MapMarker, Viewport};
use crate::model::{GeoPoint, Item};
use crate::view::{MapWidget, StatusSlot, ViewSink};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TuiViews {
    pub list: Vec<Item>,
    /// Non-empty featured buckets only.
    pub featured: Vec<Vec<Item>>,
    pub statuses: HashMap<StatusSlot, String>,
}

impl TuiViews {
    pub fn status(&self, slot: StatusSlot) -> &str {
        self.statuses.get(&slot).map(String::as_str).unwrap_or("")
    }
}

impl ViewSink for TuiViews {
    fn render_list(&mut self, items: &[Item]) {
        self.list = items.to_vec();
    }

    fn render_featured(&mut self, buckets: &BucketSet<Item>) {
        self.featured = buckets.non_empty().map(|(_, b)| b.to_vec()).collect();
    }

    fn render_status(&mut self, slot: StatusSlot, text: &str) {
        self.statuses.insert(slot, text.to_string());
    }
}

#[derive(Debug)]
pub struct TuiMap {
    pub markers: Vec<MapMarker>,
    pub viewport: Viewport,
}

impl Default for TuiMap {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            viewport: Viewport::Center {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
        }
    }
}

impl TuiMap {
    /// Canvas bounds as `([west, east], [south, north])`.
    ///
    /// Degenerate boxes (a single marker) get a minimum span so the canvas
    /// has an area to draw in. Zoom 2 and below shows the whole globe; each
    /// further level halves the span.
    pub fn canvas_bounds(&self) -> ([f64; 2], [f64; 2]) {
        const MIN_SPAN: f64 = 2.0;
        match self.viewport {
            Viewport::Bounds(b) => {
                let c = b.center();
                let half_lng = ((b.north_east.lng - b.south_west.lng) / 2.0).max(MIN_SPAN / 2.0);
                let half_lat = ((b.north_east.lat - b.south_west.lat) / 2.0).max(MIN_SPAN / 2.0);
                (
                    [c.lng - half_lng, c.lng + half_lng],
                    [c.lat - half_lat, c.lat + half_lat],
                )
            }
            Viewport::Center { center, zoom } => {
                let scale = 2f64.powi(i32::from(zoom.max(2)) - 2);
                let half_lng = 180.0 / scale;
                let half_lat = 90.0 / scale;
                (
                    [center.lng - half_lng, center.lng + half_lng],
                    [center.lat - half_lat, center.lat + half_lat],
                )
            }
        }
    }
}

impl MapWidget for TuiMap {
    fn set_markers(&mut self, markers: &[MapMarker]) {
        self.markers = markers.to_vec();
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        self.viewport = Viewport::Bounds(bounds);
    }

    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.viewport = Viewport::Center { center, zoom };
    }
}
