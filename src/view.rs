// File: src/view.rs
//! Rendering collaborators driven by the synchronizer, and the status texts
//! shown next to each view.
//!
//! Every call replaces what the view showed before. Implementations must not
//! accumulate content across calls.

use crate::bucket::BucketSet;
use crate::map::{GeoBounds, MapMarker};
use crate::model::{GeoPoint, Item};

pub const LOAD_FAILED_STATUS: &str = "Failed to load events.";
pub const NO_MATCHES_STATUS: &str = "No matches";
pub const NO_MAPPABLE_STATUS: &str = "No mappable events";
pub const NO_FEATURED_STATUS: &str = "No featured events.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSlot {
    Results,
    Map,
    Featured,
}

/// Presentation sinks for the list, the featured rotation and status lines.
pub trait ViewSink {
    fn render_list(&mut self, items: &[Item]);
    fn render_featured(&mut self, buckets: &BucketSet<Item>);
    fn render_status(&mut self, slot: StatusSlot, text: &str);
}

/// Map widget capability. All calls are idempotent.
pub trait MapWidget {
    fn set_markers(&mut self, markers: &[MapMarker]);
    fn fit_bounds(&mut self, bounds: GeoBounds);
    fn set_view(&mut self, center: GeoPoint, zoom: u8);
}

pub fn results_status(count: usize) -> String {
    match count {
        0 => NO_MATCHES_STATUS.to_string(),
        1 => "1 match".to_string(),
        n => format!("{} matches", n),
    }
}

pub fn map_status(count: usize) -> String {
    match count {
        0 => NO_MAPPABLE_STATUS.to_string(),
        1 => "1 event on map".to_string(),
        n => format!("{} events on map", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralization() {
        assert_eq!(results_status(0), "No matches");
        assert_eq!(results_status(1), "1 match");
        assert_eq!(results_status(4), "4 matches");
        assert_eq!(map_status(0), "No mappable events");
        assert_eq!(map_status(1), "1 event on map");
        assert_eq!(map_status(2), "2 events on map");
    }
}
