// File: src/map.rs
// Map projection: which items become markers and how the map is framed.
use crate::model::{GeoPoint, Item};
use chrono::NaiveDate;

/// Fractional margin added around the marker bounds.
pub const DEFAULT_PADDING: f64 = 0.2;
/// Whole-world view used when nothing can be placed on the map.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 0.0, lng: 0.0 };
pub const DEFAULT_ZOOM: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    /// Smallest box containing every point. `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => GeoBounds {
                    south_west: p,
                    north_east: p,
                },
                Some(b) => GeoBounds {
                    south_west: GeoPoint::new(b.south_west.lat.min(p.lat), b.south_west.lng.min(p.lng)),
                    north_east: GeoPoint::new(b.north_east.lat.max(p.lat), b.north_east.lng.max(p.lng)),
                },
            })
        })
    }

    /// Grows the box by `ratio` of its height and width on every side.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let lng_buffer = (self.north_east.lng - self.south_west.lng).abs() * ratio;
        GeoBounds {
            south_west: GeoPoint::new(self.south_west.lat - lat_buffer, self.south_west.lng - lng_buffer),
            north_east: GeoPoint::new(self.north_east.lat + lat_buffer, self.north_east.lng + lng_buffer),
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    Bounds(GeoBounds),
    Center { center: GeoPoint, zoom: u8 },
}

impl Viewport {
    pub fn world(zoom: u8) -> Self {
        Viewport::Center {
            center: DEFAULT_CENTER,
            zoom,
        }
    }
}

/// A placed item plus the fields its popup shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub point: GeoPoint,
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub organization_url: String,
}

impl MapMarker {
    fn from_item(item: &Item) -> Option<Self> {
        let point = item.coordinates.filter(|p| p.is_finite())?;
        Some(Self {
            point,
            name: item.name.clone(),
            location: item.location.clone(),
            start_date: item.start_date,
            end_date: item.end_date,
            organization_url: item.organization_url.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub markers: Vec<MapMarker>,
    pub viewport: Viewport,
}

impl Projection {
    pub fn points(&self) -> Vec<GeoPoint> {
        self.markers.iter().map(|m| m.point).collect()
    }

    pub fn status_text(&self) -> String {
        crate::view::map_status(self.markers.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub padding: f64,
    pub default_zoom: u8,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

/// Markers for every geo-capable item, framed by their padded bounds, or
/// the world view when there are none.
pub fn project(items: &[Item], options: MapOptions) -> Projection {
    let markers: Vec<MapMarker> = items.iter().filter_map(MapMarker::from_item).collect();
    let viewport = match GeoBounds::enclosing(markers.iter().map(|m| m.point)) {
        Some(bounds) => Viewport::Bounds(bounds.pad(options.padding)),
        None => Viewport::world(options.default_zoom),
    };
    Projection { markers, viewport }
}
