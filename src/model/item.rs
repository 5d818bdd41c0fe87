// File: src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PriceClass {
    Free,
    Paid,
}

impl PriceClass {
    /// Lenient parse used for both dataset records and query inputs.
    /// Returns `None` for anything that is not a recognized class.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(PriceClass::Free),
            "paid" => Some(PriceClass::Paid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A single event. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub price: PriceClass,
    pub organization_url: String,
    pub logo_url: Option<String>,
    pub featured: bool,
    pub region: Option<String>,
    pub description: Option<String>,
    pub coordinates: Option<GeoPoint>,
}

impl Item {
    /// Minimal constructor; optional fields start empty. The price class
    /// starts as `Paid`, the same as a record without `free_or_paid`.
    pub fn new(name: &str, start_date: NaiveDate, end_date: NaiveDate, location: &str) -> Self {
        Self {
            name: name.to_string(),
            start_date,
            end_date,
            location: location.to_string(),
            price: PriceClass::Paid,
            organization_url: String::new(),
            logo_url: None,
            featured: false,
            region: None,
            description: None,
            coordinates: None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some_and(|p| p.is_finite())
    }

    /// Current or upcoming: the event has not ended before `reference`.
    /// An event ending on `reference` itself is still relevant.
    pub fn is_current_or_upcoming(&self, reference: NaiveDate) -> bool {
        self.end_date >= reference
    }

    /// "2025-03-01 → 2025-03-03", the date line shown on cards and popups.
    pub fn date_range_label(&self) -> String {
        format!(
            "{} → {}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}
