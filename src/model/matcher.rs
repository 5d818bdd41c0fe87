// File: src/model/matcher.rs
// Query value and the per-item predicates the filter engine combines.
//
// A query is replaced wholesale on every input change. The free-text term is
// matched case-insensitively as a substring of name, location or description;
// each structured filter is an exact match that is skipped when unset.
use crate::model::item::{Item, PriceClass};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub region: Option<String>,
    pub date: Option<NaiveDate>,
    pub price: Option<PriceClass>,
}

/// Unvalidated input as captured from the search controls.
#[derive(Debug, Clone, Default)]
pub struct RawQuery<'a> {
    pub text: &'a str,
    pub region: &'a str,
    pub date: &'a str,
    pub price: &'a str,
}

impl Query {
    pub fn text(term: &str) -> Self {
        Self {
            text: term.to_string(),
            ..Self::default()
        }
    }

    /// Builds a query from raw control values. Anything empty or
    /// unparsable is left unset.
    pub fn from_input(raw: RawQuery<'_>) -> Self {
        let region = raw.region.trim();
        Self {
            text: raw.text.to_string(),
            region: (!region.is_empty()).then(|| region.to_string()),
            date: NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").ok(),
            price: PriceClass::parse(raw.price),
        }
    }

    /// True when no narrowing is requested.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.region.as_deref().is_none_or(|r| r.is_empty())
            && self.date.is_none()
            && self.price.is_none()
    }

    /// Lower-cased search term, or `None` when text filtering is skipped.
    pub(crate) fn normalized_text(&self) -> Option<String> {
        let t = self.text.trim();
        (!t.is_empty()).then(|| t.to_lowercase())
    }

    /// Text and structured predicates. The filter engine checks relevance
    /// first and then calls this for each remaining item.
    pub fn matches(&self, item: &Item) -> bool {
        let needle = self.normalized_text();
        item.matches_text(needle.as_deref()) && self.matches_fields(item)
    }

    pub(crate) fn matches_fields(&self, item: &Item) -> bool {
        if let Some(region) = self.region.as_deref()
            && !region.is_empty()
            && item.region.as_deref() != Some(region)
        {
            return false;
        }
        if let Some(date) = self.date
            && item.start_date != date
        {
            return false;
        }
        if let Some(price) = self.price
            && item.price != price
        {
            return false;
        }
        true
    }
}

impl Item {
    /// `needle` must already be lower-cased. `None` matches everything.
    pub fn matches_text(&self, needle: Option<&str>) -> bool {
        let Some(needle) = needle else {
            return true;
        };
        self.name.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}
