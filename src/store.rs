// File: src/store.rs
// In-memory dataset and the filter engine that derives result sets from it.
use crate::model::{Item, Query};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// The ordered subset every view renders from after a synchronization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredResult {
    pub items: Vec<Item>,
    pub reference_date: NaiveDate,
}

impl FilteredResult {
    pub fn empty(reference_date: NaiveDate) -> Self {
        Self {
            items: Vec::new(),
            reference_date,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Relevance first, then text, then structured fields. Dataset order is kept.
pub fn filter(items: &[Item], query: &Query, reference: NaiveDate) -> Vec<Item> {
    items
        .iter()
        .filter(|item| item.is_current_or_upcoming(reference))
        .filter(|item| query.matches(item))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    items: Vec<Item>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Replaces the whole dataset.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filter(&self, query: &Query, reference: NaiveDate) -> FilteredResult {
        FilteredResult {
            items: filter(&self.items, query, reference),
            reference_date: reference,
        }
    }

    /// Relevant featured items in dataset order. Source of the featured
    /// rotation; independent of the current query.
    pub fn featured(&self, reference: NaiveDate) -> Vec<Item> {
        self.items
            .iter()
            .filter(|i| i.featured && i.is_current_or_upcoming(reference))
            .cloned()
            .collect()
    }

    /// Distinct regions across the dataset, sorted. Feeds the region picker.
    pub fn regions(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|i| i.region.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
