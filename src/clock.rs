// File: src/clock.rs
// Source of the relevance reference date.
use chrono::{Local, NaiveDate};

/// Supplies "today" to the relevance classifier.
///
/// The synchronizer asks the clock again on every recomputation, so a
/// session that crosses midnight drops events that ended yesterday.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
