//! Price history state container for the detail view — app-owned, SDK-provided update logic.

use super::{sort_by_timestamp, HistoryPoint};
use crate::shared::TimePeriod;

/// What the detail view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSnapshot {
    pub period: TimePeriod,
    pub history: Vec<HistoryPoint>,
    pub is_loading: bool,
}

impl DetailSnapshot {
    /// False while loading and when the last load came back empty or failed.
    pub fn has_data(&self) -> bool {
        !self.is_loading && !self.history.is_empty()
    }
}

/// History for the selected period plus the loading flag.
///
/// Every load gets a ticket. Only the newest ticket may write results, so a
/// slow response for a period the user already left is dropped.
#[derive(Debug, Clone, Default)]
pub struct PriceHistoryState {
    period: TimePeriod,
    history: Vec<HistoryPoint>,
    is_loading: bool,
    latest_ticket: u64,
}

impl PriceHistoryState {
    pub fn new(period: TimePeriod) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn select_period(&mut self, period: TimePeriod) {
        self.period = period;
    }

    /// Mark a load as started. Returns its ticket and the period to fetch.
    pub fn begin_load(&mut self) -> (u64, TimePeriod) {
        self.latest_ticket += 1;
        self.is_loading = true;
        (self.latest_ticket, self.period)
    }

    /// Store a successful result. Returns false if the ticket is stale.
    pub fn complete_load(&mut self, ticket: u64, mut points: Vec<HistoryPoint>) -> bool {
        if ticket != self.latest_ticket {
            return false;
        }
        sort_by_timestamp(&mut points);
        self.history = points;
        self.is_loading = false;
        true
    }

    /// A failed load only clears the loading flag; previous history stays.
    pub fn fail_load(&mut self, ticket: u64) -> bool {
        if ticket != self.latest_ticket {
            return false;
        }
        self.is_loading = false;
        true
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    pub fn history(&self) -> &[HistoryPoint] {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        DetailSnapshot {
            period: self.period,
            history: self.history.clone(),
            is_loading: self.is_loading,
        }
    }
}
