use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{MoodEvent, Source};

/// Restricts events to an inclusive date range and a set of sources.
/// Unset bounds and an unset source set match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sources: Option<BTreeSet<Source>>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_date(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources = Some(sources.into_iter().collect());
        self
    }

    pub fn matches(&self, event: &MoodEvent) -> bool {
        let date = event.date();
        self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
            && self
                .sources
                .as_ref()
                .map_or(true, |sources| sources.contains(&event.source()))
    }

    /// Matching events, in their original order.
    pub fn apply(&self, events: &[MoodEvent]) -> Vec<MoodEvent> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
