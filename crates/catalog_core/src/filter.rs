use std::fmt;
use std::str::FromStr;

use crate::status::{MarkerClassifier, StatusClassifier, UnknownStatus};
use crate::{ComicRecord, StatusCategory};

/// Status half of the filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(StatusCategory),
}

impl StatusFilter {
    pub fn admits(self, category: StatusCategory) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Search text plus status filter. Process-local UI state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub status_filter: StatusFilter,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, status_filter: StatusFilter) -> Self {
        Self {
            search_term: search_term.into(),
            status_filter,
        }
    }

    /// No search text and no status restriction.
    pub fn is_cleared(&self) -> bool {
        self.search_term.is_empty() && self.status_filter == StatusFilter::All
    }

    /// Case-insensitive title substring AND status match. `needle` is the
    /// lowercased search text; empty matches every title.
    fn admits(
        &self,
        record: &ComicRecord,
        needle: &str,
        classifier: &impl StatusClassifier,
    ) -> bool {
        if !needle.is_empty() && !record.title.to_lowercase().contains(needle) {
            return false;
        }
        self.status_filter.admits(classifier.classify(record))
    }
}

/// Positions of the records that pass `filter`, in collection order.
pub fn matching_indices(
    collection: &[ComicRecord],
    filter: &FilterState,
    classifier: &impl StatusClassifier,
) -> Vec<usize> {
    let needle = filter.search_term.to_lowercase();
    collection
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.admits(record, &needle, classifier))
        .map(|(index, _)| index)
        .collect()
}

/// Order-preserving subsequence of `collection` that passes `filter`.
pub fn filter_collection(collection: &[ComicRecord], filter: &FilterState) -> Vec<ComicRecord> {
    matching_indices(collection, filter, &MarkerClassifier)
        .into_iter()
        .map(|index| collection[index].clone())
        .collect()
}
