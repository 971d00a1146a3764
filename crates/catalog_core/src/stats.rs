use crate::status::StatusClassifier;
use crate::{ComicRecord, StatusCategory};

/// Category counts over the full, unfiltered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateStats {
    pub total: usize,
    pub free_ongoing: usize,
    pub free_completed: usize,
    pub paid: usize,
}

impl AggregateStats {
    pub fn compute(collection: &[ComicRecord], classifier: &impl StatusClassifier) -> Self {
        collection.iter().fold(
            Self {
                total: collection.len(),
                ..Self::default()
            },
            |mut stats, record| {
                match classifier.classify(record) {
                    StatusCategory::FreeOngoing => stats.free_ongoing += 1,
                    StatusCategory::FreeCompleted => stats.free_completed += 1,
                    StatusCategory::Paid => stats.paid += 1,
                }
                stats
            },
        )
    }

    pub fn count(&self, category: StatusCategory) -> usize {
        match category {
            StatusCategory::FreeOngoing => self.free_ongoing,
            StatusCategory::FreeCompleted => self.free_completed,
            StatusCategory::Paid => self.paid,
        }
    }
}
