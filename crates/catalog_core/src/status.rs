use std::fmt;
use std::str::FromStr;

use crate::ComicRecord;

/// "Requires a paid-access pass."
pub const PAID_MARKER: &str = "需要追漫券";
/// Any mention of the pass; vetoes the completed branch.
pub const PASS_MARKER: &str = "追漫券";
/// "Every episode can be read for free."
pub const FREE_FULL_MARKER: &str = "可免費看完整話數";
/// "Completed."
pub const COMPLETED_MARKER: &str = "已完結";

/// Derived read-access state of a comic. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusCategory {
    #[default]
    FreeOngoing,
    FreeCompleted,
    Paid,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 3] = [
        StatusCategory::FreeOngoing,
        StatusCategory::FreeCompleted,
        StatusCategory::Paid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCategory::FreeOngoing => "free_ongoing",
            StatusCategory::FreeCompleted => "free_completed",
            StatusCategory::Paid => "paid",
        }
    }

    /// Short label shown on catalog cards.
    pub fn badge_label(self) -> &'static str {
        match self {
            StatusCategory::FreeOngoing => "連載",
            StatusCategory::FreeCompleted => "免費完結",
            StatusCategory::Paid => "追漫券",
        }
    }

    /// Tag shown in the detail view.
    pub fn detail_label(self) -> &'static str {
        match self {
            StatusCategory::FreeOngoing => "連載中",
            StatusCategory::FreeCompleted => "已完結",
            StatusCategory::Paid => "需追漫券",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for StatusCategory {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free_ongoing" => Ok(StatusCategory::FreeOngoing),
            "free_completed" => Ok(StatusCategory::FreeCompleted),
            "paid" => Ok(StatusCategory::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Maps a record to exactly one status category. Implementations must be
/// pure and total.
pub trait StatusClassifier {
    fn classify(&self, record: &ComicRecord) -> StatusCategory;
}

/// Substring rules over the record's access text.
///
/// Precedence matters: "已完結，需要追漫券" contains both the completed and
/// the paid marker and must come out as paid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkerClassifier;

impl StatusClassifier for MarkerClassifier {
    fn classify(&self, record: &ComicRecord) -> StatusCategory {
        classify_text(record.status_text())
    }
}

/// Classify with the default marker rules.
///
/// A record with neither `access` nor `episodes` is `FreeOngoing`: the
/// fallback category, not an error.
pub fn classify(record: &ComicRecord) -> StatusCategory {
    MarkerClassifier.classify(record)
}

fn classify_text(text: &str) -> StatusCategory {
    if text.contains(PAID_MARKER) {
        StatusCategory::Paid
    } else if text.contains(FREE_FULL_MARKER)
        || (text.contains(COMPLETED_MARKER) && !text.contains(PASS_MARKER))
    {
        StatusCategory::FreeCompleted
    } else {
        StatusCategory::FreeOngoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_with_bare_pass_mention_is_not_free() {
        // Mentions the pass without the full "requires" phrase.
        assert_eq!(classify_text("已完結，追漫券限定"), StatusCategory::FreeOngoing);
    }

    #[test]
    fn free_full_marker_wins_over_pass_mention() {
        assert_eq!(
            classify_text("可免費看完整話數，追漫券可提前看"),
            StatusCategory::FreeCompleted
        );
    }

    #[test]
    fn parses_filter_tokens() {
        for category in StatusCategory::ALL {
            assert_eq!(category.as_str().parse::<StatusCategory>(), Ok(category));
        }
        assert!("completed".parse::<StatusCategory>().is_err());
    }
}
