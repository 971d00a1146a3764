use std::fmt;

/// Identifier of a comic as delivered by the collection endpoint.
///
/// The endpoint may encode ids as JSON numbers or strings; both are kept in
/// their string form so that comparisons never depend on the transport type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ComicId(String);

impl ComicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `other` renders to the same text as this id. Empty ids
    /// match nothing.
    pub fn matches(&self, other: impl fmt::Display) -> bool {
        !self.0.is_empty() && self.0 == other.to_string()
    }
}

impl fmt::Display for ComicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComicId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComicId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ComicId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// One catalog entry. Immutable from the pipeline's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComicRecord {
    pub id: ComicId,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Source image URL; displayed through the image proxy.
    pub picture: String,
    /// Where the comic can be read.
    pub hyperlink: String,
    pub crawl_date: String,
    pub last_updated: Option<String>,
    /// Free-form access text, e.g. "已完結，需要追漫券".
    pub access: Option<String>,
    /// Free-form progress text, e.g. "共 52 話".
    pub episodes: Option<String>,
    pub episode_count: Option<u32>,
}

impl ComicRecord {
    /// Text the status rules run against: `access`, falling back to
    /// `episodes`, falling back to "". Empty strings count as absent.
    pub fn status_text(&self) -> &str {
        non_empty(self.access.as_deref())
            .or_else(|| non_empty(self.episodes.as_deref()))
            .unwrap_or("")
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
