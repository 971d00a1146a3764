use crate::{AggregateStats, ComicId, ComicRecord, FilterState, LoadStatus, StatusCategory};

/// Shown in the detail view when a comic has no access text.
pub const DEFAULT_ACCESS_TEXT: &str = "一般連載中";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub catalog: CatalogViewModel,
    /// `Some` while the detail view is open.
    pub detail: Option<DetailViewModel>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogViewModel {
    pub load: LoadStatus,
    pub stats: AggregateStats,
    pub filter: FilterState,
    /// Cards on the current page.
    pub cards: Vec<ComicCardView>,
    pub filtered_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub show_pagination: bool,
    pub can_prev: bool,
    pub can_next: bool,
    /// Nothing to show on this page; offer to clear the filters.
    pub show_clear_filters: bool,
    pub last_error: Option<String>,
}

impl Default for CatalogViewModel {
    fn default() -> Self {
        Self {
            load: LoadStatus::Idle,
            stats: AggregateStats::default(),
            filter: FilterState::default(),
            cards: Vec::new(),
            filtered_count: 0,
            current_page: 1,
            total_pages: 1,
            show_pagination: false,
            can_prev: false,
            can_next: false,
            show_clear_filters: true,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicCardView {
    pub id: ComicId,
    pub title: String,
    pub genre: String,
    pub episodes: String,
    pub picture: String,
    pub status: StatusCategory,
}

impl ComicCardView {
    pub fn from_record(record: &ComicRecord, status: StatusCategory) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            genre: record.genre.clone(),
            episodes: record.episodes.clone().unwrap_or_default(),
            picture: record.picture.clone(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailViewModel {
    Loading { id: ComicId },
    NotFound { id: ComicId },
    Found(ComicDetailView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicDetailView {
    pub id: ComicId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub episodes: String,
    pub access: String,
    pub picture: String,
    pub hyperlink: String,
    pub crawl_date: String,
    pub status: StatusCategory,
}

impl ComicDetailView {
    pub fn new(record: &ComicRecord, status: StatusCategory) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            author: record.author.clone(),
            genre: record.genre.clone(),
            episodes: record.episodes.clone().unwrap_or_default(),
            access: record
                .access
                .clone()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| DEFAULT_ACCESS_TEXT.to_string()),
            picture: record.picture.clone(),
            hyperlink: record.hyperlink.clone(),
            crawl_date: record.crawl_date.clone(),
            status,
        }
    }
}
