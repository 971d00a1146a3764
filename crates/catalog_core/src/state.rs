use std::num::NonZeroUsize;

use crate::filter::matching_indices;
use crate::paginate::{paginate, PageState};
use crate::status::{MarkerClassifier, StatusClassifier};
use crate::view_model::{
    AppViewModel, CatalogViewModel, ComicCardView, ComicDetailView, DetailViewModel,
};
use crate::{resolve, AggregateStats, ComicId, ComicRecord, FilterState, StatusFilter};

/// Tag carried by every fetch so that late completions can be recognised.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Catalog,
    Detail(ComicId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum DetailState {
    #[default]
    Closed,
    Loading {
        id: ComicId,
        request: RequestId,
    },
    Found(ComicRecord),
    NotFound {
        id: ComicId,
    },
}

/// Controller state: the fetched collection and everything derived from it.
///
/// `C` decides each record's status category for stats, filtering and the
/// views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState<C = MarkerClassifier> {
    comics: Vec<ComicRecord>,
    stats: AggregateStats,
    filter: FilterState,
    /// Indices into `comics` that pass `filter`, in order.
    visible: Vec<usize>,
    page: PageState,
    load: LoadStatus,
    pending_collection: Option<RequestId>,
    route: Route,
    detail: DetailState,
    last_request: RequestId,
    last_error: Option<String>,
    dirty: bool,
    classifier: C,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self::with_classifier(MarkerClassifier, page_size)
    }
}

impl<C: StatusClassifier> AppState<C> {
    pub fn with_classifier(classifier: C, page_size: NonZeroUsize) -> Self {
        Self {
            comics: Vec::new(),
            stats: AggregateStats::default(),
            filter: FilterState::default(),
            visible: Vec::new(),
            page: PageState::new(page_size),
            load: LoadStatus::Idle,
            pending_collection: None,
            route: Route::Catalog,
            detail: DetailState::Closed,
            last_request: 0,
            last_error: None,
            dirty: false,
            classifier,
        }
    }

    pub fn comics(&self) -> &[ComicRecord] {
        &self.comics
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The filtered subsequence, in collection order.
    pub fn visible_records(&self) -> impl Iterator<Item = &ComicRecord> + '_ {
        self.visible.iter().map(|&index| &self.comics[index])
    }

    /// True while a catalog or detail fetch is awaiting completion.
    pub fn is_waiting(&self) -> bool {
        self.pending_collection.is_some() || matches!(self.detail, DetailState::Loading { .. })
    }

    /// Returns and clears the re-render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            catalog: self.catalog_view(),
            detail: self.detail_view(),
            dirty: self.dirty,
        }
    }

    fn catalog_view(&self) -> CatalogViewModel {
        let page = paginate(&self.visible, self.page.page_size, self.page.current_page());
        let cards: Vec<ComicCardView> = page
            .items
            .iter()
            .map(|&index| {
                let record = &self.comics[index];
                ComicCardView::from_record(record, self.classifier.classify(record))
            })
            .collect();
        CatalogViewModel {
            load: self.load.clone(),
            stats: self.stats,
            filter: self.filter.clone(),
            filtered_count: self.visible.len(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            show_pagination: page.total_pages > 1,
            can_prev: page.current_page > 1,
            can_next: page.current_page < page.total_pages,
            show_clear_filters: cards.is_empty(),
            cards,
            last_error: self.last_error.clone(),
        }
    }

    fn detail_view(&self) -> Option<DetailViewModel> {
        match &self.detail {
            DetailState::Closed => None,
            DetailState::Loading { id, .. } => Some(DetailViewModel::Loading { id: id.clone() }),
            DetailState::NotFound { id } => Some(DetailViewModel::NotFound { id: id.clone() }),
            DetailState::Found(record) => Some(DetailViewModel::Found(ComicDetailView::new(
                record,
                self.classifier.classify(record),
            ))),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn begin_collection_fetch(&mut self) -> RequestId {
        let request = self.next_request();
        self.pending_collection = Some(request);
        self.load = LoadStatus::Loading;
        self.mark_dirty();
        request
    }

    /// Apply a collection fetch outcome. Returns false for stale completions,
    /// which are dropped untouched.
    pub(crate) fn apply_collection(
        &mut self,
        request: RequestId,
        result: Result<Vec<ComicRecord>, String>,
    ) -> bool {
        if self.pending_collection != Some(request) {
            return false;
        }
        self.pending_collection = None;
        match result {
            Ok(comics) => {
                self.stats = AggregateStats::compute(&comics, &self.classifier);
                self.comics = comics;
                self.load = LoadStatus::Loaded;
                self.last_error = None;
                self.refilter();
            }
            Err(message) => {
                self.load = LoadStatus::Failed(message.clone());
                self.last_error = Some(message);
            }
        }
        self.mark_dirty();
        true
    }

    /// Recompute the visible subsequence. Always returns to page 1.
    fn refilter(&mut self) {
        self.visible = matching_indices(&self.comics, &self.filter, &self.classifier);
        self.page.reset();
        self.mark_dirty();
    }

    pub(crate) fn set_search_term(&mut self, term: String) -> bool {
        if self.filter.search_term == term {
            return false;
        }
        self.filter.search_term = term;
        self.refilter();
        true
    }

    pub(crate) fn set_status_filter(&mut self, status: StatusFilter) -> bool {
        if self.filter.status_filter == status {
            return false;
        }
        self.filter.status_filter = status;
        self.refilter();
        true
    }

    pub(crate) fn clear_filters(&mut self) -> bool {
        if self.filter.is_cleared() {
            return false;
        }
        self.filter = FilterState::default();
        self.refilter();
        true
    }

    /// Start of a new session: filters and page position go back to their
    /// defaults, the old collection stays until the new one arrives.
    pub(crate) fn reset_session(&mut self) {
        self.filter = FilterState::default();
        self.refilter();
    }

    pub(crate) fn navigate(&mut self, page: usize) -> bool {
        let moved = self.page.navigate(page, self.visible.len());
        if moved {
            self.mark_dirty();
        }
        moved
    }

    pub(crate) fn begin_detail(&mut self, id: ComicId) -> RequestId {
        let request = self.next_request();
        self.route = Route::Detail(id.clone());
        self.detail = DetailState::Loading { id, request };
        self.mark_dirty();
        request
    }

    /// Resolve a detail fetch outcome against the awaited id. Stale
    /// completions (another id requested since, or the view was left) are
    /// dropped and false is returned.
    pub(crate) fn apply_detail(
        &mut self,
        request: RequestId,
        result: Result<Vec<ComicRecord>, String>,
    ) -> bool {
        let id = match &self.detail {
            DetailState::Loading { id, request: awaited } if *awaited == request => id.clone(),
            _ => return false,
        };
        self.detail = match result {
            Ok(collection) => match resolve(&collection, &id) {
                Some(record) => DetailState::Found(record.clone()),
                None => DetailState::NotFound { id },
            },
            Err(message) => {
                self.last_error = Some(message);
                DetailState::NotFound { id }
            }
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn close_detail(&mut self) -> bool {
        if self.route == Route::Catalog && self.detail == DetailState::Closed {
            return false;
        }
        self.route = Route::Catalog;
        self.detail = DetailState::Closed;
        self.mark_dirty();
        true
    }
}
