use crate::{ComicId, ComicRecord, RequestId, StatusFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Catalog view opened; fetches the collection once per session.
    SessionStarted,
    /// User asked for a fresh copy of the collection.
    ReloadRequested,
    /// Engine completion for a collection fetch.
    CollectionLoaded {
        request: RequestId,
        result: Result<Vec<ComicRecord>, String>,
    },
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a status card.
    StatusFilterChanged(StatusFilter),
    /// User clicked "clear all filters".
    FiltersCleared,
    /// User jumped to a 1-based page number.
    PageRequested(usize),
    NextPage,
    PrevPage,
    /// User opened the detail view for one comic.
    DetailRequested(ComicId),
    /// Engine completion for a detail lookup. `result` holds whatever
    /// collection the lookup produced; the record is resolved from it.
    DetailLoaded {
        request: RequestId,
        result: Result<Vec<ComicRecord>, String>,
    },
    /// User left the detail view.
    BackToCatalog,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
