//! Comic catalog core: status classification, filtering, pagination, and the
//! pure state machine driving the catalog and detail views.
mod effect;
mod filter;
mod msg;
mod paginate;
mod record;
mod resolve;
mod state;
mod stats;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{filter_collection, matching_indices, FilterState, StatusFilter};
pub use msg::Msg;
pub use paginate::{paginate, total_pages, Page, PageState, DEFAULT_PAGE_SIZE};
pub use record::{ComicId, ComicRecord};
pub use resolve::resolve;
pub use state::{AppState, LoadStatus, RequestId, Route};
pub use stats::AggregateStats;
pub use status::{
    classify, MarkerClassifier, StatusCategory, StatusClassifier, UnknownStatus,
    COMPLETED_MARKER, FREE_FULL_MARKER, PAID_MARKER, PASS_MARKER,
};
pub use update::update;
pub use view_model::{
    AppViewModel, CatalogViewModel, ComicCardView, ComicDetailView, DetailViewModel,
    DEFAULT_ACCESS_TEXT,
};
