use crate::{ComicId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCollection { request: RequestId },
    FetchDetail { request: RequestId, id: ComicId },
    /// Page changed; the view should return to the top.
    ScrollToTop,
}
