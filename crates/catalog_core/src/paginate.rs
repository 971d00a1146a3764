use std::num::NonZeroUsize;

/// Page size used when the deployment does not configure one.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// One page of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    /// 1-based.
    pub current_page: usize,
}

/// Number of pages needed for `len` items; never less than 1.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Slice `[(page - 1) * size, page * size)` of `items`, clamped to bounds.
///
/// Page numbers outside `1..=total_pages` give an empty slice; clamping the
/// requested page is the caller's job.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let slice = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size).min(items.len());
            let end = start.saturating_add(size).min(items.len());
            &items[start..end]
        }
        None => &items[..0],
    };
    Page {
        items: slice,
        total_pages: total_pages(items.len(), page_size),
        current_page: page,
    }
}

/// Current position within a paginated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_size: NonZeroUsize,
    current_page: usize,
}

impl PageState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to `page` if it lies in `1..=total_pages(len)`. Out-of-range
    /// requests leave the position untouched and return false.
    pub fn navigate(&mut self, page: usize, len: usize) -> bool {
        if page < 1 || page > total_pages(len, self.page_size) {
            return false;
        }
        self.current_page = page;
        true
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
